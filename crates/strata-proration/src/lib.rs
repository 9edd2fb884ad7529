//! Strata Core - prorating engine
//!
//! Turns a community-wide expense or income declaration into per-unit
//! obligations and commits the whole aggregate atomically through the
//! ledger gateway. Every mutating operation is gated by the access
//! evaluator before anything is read or written.
//!
//! Share computation is pure and lives in [`recompute`]; the engine wraps
//! it with precondition checks and the transactional write.

#![deny(unsafe_code)]

pub mod engine;
pub mod error;

pub use engine::{
    recompute, DeclarationPatch, DeclarationRequest, ProrationEngine, UnitShare,
};
pub use error::{ErrorKind, ProrationError};
