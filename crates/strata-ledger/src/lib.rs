//! Strata Core - ledger gateway
//!
//! The transactional persistence boundary the prorating engine writes
//! through. [`LedgerReader`] and [`LedgerWriter`] are the port traits; the
//! production implementation sits on the platform datastore, while
//! [`InMemoryLedger`] backs tests and embedding.
//!
//! The storage-level unique index on `(community, kind, period)` inside
//! [`LedgerWriter::insert_declaration`] is the authoritative
//! duplicate-period guard. Callers must not pre-check existence; racing
//! inserts are resolved here.

#![deny(unsafe_code)]

pub mod error;
pub mod memory;
pub mod traits;

pub use error::LedgerError;
pub use memory::InMemoryLedger;
pub use traits::{DeclarationUpdate, LedgerReader, LedgerWriter};
