//! Strata Core - authorization
//!
//! Decides whether a principal may perform an action on a tenant-scoped
//! resource. Three pieces:
//!
//! - [`RoleCatalog`]: the closed role set and effective-permission
//!   resolution.
//! - [`TenancyContext`]: a read-only projection of one principal's
//!   tenancy facts, built once per request.
//! - [`AccessEvaluator`]: the `can_access` decision function. It never
//!   errors; callers translate `false` into a Forbidden response at the
//!   boundary.
//!
//! The evaluator fails closed everywhere except the `SUPER_ADMIN` role,
//! which bypasses every check.

#![deny(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod evaluator;
pub mod tenancy;

pub use catalog::{RoleCatalog, RoleResolution};
pub use error::AccessError;
pub use evaluator::{AccessEvaluator, Scope};
pub use tenancy::TenancyContext;
