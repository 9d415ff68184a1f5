//! Role resolution and access control.
//!
//! This module maps an authenticated identity to its roles and decides which
//! actions those roles may perform.

mod permissions;
mod resolver;

pub use permissions::{Action, authorize, can};
pub use resolver::{ResolutionSource, RoleResolution, resolve_explicit_roles, resolve_roles};
