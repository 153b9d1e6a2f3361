//! FBNetwork connection checking
//!
//! Structural validation of declared networks: every endpoint must resolve
//! to a declared instance port or the composite's own interface, event wires
//! must join event ports, and data wires are checked against the IEC 61131-3
//! type compatibility matrix (widening allowed, narrowing flagged).

pub mod domain;
pub mod infrastructure;

pub use domain::{compatibility, Endpoint, TypeCompat};
pub use infrastructure::NetworkChecker;
