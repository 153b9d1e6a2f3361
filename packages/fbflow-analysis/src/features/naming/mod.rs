//! Naming convention validation
//!
//! Per-artifact-class rules (CAT and SubApp are PascalCase, FB types
//! camelCase, adapters IPascalCase, events SNAKE_CASE, data types carry
//! `str`/`e`/`a`/`arr` prefixes) with a suggestion generator that rebuilds
//! the offending name in the target convention. `INIT`/`INITO` are reserved
//! event names and always pass.

pub mod domain;
pub mod infrastructure;

pub use domain::{is_valid, rule_for, suggest, NameClass, NamingRule, RESERVED_EVENTS};
pub use infrastructure::{NamingOptions, NamingValidator};
