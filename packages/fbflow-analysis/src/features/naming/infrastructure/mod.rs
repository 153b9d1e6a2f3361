mod validator;

pub use validator::{NamingOptions, NamingValidator};
