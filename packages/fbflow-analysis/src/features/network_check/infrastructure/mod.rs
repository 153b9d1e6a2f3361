mod checker;

pub use checker::NetworkChecker;
