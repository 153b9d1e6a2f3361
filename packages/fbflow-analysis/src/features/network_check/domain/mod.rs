//! Connection endpoints and the elementary type compatibility matrix

/// A connection endpoint reference
///
/// `Instance` is the `inst.PORT` form; `Interface` a bare port name on the
/// enclosing composite's own boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint<'a> {
    Instance { instance: &'a str, port: &'a str },
    Interface { port: &'a str },
}

impl<'a> Endpoint<'a> {
    pub fn parse(reference: &'a str) -> Self {
        match reference.split_once('.') {
            Some((instance, port)) => Self::Instance { instance, port },
            None => Self::Interface { port: reference },
        }
    }

    pub fn port(&self) -> &'a str {
        match self {
            Self::Instance { port, .. } => port,
            Self::Interface { port } => port,
        }
    }
}

/// Verdict for one data connection's source/destination type pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCompat {
    Exact,
    /// Lossless conversion (e.g. INT -> DINT)
    Widening,
    /// Lossy conversion the runtime will perform anyway
    Narrowing,
    /// One side is not an elementary type we know
    Unknown,
    Incompatible,
}

const ELEMENTARY: [&str; 12] = [
    "BOOL", "BYTE", "WORD", "DWORD", "SINT", "INT", "DINT", "LINT", "REAL", "LREAL", "STRING",
    "TIME",
];

/// Lossless widenings, source -> allowed destinations
const WIDENINGS: [(&str, &[&str]); 5] = [
    ("INT", &["DINT", "REAL", "LREAL"]),
    ("DINT", &["REAL", "LREAL"]),
    ("REAL", &["LREAL"]),
    ("BYTE", &["WORD", "DWORD"]),
    ("WORD", &["DWORD"]),
];

fn widens(source: &str, destination: &str) -> bool {
    WIDENINGS
        .iter()
        .any(|(from, to)| *from == source && to.contains(&destination))
}

/// Classify a source type flowing into a destination type
pub fn compatibility(source: &str, destination: &str) -> TypeCompat {
    let source = source.to_ascii_uppercase();
    let destination = destination.to_ascii_uppercase();

    if source == destination {
        return TypeCompat::Exact;
    }
    if !ELEMENTARY.contains(&source.as_str()) || !ELEMENTARY.contains(&destination.as_str()) {
        return TypeCompat::Unknown;
    }
    if widens(&source, &destination) {
        return TypeCompat::Widening;
    }
    if widens(&destination, &source) {
        return TypeCompat::Narrowing;
    }
    TypeCompat::Incompatible
}
