mod discovery;
mod xml_parser;

pub use discovery::{find_artifact_files, parse_application};
pub use xml_parser::parse_artifact;
