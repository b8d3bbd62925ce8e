//! Attribute parsing for the XML block of a secure container

pub mod parser;
pub mod types;

pub use parser::parse_kyc_attributes;
pub use types::*;
