//! Aadhar QR Core Library
//!
//! This library decodes the QR codes printed on Aadhar cards and e-Aadhar
//! documents. It recognizes the signed binary secure container, the two
//! compressed text formats, and legacy plain-text codes, and verifies UIDAI
//! signatures where the format carries one.

pub mod classify;
pub mod config;
pub mod container;
pub mod crypto;
pub mod dispatch;
pub mod error;
pub mod record;
pub mod text;
pub mod xml;

pub use classify::{classify, PayloadClass};
pub use config::DecodeConfig;
pub use container::{parse_secure_container, SecureContainer};
pub use crypto::{load_public_key, load_public_key_from_bytes};
pub use dispatch::{decode, decode_with_config};
pub use error::{AadharError, Result};
pub use record::{DecodedQr, IdentityRecord, QrFormat};
pub use text::{parse_format_a, parse_format_b, FormatAFields, FormatBFields};
