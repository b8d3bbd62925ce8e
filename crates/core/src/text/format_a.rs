//! Format A: gzip text block with newline-separated fields
//!
//! The older compressed layout. Six positional fields, no signature, so
//! callers should treat its output as lower assurance than a verified
//! secure container.

use super::gzip::inflate_decimal;
use super::non_empty;
use crate::config::DEFAULT_MAX_DECOMPRESSED_SIZE;
use crate::error::{AadharError, Result};
use crate::record::IdentityRecord;
use crate::xml::AddressInfo;
use serde::Serialize;

/// Minimum number of newline-separated fields
pub const FORMAT_A_MIN_FIELDS: usize = 6;

const DELIMITER: u8 = b'\n';

/// Fields of a format A block, in wire order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatAFields {
    pub name: String,
    pub dob: String,
    pub gender: String,
    pub reference_id: String,
    pub mobile_hash: String,
    pub email_hash: String,
    /// Whole decompressed block
    pub raw_text: String,
}

/// Decode a decimal-digit payload as format A.
pub fn parse_format_a(payload: &[u8]) -> Result<FormatAFields> {
    let block = inflate_decimal(payload, DEFAULT_MAX_DECOMPRESSED_SIZE)?;
    split_format_a(&block)
}

/// Map an already-decompressed block onto the format A fields.
pub fn split_format_a(block: &[u8]) -> Result<FormatAFields> {
    let parts: Vec<String> = block
        .split(|&b| b == DELIMITER)
        .map(|part| String::from_utf8_lossy(part).into_owned())
        .collect();

    if parts.len() < FORMAT_A_MIN_FIELDS {
        return Err(AadharError::InsufficientFields {
            expected: FORMAT_A_MIN_FIELDS,
            found: parts.len(),
        });
    }

    let mut fields = parts.into_iter();
    let mut next = || fields.next().unwrap_or_default();

    Ok(FormatAFields {
        name: next(),
        dob: next(),
        gender: next(),
        reference_id: next(),
        mobile_hash: next(),
        email_hash: next(),
        raw_text: String::from_utf8_lossy(block).into_owned(),
    })
}

impl From<FormatAFields> for IdentityRecord {
    fn from(fields: FormatAFields) -> Self {
        IdentityRecord {
            reference_id: fields.reference_id,
            name: fields.name,
            dob: fields.dob,
            gender: fields.gender,
            address: AddressInfo::default(),
            full_address: None,
            mobile: non_empty(fields.mobile_hash),
            email: non_empty(fields.email_hash),
            photo: None,
            version: None,
            signature_verified: false,
            raw: fields.raw_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_fields_rejected() {
        let result = split_format_a(b"Name\n01-01-1990\nF\n1234\nmhash");
        assert!(matches!(
            result,
            Err(AadharError::InsufficientFields {
                expected: 6,
                found: 5
            })
        ));
    }

    #[test]
    fn test_six_fields_positional() {
        let fields = split_format_a(b"Meera Nair\n21-11-1979\nF\n8765\nmhash\nehash").unwrap();
        assert_eq!(fields.name, "Meera Nair");
        assert_eq!(fields.dob, "21-11-1979");
        assert_eq!(fields.gender, "F");
        assert_eq!(fields.reference_id, "8765");
        assert_eq!(fields.mobile_hash, "mhash");
        assert_eq!(fields.email_hash, "ehash");
    }

    #[test]
    fn test_extra_fields_ignored() {
        let block = b"A\nB\nC\nD\nE\nF\nG\nH";
        let fields = split_format_a(block).unwrap();
        assert_eq!(fields.email_hash, "F");
        assert_eq!(fields.raw_text, "A\nB\nC\nD\nE\nF\nG\nH");
    }

    #[test]
    fn test_trailing_newline_counts_as_field() {
        // Five values plus a terminating newline still split into six parts
        let fields = split_format_a(b"A\nB\nC\nD\nE\n").unwrap();
        assert_eq!(fields.mobile_hash, "E");
        assert_eq!(fields.email_hash, "");
    }

    #[test]
    fn test_into_record() {
        let fields = split_format_a(b"A\nB\nC\nD\nm\n").unwrap();
        let record = IdentityRecord::from(fields);
        assert!(!record.signature_verified);
        assert_eq!(record.reference_id, "D");
        assert_eq!(record.mobile.as_deref(), Some("m"));
        assert_eq!(record.email, None);
        assert!(record.full_address.is_none());
    }

    #[test]
    fn test_parse_rejects_non_decimal() {
        assert!(matches!(
            parse_format_a(b"Name\nDOB"),
            Err(AadharError::NotDecimal)
        ));
    }
}
