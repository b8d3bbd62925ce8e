//! Format B: gzip text block with 0xFF-separated fields
//!
//! Fields are mapped by their position in UIDAI's published layout. Positions
//! not listed in [`index`] are reserved and skipped. The 19th field (masked
//! email) is optional.

use super::gzip::inflate_decimal;
use super::non_empty;
use crate::config::DEFAULT_MAX_DECOMPRESSED_SIZE;
use crate::error::{AadharError, Result};
use crate::record::IdentityRecord;
use crate::xml::AddressInfo;
use serde::Serialize;

/// Minimum number of 0xFF-separated fields
pub const FORMAT_B_MIN_FIELDS: usize = 18;

const DELIMITER: u8 = 0xFF;

/// Field positions in the format B layout
pub mod index {
    pub const VERSION: usize = 0;
    pub const REFERENCE_ID: usize = 2;
    pub const NAME: usize = 3;
    pub const DOB: usize = 4;
    pub const GENDER: usize = 5;
    pub const CARE_OF: usize = 6;
    pub const DISTRICT: usize = 7;
    pub const POST_OFFICE: usize = 9;
    pub const PINCODE: usize = 11;
    pub const VTC: usize = 12;
    pub const STATE: usize = 13;
    pub const SUB_DISTRICT: usize = 14;
    pub const LOCATION: usize = 16;
    pub const MASKED_MOBILE: usize = 17;
    /// Optional trailing field
    pub const MASKED_EMAIL: usize = 18;
}

/// Fields of a format B block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatBFields {
    pub version: String,
    pub reference_id: String,
    pub name: String,
    pub dob: String,
    pub gender: String,
    pub care_of: String,
    pub district: String,
    pub post_office: String,
    pub pincode: String,
    pub vtc: String,
    pub state: String,
    pub sub_district: String,
    pub location: String,
    pub masked_mobile: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masked_email: Option<String>,
    /// Whole decompressed block
    pub raw_text: String,
}

/// Decode a decimal-digit payload as format B.
pub fn parse_format_b(payload: &[u8]) -> Result<FormatBFields> {
    let block = inflate_decimal(payload, DEFAULT_MAX_DECOMPRESSED_SIZE)?;
    split_format_b(&block)
}

/// Map an already-decompressed block onto the format B fields.
pub fn split_format_b(block: &[u8]) -> Result<FormatBFields> {
    let parts: Vec<&[u8]> = block.split(|&b| b == DELIMITER).collect();

    if parts.len() < FORMAT_B_MIN_FIELDS {
        return Err(AadharError::InsufficientFields {
            expected: FORMAT_B_MIN_FIELDS,
            found: parts.len(),
        });
    }

    let get = |idx| field(&parts, idx);

    Ok(FormatBFields {
        version: get(index::VERSION),
        reference_id: get(index::REFERENCE_ID),
        name: get(index::NAME),
        dob: get(index::DOB),
        gender: get(index::GENDER),
        care_of: get(index::CARE_OF),
        district: get(index::DISTRICT),
        post_office: get(index::POST_OFFICE),
        pincode: get(index::PINCODE),
        vtc: get(index::VTC),
        state: get(index::STATE),
        sub_district: get(index::SUB_DISTRICT),
        location: get(index::LOCATION),
        masked_mobile: get(index::MASKED_MOBILE),
        masked_email: (parts.len() > index::MASKED_EMAIL).then(|| get(index::MASKED_EMAIL)),
        raw_text: String::from_utf8_lossy(block).into_owned(),
    })
}

/// Field at `idx`, or an empty string when the block is shorter.
fn field(parts: &[&[u8]], idx: usize) -> String {
    parts
        .get(idx)
        .map(|part| String::from_utf8_lossy(part).into_owned())
        .unwrap_or_default()
}

impl From<FormatBFields> for IdentityRecord {
    fn from(fields: FormatBFields) -> Self {
        let address = AddressInfo {
            care_of: non_empty(fields.care_of),
            vtc: non_empty(fields.vtc),
            subdist: non_empty(fields.sub_district),
            district: non_empty(fields.district),
            state: non_empty(fields.state),
            pincode: non_empty(fields.pincode),
            post_office: non_empty(fields.post_office),
            location: non_empty(fields.location),
            ..AddressInfo::default()
        };

        IdentityRecord {
            reference_id: fields.reference_id,
            name: fields.name,
            dob: fields.dob,
            gender: fields.gender,
            address,
            full_address: None,
            mobile: non_empty(fields.masked_mobile),
            email: fields.masked_email.and_then(non_empty),
            photo: None,
            version: non_empty(fields.version),
            signature_verified: false,
            raw: fields.raw_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Field `i` holds `f<i>`, joined by 0xFF
    fn block(count: usize) -> Vec<u8> {
        let fields: Vec<Vec<u8>> = (0..count).map(|i| format!("f{}", i).into_bytes()).collect();
        fields.join(&DELIMITER)
    }

    #[test]
    fn test_seventeen_fields_rejected() {
        assert!(matches!(
            split_format_b(&block(17)),
            Err(AadharError::InsufficientFields {
                expected: 18,
                found: 17
            })
        ));
    }

    #[test]
    fn test_exactly_eighteen_fields() {
        let fields = split_format_b(&block(18)).unwrap();
        assert_eq!(fields.version, "f0");
        assert_eq!(fields.reference_id, "f2");
        assert_eq!(fields.name, "f3");
        assert_eq!(fields.dob, "f4");
        assert_eq!(fields.gender, "f5");
        assert_eq!(fields.care_of, "f6");
        assert_eq!(fields.district, "f7");
        assert_eq!(fields.post_office, "f9");
        assert_eq!(fields.pincode, "f11");
        assert_eq!(fields.vtc, "f12");
        assert_eq!(fields.state, "f13");
        assert_eq!(fields.sub_district, "f14");
        assert_eq!(fields.location, "f16");
        assert_eq!(fields.masked_mobile, "f17");
        assert_eq!(fields.masked_email, None);
    }

    #[test]
    fn test_nineteenth_field_is_masked_email() {
        let fields = split_format_b(&block(19)).unwrap();
        assert_eq!(fields.masked_mobile, "f17");
        assert_eq!(fields.masked_email.as_deref(), Some("f18"));
    }

    #[test]
    fn test_fields_past_nineteen_ignored() {
        let fields = split_format_b(&block(25)).unwrap();
        assert_eq!(fields.masked_email.as_deref(), Some("f18"));
        assert!(!fields.raw_text.is_empty());
    }

    #[test]
    fn test_reserved_positions_not_mapped() {
        let fields = split_format_b(&block(19)).unwrap();
        let json = serde_json::to_string(&fields).unwrap();
        for reserved in ["\"f1\"", "\"f8\"", "\"f10\"", "\"f15\""] {
            assert!(!json.contains(reserved), "{} leaked into {}", reserved, json);
        }
    }

    #[test]
    fn test_out_of_range_field_is_empty() {
        let parts: Vec<&[u8]> = vec![&b"a"[..], &b"b"[..]];
        assert_eq!(field(&parts, 1), "b");
        assert_eq!(field(&parts, 2), "");
        assert_eq!(field(&parts, index::MASKED_EMAIL), "");
    }

    #[test]
    fn test_empty_fields_preserved() {
        let mut fields: Vec<Vec<u8>> = (0..18).map(|i| format!("f{}", i).into_bytes()).collect();
        fields[index::NAME].clear();
        let raw = fields.join(&DELIMITER);

        let parsed = split_format_b(&raw).unwrap();
        assert_eq!(parsed.name, "");
        assert_eq!(parsed.dob, "f4");
    }

    #[test]
    fn test_into_record() {
        let fields = split_format_b(&block(18)).unwrap();
        let record = IdentityRecord::from(fields);
        assert!(!record.signature_verified);
        assert_eq!(record.version.as_deref(), Some("f0"));
        assert_eq!(record.address.location.as_deref(), Some("f16"));
        assert_eq!(record.address.post_office.as_deref(), Some("f9"));
        assert_eq!(record.mobile.as_deref(), Some("f17"));
        assert_eq!(record.email, None);
        assert!(record.address.house.is_none());
    }
}
