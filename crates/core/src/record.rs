//! Format-agnostic output of a successful decode

use crate::xml::AddressInfo;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;

/// Identity data extracted from any of the supported QR formats.
///
/// Built once per successful parse and handed to the caller as-is. Fields a
/// format does not carry are left empty or `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityRecord {
    /// Reference ID or UID hash
    pub reference_id: String,

    /// Full name
    pub name: String,

    /// Date of birth as encoded in the payload
    pub dob: String,

    /// Gender: M/F/T
    pub gender: String,

    /// Address components, including care-of
    pub address: AddressInfo,

    /// Synthesized address line (secure containers only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_address: Option<String>,

    /// Mobile number: a hash (format A, some containers) or a masked value (format B)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,

    /// Email: a hash (format A, some containers) or a masked value (format B)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Photograph, base64 encoded (secure containers only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,

    /// Payload-declared layout version (format B only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// True only when the data came from a container whose signature checked out
    pub signature_verified: bool,

    /// Decoded XML or text block, verbatim
    pub raw: String,
}

impl IdentityRecord {
    /// Parse the date of birth.
    ///
    /// UIDAI mostly writes `DD-MM-YYYY`; `DD/MM/YYYY` and ISO dates also occur.
    pub fn date_of_birth(&self) -> Option<NaiveDate> {
        let dob = self.dob.trim();
        ["%d-%m-%Y", "%d/%m/%Y", "%Y-%m-%d"]
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(dob, fmt).ok())
    }

    /// Age in completed years on the given date
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        let dob = self.date_of_birth()?;
        if today < dob {
            return None;
        }

        let mut age = today.year() - dob.year();

        // Adjust if birthday hasn't occurred yet this year
        if today.month() < dob.month() || (today.month() == dob.month() && today.day() < dob.day())
        {
            age -= 1;
        }

        u32::try_from(age).ok()
    }

    /// Calculate age as of today
    pub fn age(&self) -> Option<u32> {
        self.age_on(chrono::Local::now().date_naive())
    }

    /// Check if person is at least `threshold` years old on the given date
    pub fn is_above_age(&self, threshold: u32, today: NaiveDate) -> Option<bool> {
        self.age_on(today).map(|age| age >= threshold)
    }
}

/// Which wire format a payload was recognized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QrFormat {
    SecureContainer,
    FormatA,
    FormatB,
    Legacy,
}

impl QrFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            QrFormat::SecureContainer => "secure_container",
            QrFormat::FormatA => "format_a",
            QrFormat::FormatB => "format_b",
            QrFormat::Legacy => "legacy",
        }
    }
}

impl fmt::Display for QrFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tagged result of [`crate::decode`].
///
/// Serializes as `{"type": "<tag>", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum DecodedQr {
    SecureContainer(IdentityRecord),
    FormatA(IdentityRecord),
    FormatB(IdentityRecord),
    /// Pre-2018 plain-text QR, returned without interpretation
    Legacy { raw_text: String },
}

impl DecodedQr {
    pub fn format(&self) -> QrFormat {
        match self {
            DecodedQr::SecureContainer(_) => QrFormat::SecureContainer,
            DecodedQr::FormatA(_) => QrFormat::FormatA,
            DecodedQr::FormatB(_) => QrFormat::FormatB,
            DecodedQr::Legacy { .. } => QrFormat::Legacy,
        }
    }

    /// The parsed record, unless the payload was legacy text
    pub fn record(&self) -> Option<&IdentityRecord> {
        match self {
            DecodedQr::SecureContainer(record)
            | DecodedQr::FormatA(record)
            | DecodedQr::FormatB(record) => Some(record),
            DecodedQr::Legacy { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_dob(dob: &str) -> IdentityRecord {
        IdentityRecord {
            reference_id: "1234".to_string(),
            name: "Test".to_string(),
            dob: dob.to_string(),
            gender: "M".to_string(),
            address: AddressInfo::default(),
            full_address: None,
            mobile: None,
            email: None,
            photo: None,
            version: None,
            signature_verified: false,
            raw: String::new(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_dob_formats() {
        assert_eq!(record_with_dob("01-02-1990").date_of_birth(), Some(date(1990, 2, 1)));
        assert_eq!(record_with_dob("01/02/1990").date_of_birth(), Some(date(1990, 2, 1)));
        assert_eq!(record_with_dob("1990-02-01").date_of_birth(), Some(date(1990, 2, 1)));
        assert_eq!(record_with_dob("1990").date_of_birth(), None);
        assert_eq!(record_with_dob("").date_of_birth(), None);
    }

    #[test]
    fn test_age_on_birthday_boundary() {
        let record = record_with_dob("15-08-2000");
        assert_eq!(record.age_on(date(2018, 8, 14)), Some(17));
        assert_eq!(record.age_on(date(2018, 8, 15)), Some(18));
        assert_eq!(record.age_on(date(1999, 1, 1)), None);
    }

    #[test]
    fn test_is_above_age() {
        let record = record_with_dob("01-01-2000");
        let today = date(2026, 10, 18);
        assert_eq!(record.is_above_age(18, today), Some(true));
        assert_eq!(record.is_above_age(100, today), Some(false));
        assert_eq!(record_with_dob("unknown").is_above_age(18, today), None);
    }

    #[test]
    fn test_tagged_serialization() {
        let decoded = DecodedQr::Legacy {
            raw_text: "hello".to_string(),
        };
        let json = serde_json::to_value(&decoded).unwrap();
        assert_eq!(json["type"], "legacy");
        assert_eq!(json["data"]["raw_text"], "hello");

        let decoded = DecodedQr::FormatA(record_with_dob("01-01-2000"));
        let json = serde_json::to_value(&decoded).unwrap();
        assert_eq!(json["type"], "format_a");
        assert_eq!(json["data"]["name"], "Test");
        assert!(json["data"].get("photo").is_none());
    }

    #[test]
    fn test_format_tags() {
        let legacy = DecodedQr::Legacy {
            raw_text: String::new(),
        };
        assert_eq!(legacy.format(), QrFormat::Legacy);
        assert!(legacy.record().is_none());

        let secure = DecodedQr::SecureContainer(record_with_dob(""));
        assert_eq!(secure.format().to_string(), "secure_container");
        assert!(secure.record().is_some());
    }
}
