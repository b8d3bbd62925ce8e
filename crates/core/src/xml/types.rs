//! Attribute data carried by the secure container's embedded XML block

use serde::{Deserialize, Serialize};

/// Attributes extracted from an `OfflinePaperlessKyc` document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KycAttributes {
    /// Reference ID (last 4 digits of Aadhar + timestamp)
    pub reference_id: String,

    /// Full name
    pub name: String,

    /// Date of birth, as written by UIDAI (usually DD-MM-YYYY)
    pub dob: String,

    /// Gender: M/F/T
    pub gender: String,

    /// Mobile number or its hash
    pub mobile: Option<String>,

    /// Email or its hash
    pub email: Option<String>,

    /// Address information (Proof of Address - POA)
    pub address: AddressInfo,
}

/// Address information (Proof of Address - POA)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressInfo {
    /// Care of
    #[serde(skip_serializing_if = "Option::is_none")]
    pub care_of: Option<String>,

    /// Building/House
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house: Option<String>,

    /// Street
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,

    /// Landmark
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,

    /// Locality
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,

    /// Village/Town/City
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vtc: Option<String>,

    /// Sub-district
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdist: Option<String>,

    /// District
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,

    /// State
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// PIN code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,

    /// Post office
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_office: Option<String>,

    /// Free-text location line (format B only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl AddressInfo {
    /// Get the full address as a human-readable string, skipping empty parts
    pub fn full_address(&self) -> String {
        [
            &self.house,
            &self.street,
            &self.locality,
            &self.vtc,
            &self.district,
            &self.state,
            &self.pincode,
        ]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }

    /// Address line in the layout produced for secure containers.
    ///
    /// Always ten fields joined by single spaces; a missing field still
    /// contributes its separator, so the output can have runs of spaces.
    pub fn container_address(&self) -> String {
        [
            &self.care_of,
            &self.house,
            &self.street,
            &self.landmark,
            &self.locality,
            &self.subdist,
            &self.district,
            &self.state,
            &self.pincode,
            &self.vtc,
        ]
        .into_iter()
        .map(|part| part.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Get city (VTC - Village/Town/City)
    pub fn city(&self) -> Option<&str> {
        self.vtc.as_deref()
    }
}
