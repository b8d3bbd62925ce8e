//! Signed binary secure-QR container
//!
//! Layout, all integers little-endian:
//!
//! ```text
//! [u16 version][u16 format][u32 xml_len][xml][u32 photo_len][photo] ... [signature: last 256 bytes]
//! ```
//!
//! The signature is always the final 256 bytes of the whole payload, wherever
//! the length-prefixed blocks happen to end. Bytes between the photo and the
//! signature are ignored, and the photo block may even run into the signature
//! region; both layouts occur in the wild and must keep verifying.

use crate::crypto::rsa_verifier::{verify_signature, SIGNATURE_LEN};
use crate::error::{AadharError, Result};
use crate::record::IdentityRecord;
use crate::xml::{parse_kyc_attributes, KycAttributes};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use byteorder::{LittleEndian, ReadBytesExt};
use rsa::RsaPublicKey;

/// Smallest payload that can hold a header, both length prefixes and a signature
pub const MIN_CONTAINER_LEN: usize = 2 + 2 + 4 + 4 + SIGNATURE_LEN;

/// Header versions issued by UIDAI
pub const KNOWN_VERSIONS: [u16; 2] = [1, 2];

/// Structural view of a secure container, borrowing from the payload.
///
/// Nothing here is trusted until [`parse_secure_container`] has checked the
/// signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecureContainer<'a> {
    pub version: u16,
    pub format: u16,
    pub xml: &'a [u8],
    pub photo: &'a [u8],
    pub signature: &'a [u8],
    /// Bytes covered by the header and the two length-prefixed blocks
    pub body_len: usize,
    /// Total payload length
    pub payload_len: usize,
}

impl<'a> SecureContainer<'a> {
    /// Parse the container layout without verifying anything.
    pub fn parse(payload: &'a [u8]) -> Result<Self> {
        if payload.len() < MIN_CONTAINER_LEN {
            return Err(AadharError::TruncatedPayload {
                context: "secure container",
                needed: MIN_CONTAINER_LEN,
                found: payload.len(),
            });
        }

        let mut reader = payload;

        let version = read_u16(&mut reader, "header version")?;
        let format = read_u16(&mut reader, "header format")?;
        if !KNOWN_VERSIONS.contains(&version) {
            return Err(AadharError::MalformedHeader(format!(
                "unknown version {}",
                version
            )));
        }

        let xml_len = read_u32(&mut reader, "xml length")?;
        let xml = take_block(&mut reader, xml_len, "xml", false)?;

        let photo_len = read_u32(&mut reader, "photo length")?;
        let photo = take_block(&mut reader, photo_len, "photo", true)?;

        let body_len = payload.len() - reader.len();
        let signature = &payload[payload.len() - SIGNATURE_LEN..];

        log::debug!(
            "Secure container v{} format {}: xml {} bytes, photo {} bytes, body {} of {} bytes",
            version,
            format,
            xml.len(),
            photo.len(),
            body_len,
            payload.len()
        );

        Ok(Self {
            version,
            format,
            xml,
            photo,
            signature,
            body_len,
            payload_len: payload.len(),
        })
    }

    /// Offset of the signature block within the payload
    pub fn signature_offset(&self) -> usize {
        self.payload_len - SIGNATURE_LEN
    }

    /// Unread bytes between the photo block and the signature.
    ///
    /// Negative when the photo block overlaps the signature region.
    pub fn gap(&self) -> isize {
        self.signature_offset() as isize - self.body_len as isize
    }

    fn into_record(self, attrs: KycAttributes) -> IdentityRecord {
        let full_address = attrs.address.container_address();
        let photo = (!self.photo.is_empty()).then(|| BASE64.encode(self.photo));

        IdentityRecord {
            reference_id: attrs.reference_id,
            name: attrs.name,
            dob: attrs.dob,
            gender: attrs.gender,
            address: attrs.address,
            full_address: Some(full_address),
            mobile: attrs.mobile,
            email: attrs.email,
            photo,
            version: None,
            signature_verified: true,
            raw: String::from_utf8_lossy(self.xml).into_owned(),
        }
    }
}

/// Parse and verify a secure container.
///
/// The XML block is only interpreted after its signature has been verified
/// with `public_key`; a bad signature yields no data at all.
pub fn parse_secure_container(payload: &[u8], public_key: &RsaPublicKey) -> Result<IdentityRecord> {
    let container = SecureContainer::parse(payload)?;

    verify_signature(container.xml, container.signature, public_key)?;

    let attrs = parse_kyc_attributes(container.xml)?;
    log::info!("Secure container decoded, reference: {}", attrs.reference_id);

    Ok(container.into_record(attrs))
}

fn read_u16(reader: &mut &[u8], context: &'static str) -> Result<u16> {
    let found = reader.len();
    reader
        .read_u16::<LittleEndian>()
        .map_err(|_| AadharError::TruncatedPayload {
            context,
            needed: 2,
            found,
        })
}

fn read_u32(reader: &mut &[u8], context: &'static str) -> Result<u32> {
    let found = reader.len();
    reader
        .read_u32::<LittleEndian>()
        .map_err(|_| AadharError::TruncatedPayload {
            context,
            needed: 4,
            found,
        })
}

/// Split a length-prefixed block off the front of `reader`.
fn take_block<'a>(
    reader: &mut &'a [u8],
    len: u32,
    field: &'static str,
    allow_empty: bool,
) -> Result<&'a [u8]> {
    let remaining = reader.len();
    let out_of_bounds = AadharError::LengthOutOfBounds {
        field,
        length: u64::from(len),
        remaining: remaining as u64,
    };

    if len == 0 && !allow_empty {
        return Err(out_of_bounds);
    }
    let len = match usize::try_from(len) {
        Ok(len) if len <= remaining => len,
        _ => return Err(out_of_bounds),
    };

    let (block, rest) = reader.split_at(len);
    *reader = rest;
    Ok(block)
}
