//! Format detection and dispatch
//!
//! Candidates are tried in priority order and the first success wins:
//!
//! 1. signed binary container (structure and signature must both pass)
//! 2. for long all-digit payloads: format B, then format A; if neither fits
//!    the payload is rejected outright
//! 3. short payloads: legacy plain text, returned untouched
//! 4. anything else: rejected

use crate::classify::classify;
use crate::config::DecodeConfig;
use crate::container::parse_secure_container;
use crate::error::{AadharError, Result};
use crate::record::{DecodedQr, QrFormat};
use crate::text::{inflate_decimal, split_format_a, split_format_b};
use rsa::RsaPublicKey;

type TextCandidate = (QrFormat, fn(&[u8]) -> Result<DecodedQr>);

/// Compressed text formats, in the order they are tried
const SECURE_TEXT_CANDIDATES: [TextCandidate; 2] = [
    (QrFormat::FormatB, |block| {
        split_format_b(block).map(|fields| DecodedQr::FormatB(fields.into()))
    }),
    (QrFormat::FormatA, |block| {
        split_format_a(block).map(|fields| DecodedQr::FormatA(fields.into()))
    }),
];

/// Decode a QR payload with the default [`DecodeConfig`].
pub fn decode(payload: &[u8], public_key: &RsaPublicKey) -> Result<DecodedQr> {
    decode_with_config(payload, public_key, &DecodeConfig::default())
}

/// Decode a QR payload, recognizing its format.
///
/// Returns either a fully parsed (and, for containers, verified) record with
/// its format tag, or a single terminal error. Per-format failures are only
/// logged.
pub fn decode_with_config(
    payload: &[u8],
    public_key: &RsaPublicKey,
    config: &DecodeConfig,
) -> Result<DecodedQr> {
    if payload.is_empty() {
        return Err(AadharError::EmptyPayload);
    }
    log::info!("Decoding QR payload, size: {} bytes", payload.len());

    let container_err = match parse_secure_container(payload, public_key) {
        Ok(record) => return Ok(DecodedQr::SecureContainer(record)),
        Err(e) => {
            log::debug!("Not a secure container: {}", e);
            e
        }
    };

    let class = classify(payload);
    let threshold = config.secure_text_threshold;
    log::debug!(
        "Payload numeric: {}, length: {} (threshold {})",
        class.all_decimal,
        class.length,
        threshold
    );

    if class.all_decimal && class.length > threshold {
        return decode_secure_text(payload, config);
    }

    // A well-formed container that failed verification is untrusted, not legacy text
    if let AadharError::SignatureInvalid(reason) = &container_err {
        log::warn!("Rejecting secure container with invalid signature: {}", reason);
        return Err(AadharError::UnrecognizedFormat);
    }

    if class.length < threshold {
        log::info!("Treating payload as legacy plain text");
        return Ok(DecodedQr::Legacy {
            raw_text: String::from_utf8_lossy(payload).into_owned(),
        });
    }

    log::warn!("Unrecognized QR payload ({} bytes)", class.length);
    Err(AadharError::UnrecognizedFormat)
}

fn decode_secure_text(payload: &[u8], config: &DecodeConfig) -> Result<DecodedQr> {
    let block = inflate_decimal(payload, config.max_decompressed_size).map_err(|e| {
        log::warn!("Numeric payload is not a compressed text block: {}", e);
        AadharError::UnrecognizedSecureText
    })?;

    for (format, parse) in SECURE_TEXT_CANDIDATES {
        match parse(&block) {
            Ok(decoded) => {
                log::info!("Decoded payload as {}", format);
                return Ok(decoded);
            }
            Err(e) => log::debug!("Not {}: {}", format, e),
        }
    }

    log::warn!("Compressed text block matched no known layout");
    Err(AadharError::UnrecognizedSecureText)
}
