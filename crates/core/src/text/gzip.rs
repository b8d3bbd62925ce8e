//! Decimal digit string → big integer → gzip stream → plaintext
//!
//! UIDAI's text formats are gzip streams that the producer pushed through a
//! big-integer conversion and then printed in base 10, so the QR can use the
//! dense numeric encoding mode. Reversing that gives back the gzip stream,
//! minus any leading zero bytes: an integer has no leading zeros, so a stream
//! starting with `0x00` cannot be reconstructed exactly. Gzip streams start
//! with `1f 8b`, so real payloads are unaffected.

use crate::classify::is_decimal;
use crate::error::{AadharError, Result};
use flate2::read::MultiGzDecoder;
use num_bigint_dig::BigUint;
use std::io::Read;

/// gzip magic bytes (RFC 1952).
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[inline]
pub fn is_gzip_magic(header: &[u8]) -> bool {
    header.len() >= 2 && header[0] == GZIP_MAGIC[0] && header[1] == GZIP_MAGIC[1]
}

/// Interpret an ASCII decimal string as an unsigned integer and return its
/// minimal big-endian byte representation.
pub fn decimal_to_bytes(payload: &[u8]) -> Result<Vec<u8>> {
    if payload.is_empty() || !is_decimal(payload) {
        return Err(AadharError::NotDecimal);
    }

    let value = BigUint::parse_bytes(payload, 10).ok_or(AadharError::NotDecimal)?;
    Ok(value.to_bytes_be())
}

/// Expand a decimal-encoded gzip payload into its plaintext block.
///
/// `max_size` bounds the inflated output; anything larger is rejected rather
/// than buffered.
pub fn inflate_decimal(payload: &[u8], max_size: u64) -> Result<Vec<u8>> {
    let compressed = decimal_to_bytes(payload)?;
    log::debug!(
        "Decimal payload {} digits -> {} compressed bytes",
        payload.len(),
        compressed.len()
    );

    if !is_gzip_magic(&compressed) {
        return Err(AadharError::NotGzip);
    }

    let mut limited = MultiGzDecoder::new(compressed.as_slice()).take(max_size.saturating_add(1));
    let mut plain = Vec::new();
    limited
        .read_to_end(&mut plain)
        .map_err(|e| AadharError::DecompressionFailed(format!("gunzip error: {}", e)))?;

    if plain.len() as u64 > max_size {
        return Err(AadharError::DecompressionFailed(format!(
            "inflated block exceeds maximum size of {} bytes",
            max_size
        )));
    }

    log::debug!("Inflated text block: {} bytes", plain.len());
    Ok(plain)
}
