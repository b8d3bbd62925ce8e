//! Cheap classification of a raw QR payload
//!
//! The dispatcher uses this to decide which parser family to try. Nothing here
//! inspects the payload beyond its bytes being digits, so it never fails.

use serde::Serialize;

/// Digit/length summary of a payload, computed fresh for every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PayloadClass {
    /// Every byte is an ASCII decimal digit. Vacuously true for empty input.
    pub all_decimal: bool,
    /// Payload length in bytes
    pub length: usize,
}

/// Classify a payload by digit content and length.
pub fn classify(payload: &[u8]) -> PayloadClass {
    PayloadClass {
        all_decimal: is_decimal(payload),
        length: payload.len(),
    }
}

/// True when every byte is `'0'..='9'`.
pub(crate) fn is_decimal(payload: &[u8]) -> bool {
    payload.iter().all(u8::is_ascii_digit)
}
