//! Compressed text QR formats
//!
//! Both formats arrive as a long decimal digit string which [`gzip`] turns
//! back into a plaintext block; they differ only in delimiter and field map.

pub mod format_a;
pub mod format_b;
pub mod gzip;

pub use format_a::{parse_format_a, split_format_a, FormatAFields};
pub use format_b::{parse_format_b, split_format_b, FormatBFields};
pub use gzip::{decimal_to_bytes, inflate_decimal};

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}
