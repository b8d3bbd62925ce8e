//! Tunable limits for the decode pipeline

use serde::{Deserialize, Serialize};

/// Payload length that separates compressed secure text from legacy plain text.
pub const DEFAULT_SECURE_TEXT_THRESHOLD: usize = 500;

/// Real offline-KYC text blocks are well under 4 KB; allow up to 1 MB inflated.
pub const DEFAULT_MAX_DECOMPRESSED_SIZE: u64 = 1024 * 1024;

/// Dispatcher configuration.
///
/// Both values are heuristics rather than protocol guarantees, which is why
/// they live here instead of being hard-coded into the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// All-digit payloads strictly longer than this are tried as compressed
    /// secure text; payloads strictly shorter are returned as legacy text.
    pub secure_text_threshold: usize,

    /// Upper bound on the size of an inflated text block
    pub max_decompressed_size: u64,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            secure_text_threshold: DEFAULT_SECURE_TEXT_THRESHOLD,
            max_decompressed_size: DEFAULT_MAX_DECOMPRESSED_SIZE,
        }
    }
}
