//! Error types for the Aadhar QR core library

use thiserror::Error;

/// Result type alias for Aadhar QR operations
pub type Result<T> = std::result::Result<T, AadharError>;

/// Error types that can occur while decoding an Aadhar QR payload
#[derive(Error, Debug)]
pub enum AadharError {
    /// Payload was empty
    #[error("Empty QR payload")]
    EmptyPayload,

    /// Secure container header carried an unknown version
    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    /// A length prefix points past the end of the payload
    #[error("Length out of bounds: {field} is {length} bytes, {remaining} remaining")]
    LengthOutOfBounds {
        field: &'static str,
        length: u64,
        remaining: u64,
    },

    /// Payload ended before a fixed-size structure could be read
    #[error("Truncated payload: needed {needed} bytes for {context}, found {found}")]
    TruncatedPayload {
        context: &'static str,
        needed: usize,
        found: usize,
    },

    /// Signature verification failed
    #[error("Signature verification failed: {0}")]
    SignatureInvalid(String),

    /// Payload contains something other than ASCII decimal digits
    #[error("Payload is not a decimal digit string")]
    NotDecimal,

    /// Decimal payload did not expand to a gzip stream
    #[error("Decoded bytes are not gzip data")]
    NotGzip,

    /// Gzip stream could not be decompressed
    #[error("Decompression failed: {0}")]
    DecompressionFailed(String),

    /// Text block split into fewer fields than the format requires
    #[error("Insufficient fields: expected at least {expected}, found {found}")]
    InsufficientFields { expected: usize, found: usize },

    /// All-digit payload matched neither compressed text format
    #[error("Unrecognized secure text format")]
    UnrecognizedSecureText,

    /// Payload matched no known format
    #[error("Unrecognized Aadhar QR format")]
    UnrecognizedFormat,

    /// Error during XML parsing
    #[error("Failed to parse XML: {0}")]
    XmlParseError(String),

    /// Missing required field in XML
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Cryptographic error
    #[error("Cryptographic operation failed: {0}")]
    CryptoError(String),

    /// Invalid certificate
    #[error("Invalid certificate: {0}")]
    InvalidCertificate(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AadharError {
    /// Whether this error ends a decode request, as opposed to only ruling out
    /// one candidate format.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AadharError::EmptyPayload
                | AadharError::UnrecognizedSecureText
                | AadharError::UnrecognizedFormat
        )
    }
}

impl From<quick_xml::Error> for AadharError {
    fn from(err: quick_xml::Error) -> Self {
        AadharError::XmlParseError(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for AadharError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        AadharError::XmlParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AadharError::UnrecognizedFormat;
        assert_eq!(err.to_string(), "Unrecognized Aadhar QR format");

        let err = AadharError::InsufficientFields { expected: 18, found: 4 };
        assert_eq!(
            err.to_string(),
            "Insufficient fields: expected at least 18, found 4"
        );

        let err = AadharError::LengthOutOfBounds {
            field: "xml",
            length: 9000,
            remaining: 300,
        };
        assert!(err.to_string().contains("xml"));
        assert!(err.to_string().contains("9000"));
    }

    #[test]
    fn test_terminal_kinds() {
        assert!(AadharError::UnrecognizedFormat.is_terminal());
        assert!(AadharError::UnrecognizedSecureText.is_terminal());
        assert!(AadharError::EmptyPayload.is_terminal());

        assert!(!AadharError::NotGzip.is_terminal());
        assert!(!AadharError::SignatureInvalid("bad".into()).is_terminal());
        assert!(!AadharError::MalformedHeader("v9".into()).is_terminal());
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AadharError = io_err.into();
        assert!(matches!(err, AadharError::IoError(_)));
    }
}
