//! Cryptographic operations for secure QR verification

pub mod cert;
pub mod rsa_verifier;

pub use cert::{load_public_key, load_public_key_from_bytes};
pub use rsa_verifier::{verify_signature, SIGNATURE_LEN};
