//! UIDAI public key loading

use crate::error::{AadharError, Result};
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::pkcs8::DecodePublicKey;
use rsa::{traits::PublicKeyParts, RsaPublicKey};
use std::path::Path;
use x509_parser::prelude::*;

/// Load the UIDAI signing key from a file.
///
/// See [`load_public_key_from_bytes`] for the accepted encodings.
pub fn load_public_key(path: impl AsRef<Path>) -> Result<RsaPublicKey> {
    let path = path.as_ref();
    log::info!("Loading UIDAI public key: {}", path.display());

    let bytes = std::fs::read(path)?;
    load_public_key_from_bytes(&bytes)
}

/// Parse an RSA public key from certificate or key material.
///
/// Accepts, in order: a PEM X.509 certificate (the form UIDAI publishes),
/// a PEM `PUBLIC KEY` (SPKI), a PEM `RSA PUBLIC KEY` (PKCS#1), and a DER
/// X.509 certificate.
pub fn load_public_key_from_bytes(bytes: &[u8]) -> Result<RsaPublicKey> {
    let key = match std::str::from_utf8(bytes) {
        Ok(text) if text.contains("-----BEGIN") => from_pem(text)?,
        _ => from_der_certificate(bytes)?,
    };

    log::info!(
        "Successfully loaded RSA public key, size: {} bits",
        key.size() * 8
    );
    Ok(key)
}

fn from_pem(text: &str) -> Result<RsaPublicKey> {
    if text.contains("-----BEGIN CERTIFICATE-----") {
        let (_, pem) = parse_x509_pem(text.as_bytes())
            .map_err(|e| AadharError::InvalidCertificate(format!("Failed to parse PEM: {}", e)))?;
        return from_der_certificate(&pem.contents);
    }

    RsaPublicKey::from_public_key_pem(text)
        .or_else(|_| RsaPublicKey::from_pkcs1_pem(text))
        .map_err(|e| AadharError::CryptoError(format!("Failed to parse RSA public key: {}", e)))
}

fn from_der_certificate(der: &[u8]) -> Result<RsaPublicKey> {
    let (_, cert) = X509Certificate::from_der(der).map_err(|e| {
        AadharError::InvalidCertificate(format!("Failed to parse certificate: {}", e))
    })?;

    log::debug!("Certificate subject: {}", cert.subject());
    log::debug!("Certificate issuer: {}", cert.issuer());
    log::debug!(
        "Certificate validity: {:?} to {:?}",
        cert.validity().not_before,
        cert.validity().not_after
    );
    if !cert.validity().is_valid() {
        log::warn!("Certificate is outside its validity period");
    }

    // SubjectPublicKeyInfo, including the algorithm identifier
    let spki_der = cert.public_key().raw;

    RsaPublicKey::from_public_key_der(spki_der)
        .map_err(|e| AadharError::CryptoError(format!("Failed to parse RSA public key: {}", e)))
}
