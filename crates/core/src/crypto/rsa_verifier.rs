//! RSA signature verification for secure QR containers

use crate::error::{AadharError, Result};
use rsa::{Pkcs1v15Sign, RsaPublicKey};
use sha2::{Digest, Sha256};

/// Size of the trailing signature block (2048-bit RSA)
pub const SIGNATURE_LEN: usize = 256;

/// Verify the signature over a container's XML block
///
/// # Arguments
/// * `signed_data` - the XML block exactly as it appears in the container
/// * `signature` - the trailing signature block
/// * `public_key` - UIDAI signing key supplied by the caller
///
/// The digest covers `signed_data` only; header and photo bytes are not signed.
pub fn verify_signature(
    signed_data: &[u8],
    signature: &[u8],
    public_key: &RsaPublicKey,
) -> Result<()> {
    log::debug!(
        "Verifying container signature: {} signed bytes, {} signature bytes",
        signed_data.len(),
        signature.len()
    );

    if signature.len() != SIGNATURE_LEN {
        return Err(AadharError::SignatureInvalid(format!(
            "expected {} byte signature, found {}",
            SIGNATURE_LEN,
            signature.len()
        )));
    }

    let hash = Sha256::digest(signed_data);
    log::debug!("Signed block hash (SHA256): {}", hex::encode(hash));

    match verify_pkcs1v15(public_key, &hash, signature) {
        Ok(()) => {
            log::info!("✓ Container signature verified");
            Ok(())
        }
        Err(e) => {
            log::warn!("✗ Container signature verification failed: {}", e);
            Err(e)
        }
    }
}

/// Verify RSA signature using PKCS#1 v1.5 padding scheme
fn verify_pkcs1v15(public_key: &RsaPublicKey, hash: &[u8], signature: &[u8]) -> Result<()> {
    let padding = Pkcs1v15Sign::new::<Sha256>();

    public_key
        .verify(padding, hash, signature)
        .map_err(|e| AadharError::SignatureInvalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsa::pkcs8::DecodePrivateKey;
    use rsa::RsaPrivateKey;

    fn signing_key() -> RsaPrivateKey {
        let pem = std::fs::read_to_string("../../tests/fixtures/test_signing_key.pem").unwrap();
        RsaPrivateKey::from_pkcs8_pem(&pem).unwrap()
    }

    fn sign(key: &RsaPrivateKey, data: &[u8]) -> Vec<u8> {
        key.sign(Pkcs1v15Sign::new::<Sha256>(), &Sha256::digest(data))
            .unwrap()
    }

    #[test]
    fn test_valid_signature() {
        let key = signing_key();
        let data = b"<OfflinePaperlessKyc referenceId=\"1\"/>";
        let signature = sign(&key, data);

        assert!(verify_signature(data, &signature, &key.to_public_key()).is_ok());
    }

    #[test]
    fn test_every_signature_bit_matters() {
        let key = signing_key();
        let public_key = key.to_public_key();
        let data = b"signed block";
        let signature = sign(&key, data);

        for byte in [0, 1, 127, 200, SIGNATURE_LEN - 1] {
            for bit in 0..8 {
                let mut tampered = signature.clone();
                tampered[byte] ^= 1 << bit;
                let result = verify_signature(data, &tampered, &public_key);
                assert!(
                    matches!(result, Err(AadharError::SignatureInvalid(_))),
                    "flip of byte {} bit {} was accepted",
                    byte,
                    bit
                );
            }
        }
    }

    #[test]
    fn test_tampered_data() {
        let key = signing_key();
        let signature = sign(&key, b"name=Asha");
        let result = verify_signature(b"name=Usha", &signature, &key.to_public_key());
        assert!(matches!(result, Err(AadharError::SignatureInvalid(_))));
    }

    #[test]
    fn test_wrong_length_signature() {
        let key = signing_key();
        let result = verify_signature(b"data", &[0u8; 128], &key.to_public_key());
        assert!(matches!(result, Err(AadharError::SignatureInvalid(_))));
    }
}
