//! Relay signature verification.
//!
//! The gateway relay signs every forwarded interaction with HMAC-SHA256 over
//! `"{timestamp}.{body}"` and sends `X-Relay-Signature: t=<unix>,v1=<hex>`.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "x-relay-signature";

/// Maximum age for relayed requests (5 minutes).
const MAX_TIMESTAMP_AGE_SECS: i64 = 300;

/// Clock skew tolerance for future timestamps (60 seconds).
const MAX_FUTURE_TOLERANCE_SECS: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("missing signature header")]
    MissingHeader,

    #[error("malformed signature header")]
    Malformed,

    #[error("request too old ({0} seconds)")]
    Expired(i64),

    #[error("request timestamp in future")]
    FromFuture,

    #[error("signature mismatch")]
    Mismatch,
}

/// Parsed `X-Relay-Signature` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    pub timestamp: i64,
    pub signature: Vec<u8>,
}

impl SignatureHeader {
    /// Parses `t=<timestamp>,v1=<hex>`; unknown keys are ignored.
    pub fn parse(header: &str) -> Result<Self, SignatureError> {
        if header.trim().is_empty() {
            return Err(SignatureError::MissingHeader);
        }

        let mut timestamp = None;
        let mut signature = None;
        for part in header.split(',') {
            let (key, value) = part.split_once('=').ok_or(SignatureError::Malformed)?;
            match key.trim() {
                "t" => {
                    timestamp = Some(value.trim().parse().map_err(|_| SignatureError::Malformed)?)
                }
                "v1" => {
                    signature = Some(hex::decode(value.trim()).map_err(|_| SignatureError::Malformed)?)
                }
                _ => {}
            }
        }

        Ok(Self {
            timestamp: timestamp.ok_or(SignatureError::Malformed)?,
            signature: signature.ok_or(SignatureError::Malformed)?,
        })
    }
}

/// Verifies relay signatures with a shared secret.
#[derive(Clone)]
pub struct RelayVerifier {
    secret: SecretString,
}

impl RelayVerifier {
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Computes the hex signature for `body` at `timestamp`.
    pub fn sign(&self, timestamp: i64, body: &[u8]) -> String {
        hex::encode(self.mac(timestamp, body))
    }

    fn mac(&self, timestamp: i64, body: &[u8]) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(body);
        mac.finalize().into_bytes().to_vec()
    }

    /// Verifies `header` against `body` at time `now` (unix seconds).
    pub fn verify(&self, header: Option<&str>, body: &[u8], now: i64) -> Result<(), SignatureError> {
        let header = SignatureHeader::parse(header.ok_or(SignatureError::MissingHeader)?)?;

        let age = now - header.timestamp;
        if age > MAX_TIMESTAMP_AGE_SECS {
            tracing::warn!(
                request_timestamp = header.timestamp,
                current_time = now,
                age_secs = age,
                "Relayed interaction too old - possible replay"
            );
            return Err(SignatureError::Expired(age));
        }
        if age < -MAX_FUTURE_TOLERANCE_SECS {
            tracing::warn!(
                request_timestamp = header.timestamp,
                current_time = now,
                "Relayed interaction from future - clock skew or manipulation"
            );
            return Err(SignatureError::FromFuture);
        }

        let expected = self.mac(header.timestamp, body);
        if expected.as_slice().ct_eq(header.signature.as_slice()).unwrap_u8() != 1 {
            tracing::warn!("Invalid relay signature");
            return Err(SignatureError::Mismatch);
        }

        Ok(())
    }
}

impl std::fmt::Debug for RelayVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayVerifier").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_704_067_200;
    const BODY: &[u8] = br#"{"type":1}"#;

    fn verifier(secret: &str) -> RelayVerifier {
        RelayVerifier::new(SecretString::new(secret.to_string()))
    }

    fn header(secret: &str, timestamp: i64) -> String {
        format!("t={},v1={}", timestamp, verifier(secret).sign(timestamp, BODY))
    }

    #[test]
    fn parse_signature_header_valid() {
        let parsed = SignatureHeader::parse("t=1704067200,v1=5d41402abc4b2a76").unwrap();
        assert_eq!(parsed.timestamp, 1704067200);
        assert_eq!(hex::encode(&parsed.signature), "5d41402abc4b2a76");
    }

    #[test]
    fn parse_ignores_unknown_fields() {
        let parsed = SignatureHeader::parse("t=1,v0=ff,v1=00").unwrap();
        assert_eq!(parsed.signature, vec![0u8]);
    }

    #[test]
    fn parse_rejects_incomplete_headers() {
        assert_eq!(SignatureHeader::parse(""), Err(SignatureError::MissingHeader));
        assert_eq!(SignatureHeader::parse("t=1"), Err(SignatureError::Malformed));
        assert_eq!(SignatureHeader::parse("v1=zz,t=1"), Err(SignatureError::Malformed));
        assert_eq!(SignatureHeader::parse("garbage"), Err(SignatureError::Malformed));
    }

    #[test]
    fn verify_signature_valid() {
        let header = header("relay-secret", NOW);
        assert_eq!(verifier("relay-secret").verify(Some(&header), BODY, NOW), Ok(()));
    }

    #[test]
    fn verify_signature_wrong_secret() {
        let header = header("other-secret", NOW);
        assert_eq!(
            verifier("relay-secret").verify(Some(&header), BODY, NOW),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn verify_signature_tampered_body() {
        let header = header("relay-secret", NOW);
        assert_eq!(
            verifier("relay-secret").verify(Some(&header), br#"{"type":3}"#, NOW),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn verify_signature_expired_timestamp() {
        let header = header("relay-secret", NOW - 600);
        assert_eq!(
            verifier("relay-secret").verify(Some(&header), BODY, NOW),
            Err(SignatureError::Expired(600))
        );
    }

    #[test]
    fn verify_signature_future_timestamp() {
        let header = header("relay-secret", NOW + 120);
        assert_eq!(
            verifier("relay-secret").verify(Some(&header), BODY, NOW),
            Err(SignatureError::FromFuture)
        );
    }

    #[test]
    fn verify_signature_small_future_tolerance() {
        let header = header("relay-secret", NOW + 30);
        assert!(verifier("relay-secret").verify(Some(&header), BODY, NOW).is_ok());
    }

    #[test]
    fn signature_is_full_sha256_for_any_key_length() {
        let long = "x".repeat(200);
        for secret in ["", "k", long.as_str()] {
            let signature = verifier(secret).sign(NOW, BODY);
            assert_eq!(signature.len(), 64);
            let header = format!("t={},v1={}", NOW, signature);
            assert_eq!(verifier(secret).verify(Some(&header), BODY, NOW), Ok(()));
        }
    }

    #[test]
    fn empty_signature_never_matches() {
        let header = format!("t={},v1=", NOW);
        assert_ne!(verifier("relay-secret").verify(Some(&header), BODY, NOW), Ok(()));
    }

    #[test]
    fn verify_requires_header() {
        assert_eq!(
            verifier("relay-secret").verify(None, BODY, NOW),
            Err(SignatureError::MissingHeader)
        );
    }
}
