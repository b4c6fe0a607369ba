//! # Webhook Signature Verification
//!
//! Stripe signs each notification with `Stripe-Signature: t=<unix>,v1=<hex>`,
//! where the `v1` value is `HMAC-SHA256(secret, "<t>." + body)`. During
//! secret rotation the header may carry several `v1` entries; any match wins.
//!
//! The MAC is computed over the raw body bytes exactly as received.

use hmac::{Hmac, Mac};
use relay_core::SignatureError;
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Name of the header carrying the signature
pub const SIGNATURE_HEADER: &str = "stripe-signature";

/// Parsed `Stripe-Signature` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    pub timestamp: i64,
    pub signatures: Vec<String>,
}

impl SignatureHeader {
    /// Parse a header value. Unknown schemes (e.g. `v0`) are ignored.
    pub fn parse(header: &str) -> Result<Self, SignatureError> {
        let mut timestamp = None;
        let mut signatures = Vec::new();

        for part in header.split(',') {
            let Some((key, value)) = part.trim().split_once('=') else {
                continue;
            };
            match key {
                "t" => {
                    let ts = value.parse::<i64>().map_err(|_| {
                        SignatureError::MalformedHeader(format!("bad timestamp {:?}", value))
                    })?;
                    timestamp = Some(ts);
                }
                "v1" => signatures.push(value.to_string()),
                _ => {}
            }
        }

        let timestamp = timestamp.ok_or_else(|| {
            SignatureError::MalformedHeader("missing timestamp".to_string())
        })?;

        if signatures.is_empty() {
            return Err(SignatureError::MalformedHeader(
                "no v1 signature found".to_string(),
            ));
        }

        Ok(Self {
            timestamp,
            signatures,
        })
    }
}

/// Checks notification signatures against one shared secret
#[derive(Clone)]
pub struct SignatureVerifier {
    secret: String,
    tolerance_secs: i64,
}

impl SignatureVerifier {
    pub fn new(secret: impl Into<String>, tolerance_secs: i64) -> Self {
        Self {
            secret: secret.into(),
            tolerance_secs,
        }
    }

    /// Verify `payload` against `header` as of the unix time `now`.
    pub fn verify(
        &self,
        payload: &[u8],
        header: Option<&str>,
        now: i64,
    ) -> Result<(), SignatureError> {
        let header = header
            .filter(|h| !h.trim().is_empty())
            .ok_or(SignatureError::MissingHeader)?;
        let parsed = SignatureHeader::parse(header)?;

        let tolerance = u64::try_from(self.tolerance_secs).unwrap_or(0);
        if now.abs_diff(parsed.timestamp) > tolerance {
            return Err(SignatureError::TimestampOutsideTolerance {
                timestamp: parsed.timestamp,
                tolerance_secs: self.tolerance_secs,
            });
        }

        let expected = compute_signature(&self.secret, parsed.timestamp, payload);

        let valid = parsed
            .signatures
            .iter()
            .any(|sig| bool::from(sig.as_bytes().ct_eq(expected.as_bytes())));

        if valid {
            Ok(())
        } else {
            Err(SignatureError::Mismatch)
        }
    }
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("secret", &"<redacted>")
            .field("tolerance_secs", &self.tolerance_secs)
            .finish()
    }
}

/// Hex HMAC-SHA256 of `"<timestamp>." + payload`
pub fn compute_signature(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Build a header value the way Stripe would send it.
///
/// Handy for local replay tooling and tests.
pub fn signature_header(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    format!(
        "t={},v1={}",
        timestamp,
        compute_signature(secret, timestamp, payload)
    )
}
