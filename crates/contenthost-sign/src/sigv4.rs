//! AWS Signature Version 4 primitives.
//!
//! The signing flow after the canonical request is built:
//!
//! 1. Hash the canonical request with SHA-256 (lowercase hex).
//! 2. Build the string to sign from the algorithm, timestamp, credential scope
//!    and canonical request hash.
//! 3. Derive the signing key with an HMAC-SHA256 chain over the date, region,
//!    service and the `aws4_request` terminator.
//! 4. HMAC the string to sign with the signing key and hex-encode the result.

use chrono::{DateTime, Utc};
use hmac::{Hmac, KeyInit, Mac};
use sha2::{Digest, Sha256};

use crate::error::SignError;

/// The only algorithm supported by this implementation.
pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Service name used in every credential scope.
pub const SERVICE: &str = "s3";

/// Credential scope terminator.
const TERMINATOR: &str = "aws4_request";

type HmacSha256 = Hmac<Sha256>;

/// Format a timestamp in ISO 8601 basic format (`YYYYMMDDTHHMMSSZ`).
///
/// Fractional seconds are dropped.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use contenthost_sign::sigv4::format_amz_date;
///
/// let ts = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
/// assert_eq!(format_amz_date(&ts), "20240115T103000Z");
/// ```
#[must_use]
pub fn format_amz_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Build the credential scope `date/region/s3/aws4_request`.
///
/// `date_stamp` is the `YYYYMMDD` date portion of the signing timestamp.
#[must_use]
pub fn build_credential_scope(date_stamp: &str, region: &str) -> String {
    format!("{date_stamp}/{region}/{SERVICE}/{TERMINATOR}")
}

/// Hash a canonical request, returning lowercase hex.
#[must_use]
pub fn hash_canonical_request(canonical_request: &str) -> String {
    hex::encode(Sha256::digest(canonical_request.as_bytes()))
}

/// Build the SigV4 string to sign.
///
/// Format:
/// ```text
/// AWS4-HMAC-SHA256\n
/// <ISO8601 timestamp>\n
/// <credential_scope>\n
/// <hex(SHA256(canonical_request))>
/// ```
///
/// # Examples
///
/// ```
/// use contenthost_sign::sigv4::build_string_to_sign;
///
/// let sts = build_string_to_sign(
///     "20130524T000000Z",
///     "20130524/us-east-1/s3/aws4_request",
///     "3bfa292879f6447bbcda7001decf97f4a54dc650c8942174ae0a9121cf58ad04",
/// );
/// assert!(sts.starts_with("AWS4-HMAC-SHA256\n20130524T000000Z\n"));
/// ```
#[must_use]
pub fn build_string_to_sign(
    amz_date: &str,
    credential_scope: &str,
    canonical_request_hash: &str,
) -> String {
    format!("{ALGORITHM}\n{amz_date}\n{credential_scope}\n{canonical_request_hash}")
}

/// Derive the SigV4 signing key using the HMAC-SHA256 chain.
///
/// ```text
/// DateKey              = HMAC-SHA256("AWS4" + secret_key, date)
/// DateRegionKey        = HMAC-SHA256(DateKey, region)
/// DateRegionServiceKey = HMAC-SHA256(DateRegionKey, "s3")
/// SigningKey           = HMAC-SHA256(DateRegionServiceKey, "aws4_request")
/// ```
///
/// Each step feeds raw bytes, not hex, into the next.
pub fn derive_signing_key(
    secret_key: &str,
    date_stamp: &str,
    region: &str,
) -> Result<Vec<u8>, SignError> {
    let date_key = hmac_sha256(format!("AWS4{secret_key}").as_bytes(), date_stamp.as_bytes())?;
    let date_region_key = hmac_sha256(&date_key, region.as_bytes())?;
    let date_region_service_key = hmac_sha256(&date_region_key, SERVICE.as_bytes())?;
    hmac_sha256(&date_region_service_key, TERMINATOR.as_bytes())
}

/// Compute the hex-encoded HMAC-SHA256 signature of `string_to_sign`.
pub fn compute_signature(signing_key: &[u8], string_to_sign: &str) -> Result<String, SignError> {
    hmac_sha256(signing_key, string_to_sign.as_bytes()).map(hex::encode)
}

/// Compute HMAC-SHA256 and return the raw bytes.
fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, SignError> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|e| SignError::CryptoFailure(e.to_string()))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}
