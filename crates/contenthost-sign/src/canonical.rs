//! Canonical request construction for presigned AWS Signature Version 4 URLs.
//!
//! This module builds the canonical request exactly as the object store
//! recomputes it when validating a presigned URL:
//!
//! ```text
//! HTTPRequestMethod\n
//! CanonicalURI\n
//! CanonicalQueryString\n
//! CanonicalHeaders\n\n
//! SignedHeaders\n
//! UNSIGNED-PAYLOAD
//! ```
//!
//! Presigned URLs sign a single header (`host`) and never hash the payload.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// The payload hash value used for every presigned URL.
pub const UNSIGNED_PAYLOAD: &str = "UNSIGNED-PAYLOAD";

/// The only header included in a presigned URL signature.
pub const SIGNED_HEADERS: &str = "host";

/// Characters that must be percent-encoded in path segments and query components.
///
/// Everything except the RFC 3986 unreserved set (A-Z, a-z, 0-9, `-`, `_`,
/// `.`, `~`) is encoded, including `!`, `'`, `(`, `)` and `*`.
const URI_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a single URI component using the SigV4 rules.
///
/// Unreserved characters pass through, everything else (including `/`) becomes
/// `%XX` with uppercase hex digits. Non-ASCII input is encoded byte-wise as UTF-8.
///
/// # Examples
///
/// ```
/// use contenthost_sign::canonical::encode_uri_component;
///
/// assert_eq!(encode_uri_component("abc-1_2.3~"), "abc-1_2.3~");
/// assert_eq!(encode_uri_component("a b/c"), "a%20b%2Fc");
/// assert_eq!(encode_uri_component("(x)!*'"), "%28x%29%21%2A%27");
/// ```
#[must_use]
pub fn encode_uri_component(input: &str) -> String {
    utf8_percent_encode(input, URI_ENCODE_SET).to_string()
}

/// Build the canonical path `/bucket/key`.
///
/// The bucket and each `/`-delimited segment of the key are encoded
/// individually; the separators themselves are never encoded. The key is taken
/// verbatim: an already percent-encoded key is encoded again, because the
/// store sees the literal characters.
///
/// # Examples
///
/// ```
/// use contenthost_sign::canonical::build_canonical_path;
///
/// assert_eq!(
///     build_canonical_path("media", "videos/my clip.mp4"),
///     "/media/videos/my%20clip.mp4"
/// );
/// ```
#[must_use]
pub fn build_canonical_path(bucket: &str, key: &str) -> String {
    let mut path = String::with_capacity(bucket.len() + key.len() + 2);
    path.push('/');
    path.push_str(&encode_uri_component(bucket));
    for segment in key.split('/') {
        path.push('/');
        path.push_str(&encode_uri_component(segment));
    }
    path
}

/// Build the canonical query string from unencoded name/value pairs.
///
/// Parameters are sorted by raw byte value of their names (then values), and
/// each name and value is encoded independently before being joined as
/// `name=value` pairs separated by `&`.
///
/// # Examples
///
/// ```
/// use contenthost_sign::canonical::build_canonical_query_string;
///
/// assert_eq!(
///     build_canonical_query_string(&[("b", "2"), ("a", "x/y")]),
///     "a=x%2Fy&b=2"
/// );
/// ```
#[must_use]
pub fn build_canonical_query_string(params: &[(&str, &str)]) -> String {
    let mut sorted: Vec<(&str, &str)> = params.to_vec();
    sorted.sort_unstable();

    sorted
        .iter()
        .map(|(name, value)| {
            format!(
                "{}={}",
                encode_uri_component(name),
                encode_uri_component(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the canonical headers block for a presigned URL.
///
/// Only `host` participates; its value is lowercased. The result is terminated
/// by a newline, so joining it into the canonical request yields the blank line
/// that separates headers from the signed header list.
#[must_use]
pub fn build_canonical_headers(host: &str) -> String {
    format!("host:{}\n", host.to_ascii_lowercase())
}

/// Join the canonical request components with newlines.
///
/// `canonical_headers` must already be newline-terminated (see
/// [`build_canonical_headers`]).
#[must_use]
pub fn build_canonical_request(
    method: &str,
    canonical_path: &str,
    canonical_query: &str,
    canonical_headers: &str,
) -> String {
    format!(
        "{method}\n{canonical_path}\n{canonical_query}\n{canonical_headers}\n{SIGNED_HEADERS}\n{UNSIGNED_PAYLOAD}"
    )
}
