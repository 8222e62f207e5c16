//! Object store endpoint parsing.

use std::fmt;
use std::str::FromStr;

use crate::error::SignError;

/// URL scheme used when building presigned URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    /// `https`, used for every hosted store.
    #[default]
    Https,
    /// `http`, for local S3-compatible servers.
    Http,
}

impl Scheme {
    /// The scheme name without the `://` separator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Https => "https",
            Self::Http => "http",
        }
    }
}

/// An object store endpoint: a host (optionally with port) and a scheme.
///
/// The host keeps the caller's casing for the final URL; signing lowercases it.
///
/// # Examples
///
/// ```
/// use contenthost_sign::{Endpoint, Scheme};
///
/// let endpoint: Endpoint = "s3.us-west-004.backblazeb2.com".parse().unwrap();
/// assert_eq!(endpoint.scheme(), Scheme::Https);
///
/// let local: Endpoint = "http://localhost:9000/".parse().unwrap();
/// assert_eq!(local.scheme(), Scheme::Http);
/// assert_eq!(local.host(), "localhost:9000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    scheme: Scheme,
    host: String,
}

impl Endpoint {
    /// Parse an endpoint from a bare host or a `http(s)://host` string.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::InvalidArgument`] if the host is empty or contains
    /// anything besides a host name, an IP literal and a port.
    pub fn parse(input: &str) -> Result<Self, SignError> {
        let input = input.trim();
        let (scheme, rest) = if let Some(rest) = strip_prefix_ignore_case(input, "https://") {
            (Scheme::Https, rest)
        } else if let Some(rest) = strip_prefix_ignore_case(input, "http://") {
            (Scheme::Http, rest)
        } else {
            (Scheme::Https, input)
        };

        let host = rest.strip_suffix('/').unwrap_or(rest);
        if host.is_empty() {
            return Err(SignError::empty("endpoint host"));
        }
        if !host.chars().all(is_authority_char) {
            return Err(SignError::InvalidArgument(format!(
                "endpoint must be a bare host, got {input:?}"
            )));
        }

        Ok(Self {
            scheme,
            host: host.to_owned(),
        })
    }

    /// The scheme used in generated URLs.
    #[must_use]
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// The host as supplied (original casing, optional port).
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }
}

impl FromStr for Endpoint {
    type Err = SignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme.as_str(), self.host)
    }
}

/// Host names, IPv4 and bracketed IPv6 literals, and a `:port` suffix.
fn is_authority_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | ':' | '[' | ']')
}

fn strip_prefix_ignore_case<'a>(input: &'a str, prefix: &str) -> Option<&'a str> {
    let head = input.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &input[prefix.len()..])
}
