//! OAuth 1.0a request signing (HMAC-SHA1)
//!
//! The API authenticates every call with a pre-issued access token, so only
//! the signing half of OAuth 1.0a is needed: build the signature base string
//! from the method, URL and parameters, sign it with the consumer and token
//! secrets, and render the `Authorization` header.
//!
//! The nonce and timestamp are inputs so that signing stays deterministic;
//! the shell supplies fresh values for every request.

use std::collections::BTreeMap;

use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::credentials::Credentials;

type HmacSha1 = Hmac<Sha1>;

pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
pub const OAUTH_VERSION: &str = "1.0";

/// Error type for request signing
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SigningError {
    #[error("cannot sign a request for `{0}`: not an absolute http(s) URL")]
    InvalidUrl(String),

    #[error("the signing key was rejected")]
    InvalidKey,
}

/// Per-request values that must never repeat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nonce {
    pub nonce: String,
    pub timestamp: i64,
}

/// Sign a request and return the value of its `Authorization` header
///
/// `url` must not carry a query string; query (and form) parameters are
/// passed in `params` so they take part in the signature.
pub fn authorization_header(
    credentials: &Credentials,
    method: &str,
    url: &str,
    params: &[(String, String)],
    nonce: &Nonce,
) -> Result<String, SigningError> {
    let oauth_params = oauth_params(credentials, nonce);
    let signature = sign(credentials, method, url, params, &oauth_params)?;

    let mut header_params = oauth_params;
    header_params.insert("oauth_signature", signature);

    let rendered = header_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, encode(v)))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!("OAuth {rendered}"))
}

/// Compute the base64-encoded HMAC-SHA1 signature for a request
pub fn signature(
    credentials: &Credentials,
    method: &str,
    url: &str,
    params: &[(String, String)],
    nonce: &Nonce,
) -> Result<String, SigningError> {
    sign(credentials, method, url, params, &oauth_params(credentials, nonce))
}

fn sign(
    credentials: &Credentials,
    method: &str,
    url: &str,
    params: &[(String, String)],
    oauth_params: &BTreeMap<&'static str, String>,
) -> Result<String, SigningError> {
    let base = signature_base_string(method, url, params, oauth_params)?;
    let key = format!(
        "{}&{}",
        encode(credentials.consumer_secret()),
        encode(credentials.token_secret())
    );

    let mut mac = HmacSha1::new_from_slice(key.as_bytes()).map_err(|_| SigningError::InvalidKey)?;
    mac.update(base.as_bytes());

    Ok(base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
}

fn oauth_params(credentials: &Credentials, nonce: &Nonce) -> BTreeMap<&'static str, String> {
    BTreeMap::from([
        ("oauth_consumer_key", credentials.consumer_key().to_string()),
        ("oauth_nonce", nonce.nonce.clone()),
        ("oauth_signature_method", SIGNATURE_METHOD.to_string()),
        ("oauth_timestamp", nonce.timestamp.to_string()),
        ("oauth_token", credentials.token().to_string()),
        ("oauth_version", OAUTH_VERSION.to_string()),
    ])
}

/// Build the OAuth 1.0a signature base string (RFC 5849 §3.4.1)
pub fn signature_base_string(
    method: &str,
    url: &str,
    params: &[(String, String)],
    oauth_params: &BTreeMap<&'static str, String>,
) -> Result<String, SigningError> {
    let mut pairs: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (encode(k), encode(v)))
        .chain(oauth_params.iter().map(|(k, v)| (encode(k), encode(v))))
        .collect();
    pairs.sort();

    let normalized = pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    Ok(format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        encode(&base_string_uri(url)?),
        encode(&normalized)
    ))
}

/// Normalize the request URL: lowercase scheme and host, drop default ports
fn base_string_uri(url: &str) -> Result<String, SigningError> {
    let invalid = || SigningError::InvalidUrl(url.to_string());

    let (scheme, rest) = url.split_once("://").ok_or_else(invalid)?;
    let scheme = scheme.to_ascii_lowercase();
    if scheme != "http" && scheme != "https" {
        return Err(invalid());
    }

    let rest = rest.split(['?', '#']).next().unwrap_or_default();
    let (authority, path) = match rest.find('/') {
        Some(idx) => rest.split_at(idx),
        None => (rest, "/"),
    };
    if authority.is_empty() {
        return Err(invalid());
    }

    let authority = authority.to_ascii_lowercase();
    let default_port = if scheme == "http" { ":80" } else { ":443" };
    let authority = authority.strip_suffix(default_port).unwrap_or(&authority);

    Ok(format!("{scheme}://{authority}{path}"))
}

/// RFC 3986 percent-encoding: everything but `A-Z a-z 0-9 - . _ ~`
fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
