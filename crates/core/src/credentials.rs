//! OAuth credential set and properties-file parsing
//!
//! The credential file is a plain `key=value` properties file:
//!
//! ```text
//! # Yelp API v2 keys
//! CKEY=...
//! CSECRET=...
//! TOKEN=...
//! TOKENSECRET=...
//! ```
//!
//! Reading the file is the shell's job; this module only turns its text into
//! a validated [`Credentials`] value.

use std::collections::HashMap;
use std::fmt;

/// Properties key holding the consumer key
pub const CONSUMER_KEY: &str = "CKEY";
/// Properties key holding the consumer secret
pub const CONSUMER_SECRET: &str = "CSECRET";
/// Properties key holding the access token
pub const TOKEN: &str = "TOKEN";
/// Properties key holding the access-token secret
pub const TOKEN_SECRET: &str = "TOKENSECRET";

/// Error type for credential parsing and validation
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CredentialsError {
    #[error("missing credential `{0}`")]
    Missing(&'static str),

    #[error("credential `{0}` is empty")]
    Empty(&'static str),

    #[error("credential `{0}` contains characters that cannot be sent in a request header")]
    Malformed(&'static str),
}

/// OAuth 1.0a credential set
///
/// Immutable once built. Construction validates every value, so a
/// `Credentials` in hand can always be used to sign a request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    consumer_key: String,
    consumer_secret: String,
    token: String,
    token_secret: String,
}

impl Credentials {
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        token: impl Into<String>,
        token_secret: impl Into<String>,
    ) -> Result<Self, CredentialsError> {
        Ok(Self {
            consumer_key: validate(CONSUMER_KEY, consumer_key.into())?,
            consumer_secret: validate(CONSUMER_SECRET, consumer_secret.into())?,
            token: validate(TOKEN, token.into())?,
            token_secret: validate(TOKEN_SECRET, token_secret.into())?,
        })
    }

    /// Build credentials from parsed properties (see [`parse_properties`])
    pub fn from_properties(props: &HashMap<String, String>) -> Result<Self, CredentialsError> {
        let get = |key: &'static str| {
            props
                .get(key)
                .cloned()
                .ok_or(CredentialsError::Missing(key))
        };

        Self::new(
            get(CONSUMER_KEY)?,
            get(CONSUMER_SECRET)?,
            get(TOKEN)?,
            get(TOKEN_SECRET)?,
        )
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    pub fn consumer_secret(&self) -> &str {
        &self.consumer_secret
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn token_secret(&self) -> &str {
        &self.token_secret
    }
}

// Secrets never end up in logs or panic messages.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("token", &self.token)
            .field("token_secret", &"<redacted>")
            .finish()
    }
}

fn validate(name: &'static str, value: String) -> Result<String, CredentialsError> {
    let value = value.trim().to_string();

    if value.is_empty() {
        return Err(CredentialsError::Empty(name));
    }

    if value.chars().any(|c| c.is_control() || !c.is_ascii()) {
        return Err(CredentialsError::Malformed(name));
    }

    Ok(value)
}

/// Parse a properties file into a key/value map
///
/// Supports `key=value`, `key: value` and `key value` lines. Blank lines and
/// lines starting with `#` or `!` are ignored. Later keys win.
pub fn parse_properties(text: &str) -> HashMap<String, String> {
    let mut props = HashMap::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let split_at = line.find(['=', ':', ' ', '\t']);
        let (key, value) = match split_at {
            Some(idx) => {
                let rest = line[idx..].trim_start_matches([' ', '\t']);
                let rest = rest
                    .strip_prefix(['=', ':'])
                    .unwrap_or(rest)
                    .trim_start();
                (&line[..idx], rest)
            }
            None => (line, ""),
        };

        props.insert(key.trim().to_string(), value.trim_end().to_string());
    }

    props
}
