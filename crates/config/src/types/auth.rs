//! Credential types for the Sumo Logic search API.
//!
//! Responsibilities:
//! - Hold the access id / access key pair used for Basic authentication.
//! - Handle serialization of the secret half.
//!
//! Does NOT handle:
//! - Encoding the `Authorization` header (see client crate).
//!
//! Invariants:
//! - The access key is a `secrecy::SecretString` and never appears in `Debug` output.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Module for serializing SecretString as strings.
mod secret_string {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize as DeserializeTrait, Serialize as SerializeTrait};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        secret.expose_secret().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString::new(s.into()))
    }
}

/// Access id / access key pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Access id (the public half of the key pair).
    pub access_id: String,
    /// Access key (the secret half of the key pair).
    #[serde(with = "secret_string")]
    pub access_key: SecretString,
}

impl AuthConfig {
    /// Create credentials from an access id and key.
    pub fn new(access_id: impl Into<String>, access_key: impl Into<String>) -> Self {
        Self {
            access_id: access_id.into(),
            access_key: SecretString::new(access_key.into().into()),
        }
    }
}
