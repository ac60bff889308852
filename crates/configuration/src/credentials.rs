use crate::error::ConfigError;
use std::fmt;

/// Brokerage API credentials for a single pipeline run.
///
/// Built by the caller for each invocation and passed down explicitly; nothing
/// in the workspace reads credentials from process-wide state.
#[derive(Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct Credentials {
    /// Brokerage API key id.
    #[cfg_attr(
        feature = "clap",
        arg(long = "key-id", env = "APCA_API_KEY_ID", hide_env_values = true)
    )]
    pub key_id: Option<String>,

    /// Brokerage API secret key.
    #[cfg_attr(
        feature = "clap",
        arg(long = "secret-key", env = "APCA_API_SECRET_KEY", hide_env_values = true)
    )]
    pub secret_key: Option<String>,
}

impl Credentials {
    pub fn new(key_id: &str, secret_key: &str) -> Self {
        Self {
            key_id: Some(key_id.to_string()),
            secret_key: Some(secret_key.to_string()),
        }
    }

    /// Returns `(key_id, secret_key)` or names the first missing half.
    pub fn require(&self) -> Result<(&str, &str), ConfigError> {
        let key_id = non_blank(self.key_id.as_deref()).ok_or(ConfigError::MissingCredential("key id"))?;
        let secret_key =
            non_blank(self.secret_key.as_deref()).ok_or(ConfigError::MissingCredential("secret key"))?;
        Ok((key_id, secret_key))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key_id", &self.key_id)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
