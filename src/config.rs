//! Configuration types, read once from the environment at startup.

use std::env;
use std::path::PathBuf;

/// Twilio transport credentials.
///
/// The bot replies through the webhook response, so these are
/// informational: missing credentials only produce a startup warning.
#[derive(Debug, Clone, Default)]
pub struct TwilioConfig {
    pub account_sid: Option<String>,
    pub auth_token: Option<String>,
    /// Sending number, e.g. "whatsapp:+14155238886".
    pub whatsapp_number: Option<String>,
}

impl TwilioConfig {
    pub fn is_configured(&self) -> bool {
        self.account_sid.is_some() && self.auth_token.is_some() && self.whatsapp_number.is_some()
    }
}

/// Bot configuration.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Address the webhook server listens on.
    pub bind_addr: String,
    /// Directory holding one compatibility CSV per pesticide category.
    pub data_dir: PathBuf,
    pub twilio: TwilioConfig,
}

impl BotConfig {
    /// Read the configuration from environment variables, falling back to
    /// defaults for everything optional.
    pub fn from_env() -> Self {
        Self {
            bind_addr: env::var("TANKMIX_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string()),
            data_dir: env::var("TANKMIX_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            twilio: TwilioConfig {
                account_sid: env::var("TWILIO_ACCOUNT_SID").ok(),
                auth_token: env::var("TWILIO_AUTH_TOKEN").ok(),
                whatsapp_number: env::var("TWILIO_WHATSAPP_NUMBER").ok(),
            },
        }
    }
}
