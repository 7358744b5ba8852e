//! Application Configuration
//!
//! All configuration is read from the environment exactly once at startup
//! into an immutable struct; components receive what they need through
//! their constructors and never read the environment ad hoc.

/// Fallback signing secret for non-production environments.
///
/// Known weakness carried over from the original deployment: running with
/// this value means anyone can forge session tokens. Production startup
/// refuses to run without an explicit `SESSION_SECRET`.
const DEFAULT_SESSION_SECRET: &str = "default-secret-change-in-production";

/// Immutable process-wide configuration
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// xAI API key for chat completions (chat disabled when unset)
    pub xai_api_key: Option<String>,

    /// OpenAI API key for moderation (moderation skipped when unset)
    pub moderation_api_key: Option<String>,

    /// Stripe secret key (payments disabled when unset)
    pub stripe_secret_key: Option<String>,

    /// Public base URL for redirect targets and asset URLs
    pub base_url: String,

    /// Secret for signing session tokens
    pub session_secret: String,

    /// Whether this is a production deployment (`APP_ENV=production`)
    pub production: bool,
}

impl AppConfig {
    /// Load configuration from the environment
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_parts(
            std::env::var("XAI_API_KEY").ok(),
            std::env::var("OPENAI_API_KEY").ok(),
            std::env::var("STRIPE_SECRET_KEY").ok(),
            std::env::var("PUBLIC_BASE_URL").ok(),
            std::env::var("SESSION_SECRET").ok(),
            std::env::var("APP_ENV").ok(),
        )
    }

    fn from_parts(
        xai_api_key: Option<String>,
        moderation_api_key: Option<String>,
        stripe_secret_key: Option<String>,
        base_url: Option<String>,
        session_secret: Option<String>,
        app_env: Option<String>,
    ) -> anyhow::Result<Self> {
        let production = app_env.as_deref() == Some("production");

        let session_secret = match session_secret {
            Some(secret) if !secret.is_empty() => secret,
            _ if production => {
                anyhow::bail!("SESSION_SECRET must be set when APP_ENV=production")
            }
            _ => {
                tracing::warn!(
                    "SESSION_SECRET not set - using the insecure default; session tokens are forgeable"
                );
                DEFAULT_SESSION_SECRET.into()
            }
        };

        Ok(Self {
            xai_api_key,
            moderation_api_key,
            stripe_secret_key,
            base_url: base_url.unwrap_or_else(|| "http://localhost:3000".into()),
            session_secret,
            production,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_in_development() {
        let config = AppConfig::from_parts(None, None, None, None, None, None).unwrap();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.session_secret, DEFAULT_SESSION_SECRET);
        assert!(!config.production);
    }

    #[test]
    fn test_production_requires_session_secret() {
        let missing =
            AppConfig::from_parts(None, None, None, None, None, Some("production".into()));
        assert!(missing.is_err());

        let empty = AppConfig::from_parts(
            None,
            None,
            None,
            None,
            Some(String::new()),
            Some("production".into()),
        );
        assert!(empty.is_err());

        let set = AppConfig::from_parts(
            None,
            None,
            None,
            None,
            Some("real-secret".into()),
            Some("production".into()),
        )
        .unwrap();
        assert!(set.production);
        assert_eq!(set.session_secret, "real-secret");
    }
}
