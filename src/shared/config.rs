//! Application configuration. Timings, session options, output path.

use serde::Deserialize;

pub const DEFAULT_AUTH_DELAY_MS: u64 = 1000;
pub const DEFAULT_WELCOME_DELAY_MS: u64 = 1000;
pub const DEFAULT_SIGNED_IN_PROBABILITY: f64 = 0.7;
pub const DEFAULT_OUTPUT_PATH: &str = "./nexus-learn.html";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Delay before the initial session resolves. Read from NEXUS_LEARN_AUTH_DELAY_MS.
    #[serde(default)]
    pub auth_delay_ms: Option<u64>,

    /// Simulated latency of every store call. Read from NEXUS_LEARN_STORE_LATENCY_MS.
    #[serde(default)]
    pub store_latency_ms: Option<u64>,

    /// Chance that the initial session is the demo user. Read from
    /// NEXUS_LEARN_SIGNED_IN_PROBABILITY.
    #[serde(default)]
    pub signed_in_probability: Option<f64>,

    /// Delay before the welcome notice. Read from NEXUS_LEARN_WELCOME_DELAY_MS.
    #[serde(default)]
    pub welcome_delay_ms: Option<u64>,

    /// When set, sign-in uses this token instead of an anonymous session.
    #[serde(default)]
    pub auth_token: Option<String>,

    /// Where the rendered page is written. Read from NEXUS_LEARN_OUTPUT_PATH.
    #[serde(default)]
    pub output_path: Option<String>,

    /// Fixed RNG seed for reproducible runs. Read from NEXUS_LEARN_SEED.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("NEXUS_LEARN").try_parsing(true));
        if let Ok(path) = std::env::var("NEXUS_LEARN_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    pub fn auth_delay_ms_or_default(&self) -> u64 {
        self.auth_delay_ms.unwrap_or(DEFAULT_AUTH_DELAY_MS)
    }

    pub fn store_latency_ms_or_default(&self) -> u64 {
        self.store_latency_ms.unwrap_or(0)
    }

    /// Clamped to [0, 1]; defaults to 0.7.
    pub fn signed_in_probability_or_default(&self) -> f64 {
        self.signed_in_probability
            .filter(|p| p.is_finite())
            .map(|p| p.clamp(0.0, 1.0))
            .unwrap_or(DEFAULT_SIGNED_IN_PROBABILITY)
    }

    pub fn welcome_delay_ms_or_default(&self) -> u64 {
        self.welcome_delay_ms.unwrap_or(DEFAULT_WELCOME_DELAY_MS)
    }

    pub fn output_path_or_default(&self) -> String {
        self.output_path
            .clone()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string())
    }

    /// Non-empty token, if configured.
    pub fn auth_token(&self) -> Option<String> {
        self.auth_token.clone().filter(|t| !t.is_empty())
    }
}
