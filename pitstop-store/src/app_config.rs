use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub booking_rules: BookingRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingRules {
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: u32,
    /// Active bookings allowed per provider slot. Zero disables the check.
    #[serde(default = "default_max_per_slot")]
    pub max_concurrent_bookings_per_slot: u32,
    #[serde(default = "default_sweep_seconds")]
    pub expiry_sweep_seconds: u64,
}

fn default_slot_minutes() -> u32 {
    30
}

fn default_max_per_slot() -> u32 {
    1
}

fn default_sweep_seconds() -> u64 {
    300
}

impl Default for BookingRules {
    fn default() -> Self {
        Self {
            slot_minutes: default_slot_minutes(),
            max_concurrent_bookings_per_slot: default_max_per_slot(),
            expiry_sweep_seconds: default_sweep_seconds(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // `PITSTOP_SERVER__PORT=8080` style environment overrides
            .add_source(config::Environment::with_prefix("PITSTOP").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
