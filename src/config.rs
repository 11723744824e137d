use std::{env, path::PathBuf, str::FromStr, time::Duration};
use tracing::warn;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATA_PATH: &str = "data/changelog.json";
const DEFAULT_BUCKET: &str = "maps";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;
const DEFAULT_DISCORD_API_URL: &str = "https://discord.com/api/v10";

#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub key: String,
    pub bucket: String,
}

#[derive(Debug, Clone)]
pub struct DiscordConfig {
    pub token: String,
    pub api_url: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub supabase: Option<SupabaseConfig>,
    pub discord: Option<DiscordConfig>,
    pub upstream_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let supabase = match (non_empty("SUPABASE_URL"), non_empty("SUPABASE_KEY")) {
            (Some(url), Some(key)) => Some(SupabaseConfig {
                url: url.trim_end_matches('/').to_string(),
                key,
                bucket: non_empty("MAPS_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            }),
            _ => {
                warn!("SUPABASE_URL or SUPABASE_KEY is not set; backend-dependent endpoints are disabled");
                None
            }
        };

        let discord = match non_empty("DISCORD_BOT_TOKEN") {
            Some(token) => Some(DiscordConfig {
                token,
                api_url: non_empty("DISCORD_API_URL")
                    .map_or_else(|| DEFAULT_DISCORD_API_URL.to_string(), |url| url.trim_end_matches('/').to_string()),
            }),
            None => {
                warn!("DISCORD_BOT_TOKEN is not set; Discord endpoints are disabled");
                None
            }
        };

        Self {
            port: parse_or("PORT", DEFAULT_PORT),
            data_path: non_empty("APP_DATA_PATH")
                .map_or_else(|| PathBuf::from(DEFAULT_DATA_PATH), PathBuf::from),
            supabase,
            discord,
            upstream_timeout: Duration::from_secs(parse_or(
                "UPSTREAM_TIMEOUT_SECS",
                DEFAULT_UPSTREAM_TIMEOUT_SECS,
            )),
        }
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_or<T: FromStr + std::fmt::Display + Copy>(key: &str, default: T) -> T {
    match non_empty(key) {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("invalid {key} value {raw:?}, using default: {default}");
            default
        }),
    }
}
