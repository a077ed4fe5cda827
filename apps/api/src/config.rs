use anyhow::{anyhow, Context, Result};

use crate::interpreter::TokenMatching;

/// Which `PromptStore` backend to build at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgrest,
    Postgres,
    Memory,
}

/// Application configuration loaded from environment variables.
/// Startup fails if the hosted-database endpoint or key is missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Hosted project URL, e.g. `https://xyz.supabase.co`.
    pub supabase_url: String,
    /// Public (anon) client key for the hosted project.
    pub supabase_anon_key: String,
    pub database_url: Option<String>,
    pub store_backend: StoreBackend,
    pub run_migrations: bool,
    pub token_matching: TokenMatching,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty());

        let store_backend = match lookup("NEBULA_STORE").as_deref().map(str::trim) {
            None | Some("") if database_url.is_some() => StoreBackend::Postgres,
            None | Some("") | Some("postgrest") => StoreBackend::Postgrest,
            Some("postgres") => StoreBackend::Postgres,
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(anyhow!(
                    "NEBULA_STORE must be postgrest, postgres or memory, got '{other}'"
                ))
            }
        };

        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            return Err(anyhow!("Required environment variable 'DATABASE_URL' is not set"));
        }

        // The sign-in redirect needs the hosted URL even when rows live elsewhere.
        let (supabase_url, supabase_anon_key) = match store_backend {
            StoreBackend::Memory => (
                lookup("SUPABASE_URL").unwrap_or_default(),
                lookup("SUPABASE_ANON_KEY").unwrap_or_default(),
            ),
            _ => (
                require(&lookup, "SUPABASE_URL")?,
                require(&lookup, "SUPABASE_ANON_KEY")?,
            ),
        };

        let token_matching = match lookup("NEBULA_TOKEN_MATCHING") {
            Some(raw) => raw.parse::<TokenMatching>().map_err(|e| anyhow!(e))?,
            None => TokenMatching::default(),
        };

        Ok(Config {
            supabase_url,
            supabase_anon_key,
            database_url,
            store_backend,
            run_migrations: lookup("NEBULA_RUN_MIGRATIONS")
                .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
                .unwrap_or(false),
            token_matching,
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn require<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_hosted_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("SUPABASE_URL", "https://demo.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
        ]))
        .unwrap();
        assert_eq!(config.store_backend, StoreBackend::Postgrest);
        assert_eq!(config.token_matching, TokenMatching::Substring);
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert!(!config.run_migrations);
    }

    #[test]
    fn test_missing_key_fails() {
        let err = Config::from_lookup(lookup_from(&[(
            "SUPABASE_URL",
            "https://demo.supabase.co",
        )]))
        .unwrap_err();
        assert!(err.to_string().contains("SUPABASE_ANON_KEY"));
    }

    #[test]
    fn test_database_url_selects_postgres() {
        let config = Config::from_lookup(lookup_from(&[
            ("SUPABASE_URL", "https://demo.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
            ("DATABASE_URL", "postgres://localhost/nebula"),
            ("NEBULA_RUN_MIGRATIONS", "true"),
        ]))
        .unwrap();
        assert_eq!(config.store_backend, StoreBackend::Postgres);
        assert!(config.run_migrations);
    }

    #[test]
    fn test_memory_backend_needs_no_credentials() {
        let config = Config::from_lookup(lookup_from(&[
            ("NEBULA_STORE", "memory"),
            ("NEBULA_TOKEN_MATCHING", "whole-word"),
            ("PORT", "9000"),
        ]))
        .unwrap();
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.token_matching, TokenMatching::WholeWord);
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_postgres_backend_without_database_url_fails() {
        let result = Config::from_lookup(lookup_from(&[
            ("NEBULA_STORE", "postgres"),
            ("SUPABASE_URL", "https://demo.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_values_fail() {
        assert!(Config::from_lookup(lookup_from(&[("NEBULA_STORE", "redis")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[
            ("NEBULA_STORE", "memory"),
            ("PORT", "not-a-port"),
        ]))
        .is_err());
    }
}
