use log::warn;
use std::env;
use std::str::FromStr;

use crate::domain::solver_factory::SolverType;

const DEFAULT_PORT: u16 = 9000;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
const DEFAULT_PAYLOAD_LIMIT: usize = 16 * 1024;

/// Server settings read from the environment (and `.env` via dotenv).
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
    pub form_limit: usize,
    pub json_limit: usize,
    pub solver: SolverType,
    pub sentry_dsn: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
            form_limit: DEFAULT_PAYLOAD_LIMIT,
            json_limit: DEFAULT_PAYLOAD_LIMIT,
            solver: SolverType::default(),
            sentry_dsn: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup. Malformed values fall back to
    /// the defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServerConfig::default();

        let solver = match lookup("SOLVER") {
            Some(name) => SolverType::from_str(&name).unwrap_or_else(|| {
                warn!("Unknown SOLVER {:?}, using {:?}", name, defaults.solver);
                defaults.solver
            }),
            None => defaults.solver,
        };

        ServerConfig {
            bind_addr: lookup("BIND_ADDR")
                .filter(|addr| !addr.trim().is_empty())
                .unwrap_or(defaults.bind_addr),
            port: parse_or(&lookup, "PORT", defaults.port),
            form_limit: parse_or(&lookup, "FORM_PAYLOAD_LIMIT", defaults.form_limit),
            json_limit: parse_or(&lookup, "JSON_PAYLOAD_LIMIT", defaults.json_limit),
            solver,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.trim().is_empty()),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + std::fmt::Debug,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse::<T>().unwrap_or_else(|_| {
            warn!("Ignoring malformed {}={:?}, using {:?}", key, raw, default);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_empty_environment_gives_defaults() {
        assert_eq!(config(&[]), ServerConfig::default());
    }

    #[test]
    fn test_values_are_read_from_environment() {
        let cfg = config(&[
            ("PORT", "8080"),
            ("BIND_ADDR", "127.0.0.1"),
            ("FORM_PAYLOAD_LIMIT", "1024"),
            ("SOLVER", "HiGHS"),
            ("SENTRY_DSN", "https://key@sentry.example/1"),
        ]);
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.bind_addr, "127.0.0.1");
        assert_eq!(cfg.form_limit, 1024);
        assert_eq!(cfg.json_limit, DEFAULT_PAYLOAD_LIMIT);
        assert_eq!(cfg.solver, SolverType::Highs);
        assert_eq!(cfg.sentry_dsn.as_deref(), Some("https://key@sentry.example/1"));
    }

    #[test]
    fn test_malformed_values_fall_back() {
        let cfg = config(&[("PORT", "ninety"), ("SOLVER", "simplex"), ("SENTRY_DSN", " ")]);
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.solver, SolverType::Highs);
        assert_eq!(cfg.sentry_dsn, None);
    }
}
