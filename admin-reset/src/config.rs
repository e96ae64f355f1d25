use std::time::Duration;

use envconfig::Envconfig;
use sqlx::{postgres::PgConnectOptions, ConnectOptions};

/// Database connection settings, read from the same env variables as the main application.
#[derive(Envconfig, Clone)]
pub struct Config {
    /// Name of the target database.
    #[envconfig(from = "DB_NAME")]
    pub db_name: String,

    /// Database login user.
    #[envconfig(from = "DB_USER")]
    pub db_user: String,

    /// Database login password.
    #[envconfig(from = "DB_PASS")]
    pub db_pass: String,

    /// Database host or address.
    #[envconfig(from = "DB_HOST")]
    pub db_host: String,

    /// Database port.
    #[envconfig(from = "DB_PORT", default = "5432")]
    pub db_port: u16,

    /// Upper bound on establishing the connection, in seconds.
    #[envconfig(from = "DB_CONNECT_TIMEOUT_SECS", default = "10")]
    pub connect_timeout_secs: u64,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("db_name", &self.db_name)
            .field("db_user", &self.db_user)
            .field("db_pass", &"<redacted>")
            .field("db_host", &self.db_host)
            .field("db_port", &self.db_port)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

impl Config {
    /// Postgres connection options for this configuration.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .password(&self.db_pass)
            .database(&self.db_name)
            .disable_statement_logging()
    }

    /// How long to wait for the connection to be established.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use envconfig::Envconfig;
    use pretty_assertions::assert_eq;

    use super::Config;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn required() -> Vec<(&'static str, &'static str)> {
        vec![
            ("DB_NAME", "bloodlink_db"),
            ("DB_USER", "shine"),
            ("DB_PASS", "shinepass"),
            ("DB_HOST", "localhost"),
        ]
    }

    #[test]
    fn port_and_timeout_have_defaults() {
        let config = Config::init_from_hashmap(&vars(&required())).unwrap();

        assert_eq!(config.db_name, "bloodlink_db");
        assert_eq!(config.db_user, "shine");
        assert_eq!(config.db_pass, "shinepass");
        assert_eq!(config.db_host, "localhost");
        assert_eq!(config.db_port, 5432);
        assert_eq!(config.connect_timeout_secs, 10);
    }

    #[test]
    fn explicit_port_is_used() {
        let mut pairs = required();
        pairs.push(("DB_PORT", "6543"));

        let config = Config::init_from_hashmap(&vars(&pairs)).unwrap();

        assert_eq!(config.db_port, 6543);
    }

    #[test]
    fn missing_variable_is_an_error() {
        let pairs: Vec<_> = required()
            .into_iter()
            .filter(|(k, _)| *k != "DB_HOST")
            .collect();

        let err = Config::init_from_hashmap(&vars(&pairs)).unwrap_err();

        assert!(matches!(
            err,
            envconfig::Error::EnvVarMissing { name: "DB_HOST" }
        ));
    }

    #[test]
    fn malformed_port_is_an_error() {
        let mut pairs = required();
        pairs.push(("DB_PORT", "postgres"));

        let err = Config::init_from_hashmap(&vars(&pairs)).unwrap_err();

        assert!(matches!(err, envconfig::Error::ParseError { name: "DB_PORT" }));
    }

    #[test]
    fn connect_options_follow_config() {
        let mut pairs = required();
        pairs.push(("DB_PORT", "6543"));
        let config = Config::init_from_hashmap(&vars(&pairs)).unwrap();

        let options = config.connect_options();

        assert_eq!(options.get_host(), "localhost");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_username(), "shine");
        assert_eq!(options.get_database(), Some("bloodlink_db"));
    }

    #[test]
    fn debug_redacts_password() {
        let config = Config::init_from_hashmap(&vars(&required())).unwrap();

        let printed = format!("{config:?}");

        assert!(!printed.contains("shinepass"));
        assert!(printed.contains("<redacted>"));
    }
}
