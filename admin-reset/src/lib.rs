#![deny(unused_crate_dependencies)]
#![warn(missing_docs)]
#![warn(unused_extern_crates)]
#![warn(unused_imports)]

//! Resets the `admin` staff account of a local database to known credentials.
//!
//! The old account is removed and a fresh one is inserted in a single transaction,
//! so a failed run leaves the table untouched. The new account must change its
//! password on the next login.

use std::{io::Write, time::Duration};

use sqlx::{postgres::PgConnectOptions, Connection, PgConnection};
use storage::StaffAccount;

mod config;
mod error;
mod report;

pub use config::Config;
pub use error::{Error, ErrorKind, Result};
pub use report::report;

/// Username of the account being reset.
pub const ADMIN_USERNAME: &str = "admin";

/// Password the reset account logs in with. Never printed or logged.
pub const DEFAULT_PASSWORD: &str = "password";

/// Display name of the reset account.
pub const ADMIN_FULL_NAME: &str = "Admin User";

/// Recovery token stored with the reset account.
pub const ADMIN_SECRET_CODE: &str = "ADMIN_LOCAL_CODE";

/// The admin account as it is stored after a reset.
pub fn admin_account(password_hash: String) -> StaffAccount {
    StaffAccount {
        username: ADMIN_USERNAME.to_string(),
        password_hash,
        full_name: ADMIN_FULL_NAME.to_string(),
        is_admin: true,
        must_change_password: true,
        secret_code: ADMIN_SECRET_CODE.to_string(),
    }
}

/// Opens a single connection, failing with [`Error::ConnectTimeout`] if it takes too long.
pub async fn connect(options: &PgConnectOptions, timeout: Duration) -> Result<PgConnection> {
    match tokio::time::timeout(timeout, PgConnection::connect_with(options)).await {
        Ok(conn) => conn.map_err(Error::Connect),
        Err(_) => Err(Error::ConnectTimeout(timeout)),
    }
}

/// Connects with `config` and replaces the admin account, writing progress to `out`.
///
/// The connection is closed before returning, whatever the outcome.
pub async fn reset_admin<W: Write>(config: &Config, out: &mut W) -> Result<()> {
    reset_admin_with(&config.connect_options(), config.connect_timeout(), out).await
}

/// Same as [`reset_admin`] with already built connection options.
pub async fn reset_admin_with<W: Write>(
    options: &PgConnectOptions,
    timeout: Duration,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Connecting to the database...")?;
    vlog::info!(
        host = options.get_host(),
        port = options.get_port(),
        database = options.get_database(),
        user = options.get_username(),
        "connecting to the database"
    );

    let mut conn = connect(options, timeout).await?;
    writeln!(out, "Connection successful.")?;

    let res = replace_admin_account(&mut conn, out).await;

    if let Err(e) = conn.close().await {
        vlog::warn!("failed to close the database connection: {e}");
    }

    res
}

/// Deletes the admin account and inserts a fresh one on an open connection.
///
/// Both statements run in one transaction; on any error it is dropped uncommitted
/// and rolls back.
pub async fn replace_admin_account<W: Write>(conn: &mut PgConnection, out: &mut W) -> Result<()> {
    let mut tx = conn.begin().await?;

    writeln!(out, "Removing old admin user (if exists)...")?;
    let removed = storage::delete_staff_account(&mut tx, ADMIN_USERNAME).await?;
    vlog::debug!(removed, "removed old admin accounts");

    writeln!(
        out,
        "Creating new admin user with username '{ADMIN_USERNAME}' and the default credentials..."
    )?;
    let password_hash = credentials::hash_password(DEFAULT_PASSWORD)?;
    storage::add_staff_account(&mut tx, &admin_account(password_hash)).await?;

    tx.commit().await?;
    vlog::info!("admin account reset committed");

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use envconfig::Envconfig;
    use pretty_assertions::assert_eq;

    use super::*;

    fn unreachable_config() -> Config {
        let vars: HashMap<String, String> = [
            ("DB_NAME", "bloodlink_db"),
            ("DB_USER", "shine"),
            ("DB_PASS", "shinepass"),
            ("DB_HOST", "127.0.0.1"),
            // Nothing listens on port 1.
            ("DB_PORT", "1"),
            ("DB_CONNECT_TIMEOUT_SECS", "5"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Config::init_from_hashmap(&vars).unwrap()
    }

    #[test]
    fn admin_account_fields() {
        let account = admin_account("$argon2id$hash".to_string());

        assert_eq!(account.username, "admin");
        assert_eq!(account.password_hash, "$argon2id$hash");
        assert_eq!(account.full_name, "Admin User");
        assert!(account.is_admin);
        assert!(account.must_change_password);
        assert_eq!(account.secret_code, "ADMIN_LOCAL_CODE");
    }

    #[tokio::test]
    async fn unreachable_host_is_a_connection_failure() {
        let mut out = Vec::new();

        let res = reset_admin(&unreachable_config(), &mut out).await;

        let err = res.as_ref().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Connection);
        assert_eq!(
            String::from_utf8(out.clone()).unwrap(),
            "Connecting to the database...\n"
        );

        report(&res, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("ERROR: Could not connect to the database."));
        assert!(!text.contains("An unexpected error occurred"));
    }
}
