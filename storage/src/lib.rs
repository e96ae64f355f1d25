#![deny(unused_crate_dependencies)]
#![warn(missing_docs)]
#![warn(unused_extern_crates)]
#![warn(unused_imports)]

//! Operations on the `Staff` accounts table.
//!
//! The table is owned by the main application; nothing here creates or migrates it.

use sqlx::PgConnection;

mod error;

pub use error::{Error, Result};

/// A row of the `Staff` table.
#[derive(Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct StaffAccount {
    /// Unique login name.
    pub username: String,
    /// Salted one-way hash of the account password.
    pub password_hash: String,
    /// Display name.
    pub full_name: String,
    /// Grants administrative privileges.
    pub is_admin: bool,
    /// Forces a password change on the next login.
    pub must_change_password: bool,
    /// Recovery token used by the main application.
    pub secret_code: String,
}

impl std::fmt::Debug for StaffAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaffAccount")
            .field("username", &self.username)
            .field("full_name", &self.full_name)
            .field("is_admin", &self.is_admin)
            .field("must_change_password", &self.must_change_password)
            .finish_non_exhaustive()
    }
}

/// Removes the account with the given username.
///
/// Returns the number of removed rows, zero if there was no such account.
pub async fn delete_staff_account(conn: &mut PgConnection, username: &str) -> Result<u64> {
    let res = sqlx::query(
        "
        DELETE FROM Staff
        WHERE username = $1
        ",
    )
    .bind(username)
    .execute(conn)
    .await
    .map_err(Error::query("delete staff account"))?;

    Ok(res.rows_affected())
}

/// Adds an account to the DB.
///
/// # Arguments
///
/// * `conn`: Connection to the Postgres DB
/// * `account`: Account to insert, its username must not be taken
pub async fn add_staff_account(conn: &mut PgConnection, account: &StaffAccount) -> Result<()> {
    sqlx::query(
        "
        INSERT INTO Staff
        (
            username,
            password_hash,
            full_name,
            is_admin,
            must_change_password,
            secret_code
        )
        VALUES (
            $1, $2, $3, $4, $5, $6
        )
        ",
    )
    .bind(&account.username)
    .bind(&account.password_hash)
    .bind(&account.full_name)
    .bind(account.is_admin)
    .bind(account.must_change_password)
    .bind(&account.secret_code)
    .execute(conn)
    .await
    .map_err(Error::query("insert staff account"))?;

    Ok(())
}

/// Get the account with the given username.
pub async fn staff_account(
    conn: &mut PgConnection,
    username: &str,
) -> Result<Option<StaffAccount>> {
    let res = sqlx::query_as::<_, StaffAccount>(
        "
        SELECT
            username,
            password_hash,
            full_name,
            is_admin,
            must_change_password,
            secret_code
        FROM Staff
        WHERE username = $1
        ",
    )
    .bind(username)
    .fetch_optional(conn)
    .await
    .map_err(Error::query("read staff account"))?;

    Ok(res)
}

/// Number of accounts in the table.
pub async fn staff_accounts_count(conn: &mut PgConnection) -> Result<i64> {
    let (count,): (i64,) = sqlx::query_as(
        "
        SELECT COUNT(*)
        FROM Staff
        ",
    )
    .fetch_one(conn)
    .await
    .map_err(Error::query("count staff accounts"))?;

    Ok(count)
}
