#![deny(unused_crate_dependencies)]
#![warn(missing_docs)]
#![warn(unused_extern_crates)]
#![warn(unused_imports)]

//! Resets the `admin` account of a local database.
//!
//! Reads `DB_NAME`, `DB_USER`, `DB_PASS`, `DB_HOST` and optionally `DB_PORT` from the
//! environment (or a `.env` file) and exits with a non-zero status if the reset failed.
//!
//! The new password hash is an Argon2id PHC string (`$argon2id$v=19$...`). The main
//! application has to verify that format, otherwise logging in as `admin` fails even
//! after a successful reset.

use std::process::ExitCode;

use admin_reset::Config;
use envconfig::Envconfig;
use eyre::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    dotenvy::dotenv().ok();
    vlog::init()?;

    let mut stdout = std::io::stdout().lock();

    let result = match Config::init_from_env() {
        Ok(config) => {
            vlog::debug!(?config, "loaded config");
            admin_reset::reset_admin(&config, &mut stdout).await
        }
        Err(e) => Err(e.into()),
    };

    if let Err(e) = &result {
        // The operator already gets the error block on stdout.
        vlog::debug!(kind = ?e.kind(), "admin reset failed: {e}");
    }

    admin_reset::report(&result, &mut stdout)?;

    Ok(match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    })
}
