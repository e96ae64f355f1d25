use std::io::Write;

use crate::{Error, ErrorKind, Result};

/// Prints the closing block for the outcome of a reset.
pub fn report<W: Write>(result: &Result<()>, out: &mut W) -> std::io::Result<()> {
    match result {
        Ok(()) => {
            writeln!(out)?;
            writeln!(
                out,
                "SUCCESS: The local admin user has been reset successfully."
            )?;
            writeln!(
                out,
                "You can now run your main application and log in locally."
            )?;
        }
        Err(err) => report_error(err, out)?,
    }

    out.flush()
}

fn report_error<W: Write>(err: &Error, out: &mut W) -> std::io::Result<()> {
    writeln!(out)?;

    match err.kind() {
        ErrorKind::Connection => {
            writeln!(out, "ERROR: Could not connect to the database.")?;
            writeln!(
                out,
                "Please make sure your environment variables (DB_HOST, DB_USER, DB_PASS, DB_NAME) are set correctly."
            )?;
            writeln!(out, "Details: {err}")
        }
        ErrorKind::Operation => writeln!(out, "An unexpected error occurred: {err}"),
    }
}
