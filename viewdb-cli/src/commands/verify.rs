use chrono::NaiveDate;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use viewdb_catalog::VerifySettings;
use viewdb_db::Connection;
use viewdb_import::{expected_period_end, verify_period};

use crate::CliError;

/// Fail unless the store has view summaries for the expected period end.
pub(crate) fn run_verify(
    conn: &Connection,
    explicit: Option<NaiveDate>,
    settings: Option<&VerifySettings>,
) -> Result<(), CliError> {
    let today = chrono::Local::now().date_naive();
    let end_date = expected_period_end(explicit, settings, today);

    match verify_period(conn, end_date) {
        Ok(found) => {
            log::info!(
                "  {} {} view summaries for the period ending {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                found,
                end_date,
            );
            Ok(())
        }
        Err(e) => {
            log::error!(
                "  {} {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                e,
            );
            Err(CliError::verify(e.to_string()))
        }
    }
}
