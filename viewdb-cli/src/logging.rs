//! Logger set-up for the CLI.

use std::io::Write;

use log::LevelFilter;

/// Install the global logger.
///
/// Normal output is bare messages at info level. `--quiet` keeps warnings
/// and errors only; `--verbose` adds debug messages with timestamps.
/// `RUST_LOG` overrides both.
pub(crate) fn init(quiet: bool, verbose: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_default_env();

    if verbose {
        builder.format_timestamp_millis().format_target(false);
    } else {
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    }

    // A second init (e.g. in tests) leaves the first logger in place.
    let _ = builder.try_init();
}
