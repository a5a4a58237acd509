use crate::cli::{actions::Action, commands, commands::logging::ARG_VERBOSITY, dispatch, telemetry};
use anyhow::Result;
use tracing::Level;

fn get_verbosity_level(count: u8) -> Level {
    match count {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Parse the command line, install logging and map the matches to an [`Action`].
/// # Errors
/// Returns an error if logging cannot be initialized or the arguments are inconsistent.
pub fn start() -> Result<Action> {
    let matches = commands::new().get_matches();

    let verbosity_level = matches
        .get_one::<u8>(ARG_VERBOSITY)
        .map(|&count| get_verbosity_level(count));

    telemetry::init(verbosity_level)?;

    dispatch::handler(&matches)
}
