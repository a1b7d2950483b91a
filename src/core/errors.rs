/*!
 * Error Types
 * Centralized error handling with thiserror and miette
 *
 * The synchronization primitives deliberately have no error channel:
 * their only failure mode is permanent blocking, which is a liveness
 * bug rather than a reportable condition. Errors here cover the ambient
 * surface around the race: configuration and thread lifecycle.
 */

use miette::Diagnostic;
use thiserror::Error;

/// Configuration validation and loading errors
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("a race needs at least one team")]
    #[diagnostic(
        code(config::no_teams),
        help("Set `teams` to 1 or more in the race configuration.")
    )]
    NoTeams,

    #[error("a team needs at least one member")]
    #[diagnostic(
        code(config::no_members),
        help("Set `members` to 1 or more in the race configuration.")
    )]
    NoMembers,

    #[error("drop probability {0} is outside [0, 1]")]
    #[diagnostic(
        code(config::invalid_drop_probability),
        help("`drop_probability` is a probability; 0.0 disables baton drops.")
    )]
    InvalidDropProbability(f64),

    #[error("duration range is inverted: {min_ms} ms > {max_ms} ms")]
    #[diagnostic(
        code(config::inverted_range),
        help("Swap the bounds so the minimum does not exceed the maximum.")
    )]
    InvertedRange { min_ms: u64, max_ms: u64 },

    #[error("invalid seed value: {0}")]
    #[diagnostic(
        code(config::invalid_seed),
        help("RELAY_SEED must be an unsigned 64-bit integer.")
    )]
    InvalidSeed(String),

    #[error("roster does not match the configured race shape: {0}")]
    #[diagnostic(
        code(config::roster_mismatch),
        help("The roster must list exactly the configured teams and members per team.")
    )]
    RosterMismatch(String),

    #[error("failed to read config file {path}")]
    #[diagnostic(
        code(config::unreadable),
        help("Check that the file named by RELAY_CONFIG exists and is readable.")
    )]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    #[diagnostic(
        code(config::unparsable),
        help("The config file must be JSON matching the RaceConfig schema.")
    )]
    Unparsable {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Race lifecycle errors
#[derive(Error, Debug, Diagnostic)]
pub enum RaceError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to spawn competitor thread")]
    #[diagnostic(
        code(race::spawn_failed),
        help("The OS refused a new thread; check process limits.")
    )]
    Spawn(#[from] std::io::Error),

    #[error("competitor thread '{0}' panicked")]
    #[diagnostic(
        code(race::runner_panicked),
        help("A runner aborted mid-race; the race result is unusable.")
    )]
    RunnerPanicked(String),

    #[error("failed to encode race report")]
    #[diagnostic(code(race::report_encoding))]
    Report(#[from] serde_json::Error),
}
