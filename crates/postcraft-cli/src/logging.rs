//! Logger setup for the binary.

use log::LevelFilter;

/// Level for a `-v` count: warnings by default, debug with `-v`, trace with `-vv`.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initialize `env_logger`. `RUST_LOG`, when set, overrides the verbosity flag.
pub fn init(verbosity: u8) {
    let _ = env_logger::Builder::new()
        .filter_level(level_for(verbosity))
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}
