use log::LevelFilter;
use std::io::Write;

/// Map `-v` repetitions onto a level; warnings are always shown.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the stderr logger. `RUST_LOG` overrides the computed level. In interactive
/// mode only errors are printed unless the user asked for more, since log lines would
/// be drawn over the terminal UI.
pub fn init(verbosity: u8, interactive: bool) {
    let level = if interactive && verbosity == 0 {
        LevelFilter::Error
    } else {
        level_for(verbosity)
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                buf.timestamp_seconds(),
                record.level(),
                record.args()
            )
        })
        .parse_default_env();

    // A second init (e.g. from tests) keeps the first logger.
    let _ = builder.try_init();
}
