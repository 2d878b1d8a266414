use std::io::{self, Write};

use env_logger::{Builder, Target, fmt::Formatter};
use log::{Level, LevelFilter};

/// Install a compact stderr logger.  `RUST_LOG` still overrides `level`.
pub fn init_logger(level: LevelFilter, timestamps: bool) -> io::Result<()> {
    let mut builder = Builder::new();
    builder
        .filter_level(level)
        .parse_default_env()
        .write_style(env_logger::WriteStyle::Never)
        .target(Target::Stderr)
        .format(move |buf: &mut Formatter, record| {
            if timestamps {
                write!(buf, "{} ", buf.timestamp_millis())?;
            }
            writeln!(buf, "{:5} {}", level_tag(record.level()), record.args())
        });

    builder.try_init().map_err(io::Error::other)
}

/// `-q` → warnings only, default → info, `-v` → debug, `-vv` → trace.
pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::Warn,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    }
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
