//! log4rs setup.

use crate::config::DEFAULT_LOG_FILE;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::filter::threshold::ThresholdFilter;
use std::error::Error;
use std::path::Path;

const FILE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l:5} {t} - {m}{n}";
const STDERR_PATTERN: &str = "{l} - {m}{n}";

/// Initialise logging from `config_file`. When it does not exist, log `info`
/// and above to [`DEFAULT_LOG_FILE`] and `warn` and above to stderr.
///
/// Logging problems are reported on stderr and never stop the run.
pub fn init(config_file: &str) {
    if Path::new(config_file).exists() {
        match log4rs::init_file(config_file, Default::default()) {
            Ok(()) => return,
            Err(e) => eprintln!("Error initializing log4rs from {config_file}: {e}"),
        }
    }
    let initialised = default_config(Path::new(DEFAULT_LOG_FILE))
        .and_then(|config| log4rs::init_config(config).map_err(Into::into));
    if let Err(e) = initialised {
        eprintln!("Error initializing default logging: {e}");
    }
}

fn default_config(log_file: &Path) -> Result<Config, Box<dyn Error>> {
    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(FILE_PATTERN)))
        .build(log_file)?;
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(STDERR_PATTERN)))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("file", Box::new(file)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Warn)))
                .build("stderr", Box::new(stderr)),
        )
        .build(
            Root::builder()
                .appender("file")
                .appender("stderr")
                .build(LevelFilter::Info),
        )?;
    Ok(config)
}
