use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::config::{Config, LoggingConfig};
use crate::error::{Error, Result};
use crate::reader::NewsReader;
use crate::render::OutputMode;

/// Load the configuration, falling back to defaults when no file exists.
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    Config::resolve(config_path)
}

/// Fetch `source`, extract up to `limit` items and print them to stdout.
pub async fn read_feed(
    config: &Config,
    source: &str,
    limit: Option<usize>,
    mode: OutputMode,
) -> Result<()> {
    info!("Reading {} (limit: {:?}, mode: {:?})", source, limit, mode);

    let reader = NewsReader::from_config(config)?;
    let output = reader.run(source, limit, mode).await?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", output)?;
    stdout.flush()?;

    debug!("Wrote {} bytes of output", output.len());
    Ok(())
}

/// Initialize logging based on verbosity flags. Logs go to stderr.
pub fn init_logging(debug: bool, verbose: bool, logging: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_new(&logging.level)
            .map_err(|e| Error::Config(format!("Invalid log level '{}': {}", logging.level, e)))?
    };

    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_file(debug)
        .with_line_number(debug);

    let result = if logging.json_format {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| Error::Config(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized");
    Ok(())
}
