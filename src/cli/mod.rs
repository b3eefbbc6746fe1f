pub mod commands;

use clap::Parser;
use crate::error::Result;
use crate::render::OutputMode;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rss-reader")]
#[command(about = "Command-line RSS reader: prints news items from a feed as text or JSON")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    /// RSS or Atom feed URL
    pub source: String,

    /// Print result as JSON in stdout
    #[arg(long)]
    pub json: bool,

    /// Limit news topics if this parameter provided
    #[arg(long)]
    pub limit: Option<usize>,

    /// Outputs verbose status messages
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(short, long)]
    pub debug: bool,

    /// Configuration file path
    #[arg(short, long, env = "RSS_READER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Handlebars template for text output
    #[arg(short, long)]
    pub template: Option<PathBuf>,
}

impl Cli {
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        }
    }

    pub async fn run(self) -> Result<()> {
        let mut config = commands::load_config(self.config.as_deref())?;
        if let Some(template) = &self.template {
            config.output.template = Some(template.clone());
        }

        commands::init_logging(self.debug, self.verbose, &config.logging)?;

        let mode = self.output_mode();
        commands::read_feed(&config, &self.source, self.limit, mode).await
    }
}
