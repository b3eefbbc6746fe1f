use std::process;
use clap::Parser;

use rss_reader::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // A missing .env file is not an error.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = cli.run().await {
        tracing::debug!(code = e.error_code(), user_error = e.is_user_error(), "Run failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
