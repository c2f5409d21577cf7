use anyhow::Result;
use clap::Parser;
use signup_form_validator::cli;
use signup_form_validator::config::{Args, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let config = Config::from_args(args)?;
    cli::run(config).await
}

/// Log to stderr so stdout carries only protocol output; RUST_LOG wins over --log-level
fn init_logging(level: &str) {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.target(env_logger::Target::Stderr).init();
}
