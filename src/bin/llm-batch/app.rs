use anyhow::{bail, Context};
use clap::Parser;
use llm_batch::{batch, config::load_config};

use crate::args::CliArgs;
use crate::logging::init_logging;
use crate::progress::ConsoleProgress;

pub async fn run() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let mut config = load_config(args.config.as_deref(), args.provider)
        .context("failed to load configuration")?;
    args.apply(&mut config);
    config.validate()?;

    let _logger = init_logging(&config.logging).context("failed to start logging")?;
    log::debug!("Run configuration: {:?}", config);

    if config.api_key().is_none() {
        bail!(
            "no API key for {}: set the {} environment variable or provider.api_key in the config file",
            config.provider.backend,
            config.provider.api_key_env
        );
    }
    let provider = batch::build_provider(&config)
        .with_context(|| format!("failed to initialise the {} client", config.provider.backend))?;

    println!("Reading: {}", config.io.input.display());
    let report = batch::run_batch(&config, provider.as_ref(), &ConsoleProgress).await?;

    println!();
    println!("{}", "=".repeat(50));
    println!(
        "SUCCESS: Generated {} rows with {} answers each ({} failed).",
        report.rows, report.attempts, report.failed_attempts
    );
    println!("Results saved to: {}", report.output.display());
    println!("{}", "=".repeat(50));
    Ok(())
}
