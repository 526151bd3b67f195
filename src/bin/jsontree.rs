//! jsontree CLI Binary
//!
//! Command-line interface for building and comparing JSON trees.

use anyhow::Context;
use clap::Parser;
use jsontree::config::ConfigLoader;
use jsontree::logging::init_logging;
use jsontree::tooling::cli::{Cli, CliContext};
use std::process;

fn run(cli: &Cli) -> anyhow::Result<String> {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ConfigLoader::load().context("loading configuration")?,
    };
    cli.apply_overrides(&mut config);

    let logging = cli.logging_config(&config.logging);
    init_logging(Some(&logging)).context("initializing logging")?;

    let context = CliContext::from_config(config);
    Ok(context.execute(&cli.command)?)
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
