use std::io::Write;

use anyhow::Context;
use args::Args;
use clap::Parser;
use config::Config;
use llm::Converter;

mod args;
mod logger;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init(&args.log)?;

    let config = match &args.config {
        Some(path) => {
            Config::load(path).with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    let input = args.read_input()?;
    let converter = Converter::new(config.conversion);

    let output = if args.pretty {
        converter.convert_slice_pretty(&input)
    } else {
        converter.convert_slice(&input)
    }
    .context("Failed to convert the request")?;

    log::info!("Converted request: {} bytes in, {} bytes out", input.len(), output.len());

    let mut stdout = std::io::stdout().lock();

    stdout.write_all(&output)?;
    writeln!(stdout)?;

    Ok(())
}
