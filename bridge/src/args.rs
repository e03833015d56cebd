use std::{
    io::Read,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "bridge", version, about = "Converts block-structured chat requests into flat chat-completions requests")]
pub struct Args {
    /// Request document to convert. Reads stdin when omitted or `-`.
    pub input: Option<PathBuf>,

    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long, env = "BRIDGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. "info" or "llm=debug".
    #[arg(long, env = "BRIDGE_LOG", default_value = "info")]
    pub log: String,

    /// Pretty-print the converted request.
    #[arg(long)]
    pub pretty: bool,
}

impl Args {
    pub fn read_input(&self) -> anyhow::Result<Vec<u8>> {
        match self.input.as_deref() {
            Some(path) if path != Path::new("-") => {
                std::fs::read(path).with_context(|| format!("Failed to read request from {}", path.display()))
            }
            _ => {
                let mut input = Vec::new();

                std::io::stdin()
                    .read_to_end(&mut input)
                    .context("Failed to read request from stdin")?;

                Ok(input)
            }
        }
    }
}
