//! Minimal CLI: swagger definitions → models.go
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use crate::config::{Config, OutputMode, Source, DEFAULT_OUTPUT_DIR, DEFAULT_SOURCE};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate Go model structs from the definitions of a swagger document
#[derive(Parser, Debug)]
#[command(name = "swagger-structs", version)]
pub struct CommandLineInterface {
    /// write models to this directory (e.g. --output ./here/models)
    #[arg(long, value_name = "PATH", default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// print to stdout instead of writing a file
    #[arg(long, default_value_t = false)]
    std: bool,

    /// swagger source: a local file or an http(s) url
    #[arg(long, value_name = "URL", default_value = DEFAULT_SOURCE)]
    source: String,

    /// more log output on stderr (-v info, -vv debug, -vvv trace); RUST_LOG wins when set
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        let output = if self.std {
            OutputMode::Stdout
        } else {
            OutputMode::Directory(self.output.clone())
        };
        Config { source: Source::parse(&self.source), output }
    }

    pub fn run(&self) -> anyhow::Result<()> {
        init_tracing(self.verbose);
        let config = self.config();
        crate::run(&config)
            .with_context(|| format!("failed to generate models from {}", config.source))
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string());
    let filter = EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    // stdout carries the generated source with --std
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CommandLineInterface {
        CommandLineInterface::try_parse_from(std::iter::once("swagger-structs").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn defaults_match_the_documented_flags() {
        let config = parse(&[]).config();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn std_flag_switches_to_stdout() {
        let config = parse(&["--std", "--output", "ignored"]).config();
        assert_eq!(config.output, OutputMode::Stdout);
    }

    #[test]
    fn source_and_output_are_passed_through() {
        let config = parse(&["--source", "https://example.com/swagger.json", "--output", "gen/models"]).config();
        assert_eq!(config.source, Source::Remote("https://example.com/swagger.json".into()));
        assert_eq!(config.output, OutputMode::Directory(PathBuf::from("gen/models")));
    }

    #[test]
    fn verbosity_counts() {
        assert_eq!(parse(&["-vv"]).verbose, 2);
    }

    #[test]
    fn unknown_flags_are_rejected() {
        let parsed = CommandLineInterface::try_parse_from(["swagger-structs", "--nope"]);
        assert!(parsed.is_err());
    }
}
