//! Run configuration, built once from the command line and read-only after.

use std::fmt;
use std::path::PathBuf;

/// File name written inside the output directory.
pub const OUT_FILE_NAME: &str = "models.go";

pub const DEFAULT_OUTPUT_DIR: &str = "./models";
pub const DEFAULT_SOURCE: &str = "swagger.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub source: Source,
    pub output: OutputMode,
}

/// Where the swagger document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Remote(String),
    Local(PathBuf),
}

impl Source {
    /// Anything starting with `http` is fetched over the network, everything
    /// else is a file path.
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http") {
            Source::Remote(raw.to_string())
        } else {
            Source::Local(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Remote(url) => f.write_str(url),
            Source::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    Stdout,
    /// Write `OUT_FILE_NAME` into this directory, creating it if needed.
    Directory(PathBuf),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: Source::parse(DEFAULT_SOURCE),
            output: OutputMode::Directory(PathBuf::from(DEFAULT_OUTPUT_DIR)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_prefix_selects_remote() {
        assert_eq!(
            Source::parse("https://petstore.swagger.io/v2/swagger.json"),
            Source::Remote("https://petstore.swagger.io/v2/swagger.json".into())
        );
        assert_eq!(Source::parse("http://localhost/x"), Source::Remote("http://localhost/x".into()));
    }

    #[test]
    fn prefix_check_is_literal() {
        // no scheme parsing: a local file that happens to start with "http" is remote
        assert!(matches!(Source::parse("httpdocs/swagger.json"), Source::Remote(_)));
        assert!(matches!(Source::parse("HTTP://upper"), Source::Local(_)));
        assert!(matches!(Source::parse("./api/swagger.json"), Source::Local(_)));
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.source, Source::Local(PathBuf::from("swagger.json")));
        assert_eq!(config.output, OutputMode::Directory(PathBuf::from("./models")));
    }
}
