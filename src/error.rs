//! Error types for the generator pipeline.
//!
//! Every variant is terminal: the pipeline stops at the first error and the
//! binary reports it on stderr. Messages name the context only; the cause is
//! the `source()` chain. The type mapper has no variant here because it
//! cannot fail.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP request could not be sent or no response arrived.
    #[error("could not read remote spec from {url}")]
    RemoteFetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("expected status code {expected} from {url}, got {actual}")]
    UnexpectedStatus {
        url: String,
        expected: u16,
        actual: u16,
    },

    #[error("could not read response body from {url}")]
    ResponseBody {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("could not read file from {}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed schema document. `path` is the JSON path where decoding stopped.
    #[error("could not parse spec from json at {path}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not expand models template")]
    Template(#[from] tera::Error),

    /// The rendered source does not match the Go subset we emit.
    #[error("generated source is not valid Go (line {line}): {message}")]
    Format { line: usize, message: String },

    #[error("could not create output directory {}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write output file {}", .path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write to stdout")]
    Stdout(#[source] std::io::Error),
}
