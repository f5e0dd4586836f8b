//! Spec loader: fetch the raw document (HTTP GET or local file) and decode it.
//!
//! The whole body is read into memory before decoding. There are no retries
//! and no timeouts beyond the HTTP client's defaults.

use std::path::Path;

use reqwest::StatusCode;
use tracing::{debug, info};

use crate::config::Source;
use crate::error::{Error, Result};
use crate::path_de::from_slice_with_path;
use crate::swagger::Spec;

pub fn fetch_spec(source: &Source) -> Result<Spec> {
    match source {
        Source::Remote(url) => fetch_remote_spec(url),
        Source::Local(path) => fetch_local_spec(path),
    }
}

pub fn fetch_remote_spec(url: &str) -> Result<Spec> {
    debug!(%url, "fetching remote spec");
    let response = reqwest::blocking::get(url).map_err(|source| Error::RemoteFetch {
        url: url.to_string(),
        source,
    })?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(Error::UnexpectedStatus {
            url: url.to_string(),
            expected: StatusCode::OK.as_u16(),
            actual: status.as_u16(),
        });
    }

    let body = response.bytes().map_err(|source| Error::ResponseBody {
        url: url.to_string(),
        source,
    })?;
    info!(%url, bytes = body.len(), "fetched remote spec");
    decode_spec(&body)
}

pub fn fetch_local_spec(path: &Path) -> Result<Spec> {
    let bytes = std::fs::read(path).map_err(|source| Error::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = bytes.len(), "read local spec");
    decode_spec(&bytes)
}

pub fn decode_spec(bytes: &[u8]) -> Result<Spec> {
    let spec: Spec = from_slice_with_path(bytes)?;
    debug!(definitions = spec.definitions.len(), "decoded spec");
    Ok(spec)
}
