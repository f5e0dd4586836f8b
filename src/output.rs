//! Output sink: stdout or `<dir>/models.go`.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::{OutputMode, OUT_FILE_NAME};
use crate::error::{Error, Result};

pub fn write_output(bytes: &[u8], mode: &OutputMode) -> Result<()> {
    match mode {
        OutputMode::Stdout => write_to_stdout(bytes),
        OutputMode::Directory(dir) => write_to_file(bytes, dir).map(|_| ()),
    }
}

/// Write `models.go` into `dir`, creating the directory when it is missing.
/// Returns the path written.
pub fn write_to_file(bytes: &[u8], dir: &Path) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|source| Error::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let path = dir.join(OUT_FILE_NAME);
    fs::write(&path, bytes).map_err(|source| Error::WriteFile {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), bytes = bytes.len(), "wrote models");
    Ok(path)
}

pub fn write_to_stdout(bytes: &[u8]) -> Result<()> {
    write_to(&mut io::stdout().lock(), bytes)
}

fn write_to(writer: &mut impl Write, bytes: &[u8]) -> Result<()> {
    writer.write_all(bytes).map_err(Error::Stdout)?;
    writer.flush().map_err(Error::Stdout)
}
