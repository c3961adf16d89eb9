//! Output destinations shared by every command.

use modelscribe::Error;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Write generated text to `path`, or to stdout when no path is given.
///
/// Files are written to a temporary sibling and renamed into place, so a
/// failed write never leaves a partial file behind.
pub fn write_output(path: Option<&Path>, content: &str) -> Result<(), Error> {
    match path {
        Some(path) => write_file_atomic(path, content),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(|source| Error::OutputWrite {
                    path: "<stdout>".into(),
                    source,
                })
        }
    }
}

fn write_file_atomic(path: &Path, content: &str) -> Result<(), Error> {
    let wrap = |source: io::Error| Error::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(wrap)?;
    tmp.write_all(content.as_bytes()).map_err(wrap)?;
    tmp.flush().map_err(wrap)?;
    tmp.persist(path).map_err(|e| wrap(e.error))?;
    Ok(())
}
