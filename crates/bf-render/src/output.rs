//! Persisting finished documents.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::Result;

/// Write `document` to a kept temporary file named `bfplot-*.{extension}`.
///
/// The file survives the process so a viewer can open it afterwards.
pub fn persist_temp(document: &str, extension: &str) -> Result<PathBuf> {
    let mut file = tempfile::Builder::new()
        .prefix("bfplot-")
        .suffix(&format!(".{extension}"))
        .tempfile()?;
    file.write_all(document.as_bytes())?;
    file.flush()?;
    let (_, path) = file.keep()?;
    info!(path = %path.display(), "figure written");
    Ok(path)
}

/// Write `document` to `path`, replacing any existing file.
pub fn write_document(path: &Path, document: &str) -> Result<()> {
    std::fs::write(path, document)?;
    info!(path = %path.display(), bytes = document.len(), "figure saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persisted_file_is_kept_with_extension() {
        let path = persist_temp("<svg/>", "svg").unwrap();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("svg"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<svg/>");
        std::fs::remove_file(path).unwrap();
    }
}
