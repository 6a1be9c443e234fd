//! Writing the fetched rate to the output artifact.
//!
//! The line goes to a temporary file next to the target and is renamed into
//! place, so the target either keeps its previous content or holds the whole
//! new line.
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::result::Result;

/// The exact content written for `bid`.
pub fn format_rate_line(bid: &str) -> String {
    format!("Dollar: {}", bid)
}

/// Replace the file at `path` with `Dollar: <bid>`.
pub fn write_rate_line(path: &Path, bid: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(format_rate_line(bid).as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use std::fs;

    #[test]
    fn writes_exactly_one_line_without_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cotacao.txt");

        write_rate_line(&path, "5.4321").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Dollar: 5.4321");
    }

    #[test]
    fn replaces_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cotacao.txt");
        fs::write(&path, "Dollar: 1.0000 and some stale trailing text").unwrap();

        write_rate_line(&path, "5.4321").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Dollar: 5.4321");
    }

    #[test]
    fn missing_directory_is_an_output_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/cotacao.txt");

        let err = write_rate_line(&path, "5.4321").unwrap_err();

        assert!(matches!(err, ClientError::OutputFailed(_)));
        assert!(!path.exists());
    }
}
