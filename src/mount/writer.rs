//! Artifact materialization on the local filesystem.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

/// Permission bits that may be passed to `open(2)`.
const MODE_MASK: u32 = 0o7777;

/// Write `content` to `{target_path}/{file_name}`.
///
/// The file is created with `mode` if absent and truncated if present.
/// The target directory itself is never created.
pub async fn write_artifact(
    target_path: &Path,
    file_name: &str,
    content: &[u8],
    mode: u32,
) -> io::Result<PathBuf> {
    let path = target_path.join(file_name);

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(mode & MODE_MASK)
        .open(&path)
        .await?;

    file.write_all(content).await?;
    file.flush().await?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    #[tokio::test]
    async fn test_creates_file_with_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_artifact(dir.path(), "app.json", b"{}", 0o600)
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("app.json"));
        assert_eq!(std::fs::read(&path).unwrap(), b"{}");
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[tokio::test]
    async fn test_overwrite_truncates() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("app.json"), "a much longer previous content").unwrap();

        write_artifact(dir.path(), "app.json", b"short", 0o644)
            .await
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(dir.path().join("app.json")).unwrap(),
            "short"
        );
    }

    #[tokio::test]
    async fn test_missing_target_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let err = write_artifact(&missing, "app.json", b"{}", 0o644)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
