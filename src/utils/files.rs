use std::path::{Path, PathBuf};

use tokio::{fs, io};

/// Read a whole file as UTF-8 text, naming the path in any error
pub async fn read_text(path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
        .await
        .map_err(|e| io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))
}

/// List the entries of a directory, sorted by path
pub async fn sorted_entries(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut reader = fs::read_dir(dir)
        .await
        .map_err(|e| io::Error::new(e.kind(), format!("{}: {}", dir.display(), e)))?;
    let mut entries = Vec::new();

    while let Some(entry) = reader.next_entry().await? {
        entries.push(entry.path());
    }

    entries.sort();

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn test_entries_are_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.txt", "c.txt", "a.txt"] {
            std::fs::write(dir.path().join(name), "text").unwrap();
        }

        let entries = sorted_entries(dir.path()).await.unwrap();
        let names: Vec<_> = entries
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, ["a.txt", "b.txt", "c.txt"]);
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let err = read_text(&path).await.unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("bad.txt"));
    }
}
