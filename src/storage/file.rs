use super::{Storage, StorageError};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Storage that keeps each key in its own file under a directory.
///
/// Writes go to a sibling temp file which is then renamed over the target, so
/// a reader sees either the previous blob or the new one, never a torn write.
/// The directory is created on first write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Maps a storage key to its file.
    ///
    /// `[A-Za-z0-9-]` is kept; every other byte, `_` included, becomes `_XX`
    /// in uppercase hex. Distinct keys get distinct files and no key can
    /// escape the directory: `@protopasta_cart` is `_40protopasta_5Fcart.json`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' {
                name.push(char::from(byte));
            } else {
                name.push_str(&format!("_{:02X}", byte));
            }
        }
        self.dir.join(format!("{}.json", name))
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => {
                debug!(path = %path.display(), bytes = contents.len(), "Read");
                Ok(Some(contents))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;
        debug!(path = %path.display(), bytes = value.len(), "Wrote");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert_eq!(storage.get_item("@protopasta_cart").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));

        storage.set_item("@protopasta_cart", "[]").await.unwrap();
        storage.set_item("@protopasta_cart", "[1]").await.unwrap();

        assert_eq!(
            storage.get_item("@protopasta_cart").await.unwrap(),
            Some("[1]".to_string())
        );
        assert!(!storage
            .path_for("@protopasta_cart")
            .with_extension("json.tmp")
            .exists());
    }

    #[test]
    fn test_keys_stay_inside_dir() {
        let storage = FileStorage::new("/data");
        let path = storage.path_for("../../etc/passwd");
        assert_eq!(
            path,
            PathBuf::from("/data/_2E_2E_2F_2E_2E_2Fetc_2Fpasswd.json")
        );
        assert_eq!(
            storage.path_for("@protopasta_cart"),
            PathBuf::from("/data/_40protopasta_5Fcart.json")
        );
    }

    #[tokio::test]
    async fn test_similar_keys_do_not_share_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert_ne!(storage.path_for("@cart"), storage.path_for("_cart"));
        assert_ne!(storage.path_for("a.b"), storage.path_for("a_b"));

        storage.set_item("@cart", "[1]").await.unwrap();
        storage.set_item("_cart", "[2]").await.unwrap();

        assert_eq!(storage.get_item("@cart").await.unwrap(), Some("[1]".to_string()));
        assert_eq!(storage.get_item("_cart").await.unwrap(), Some("[2]".to_string()));
    }
}
