use std::io;
use std::path::PathBuf;
use tokio::fs;

/// A durable key-value store keeping one JSON file per key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Storage {
    directory: PathBuf,
}

impl Storage {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Reads the record under `key`, if any.
    pub async fn read(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path(key)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Replaces the record under `key`.
    ///
    /// Readers either see the previous record or the new one, never a
    /// partial write.
    pub async fn write(&self, key: &str, value: &str) -> io::Result<()> {
        let path = self.path(key);
        let staging = path.with_extension("json.tmp");

        fs::create_dir_all(&self.directory).await?;
        fs::write(&staging, value).await?;
        fs::rename(&staging, &path).await
    }

    fn path(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{key}.json"))
    }
}
