use super::{Thumbnail, ThumbnailError, ThumbnailStorage};
use anyhow::Result;
use async_trait::async_trait;
use browser_config::ThumbnailsConfig;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const EXTENSION: &str = "png";

/// Thumbnails stored as `<directory>/<id>.png`
#[derive(Debug, Clone)]
pub struct DiskThumbnailStorage {
    directory: PathBuf,
}

impl DiskThumbnailStorage {
    /// The directory is created lazily on the first save
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn from_config(config: &ThumbnailsConfig) -> Result<Self> {
        Ok(Self::new(config.resolve_directory()?))
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, id: &str) -> Result<PathBuf, ThumbnailError> {
        let valid = !id.is_empty()
            && id != "."
            && id != ".."
            && !id.contains(['/', '\\', '\0']);
        if !valid {
            return Err(ThumbnailError::InvalidId(id.to_string()));
        }
        Ok(self.directory.join(format!("{}.{}", id, EXTENSION)))
    }
}

#[async_trait]
impl ThumbnailStorage for DiskThumbnailStorage {
    async fn save_thumbnail(&self, id: &str, thumbnail: Thumbnail) -> Result<(), ThumbnailError> {
        let path = self.path_for(id)?;
        tokio::fs::create_dir_all(&self.directory).await?;
        tokio::fs::write(&path, thumbnail.data()).await?;
        log::debug!("Saved thumbnail {} ({} bytes)", path.display(), thumbnail.len());
        Ok(())
    }

    async fn load_thumbnail(&self, id: &str) -> Result<Option<Thumbnail>, ThumbnailError> {
        let path = self.path_for(id)?;
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Some(Thumbnail::new(data))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_thumbnail(&self, id: &str) -> Result<(), ThumbnailError> {
        let path = self.path_for(id)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                log::debug!("Deleted thumbnail {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn clear_thumbnails(&self) -> Result<(), ThumbnailError> {
        let mut entries = match tokio::fs::read_dir(&self.directory).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        let mut removed = 0;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == EXTENSION) {
                tokio::fs::remove_file(&path).await?;
                removed += 1;
            }
        }
        log::info!("Cleared {} thumbnails from {}", removed, self.directory.display());
        Ok(())
    }
}
