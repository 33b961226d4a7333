//! Thumbnail cache boundary
//!
//! Thumbnails are written and deleted by the thumbnails middleware only,
//! never from a reducer.

mod disk;

pub use disk::DiskThumbnailStorage;

use async_trait::async_trait;
use bytes::Bytes;
use std::fmt;
use thiserror::Error;

/// Encoded image of a tab's content
#[derive(Clone, PartialEq, Eq)]
pub struct Thumbnail(Bytes);

impl Thumbnail {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self(data.into())
    }

    pub fn data(&self) -> &Bytes {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Thumbnail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Thumbnail({} bytes)", self.0.len())
    }
}

#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("Thumbnail I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The id cannot be used as a file name
    #[error("Invalid thumbnail id: {0:?}")]
    InvalidId(String),
}

/// Storage for tab thumbnails, keyed by session id
#[async_trait]
pub trait ThumbnailStorage: Send + Sync {
    async fn save_thumbnail(&self, id: &str, thumbnail: Thumbnail) -> Result<(), ThumbnailError>;

    /// `Ok(None)` when no thumbnail was stored for `id`
    async fn load_thumbnail(&self, id: &str) -> Result<Option<Thumbnail>, ThumbnailError>;

    /// Deleting a missing thumbnail is not an error
    async fn delete_thumbnail(&self, id: &str) -> Result<(), ThumbnailError>;

    async fn clear_thumbnails(&self) -> Result<(), ThumbnailError>;
}
