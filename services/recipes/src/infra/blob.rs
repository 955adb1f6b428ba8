use std::path::{Component, Path, PathBuf};

use anyhow::{Context as _, anyhow};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::repository::BlobStore;
use crate::error::RecipesServiceError;

const CHUNK_SIZE: usize = 64 * 1024;

/// Filesystem-backed blob store serving recipe images.
///
/// Writes go to `{root}/.tmp/{uuid}` chunk by chunk and are renamed into
/// `{root}/{path}` once complete, so a partially written image is never
/// visible at its public URL.
#[derive(Clone)]
pub struct FilesystemBlobStore {
    root: PathBuf,
    public_url: String,
    max_size: u64,
}

impl FilesystemBlobStore {
    pub async fn new(
        root: PathBuf,
        public_url: &str,
        max_size: u64,
    ) -> Result<Self, std::io::Error> {
        fs::create_dir_all(root.join(".tmp")).await?;
        Ok(Self {
            root,
            public_url: public_url.trim_end_matches('/').to_owned(),
            max_size,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    fn temp_path(&self) -> PathBuf {
        self.root.join(".tmp").join(uuid::Uuid::new_v4().to_string())
    }

    /// Resolve a relative blob path under the root, refusing anything that
    /// could escape it.
    fn blob_path(&self, path: &str) -> anyhow::Result<PathBuf> {
        let relative = Path::new(path);
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !safe || path.is_empty() {
            return Err(anyhow!("invalid blob path: {path}"));
        }
        Ok(self.root.join(relative))
    }

    async fn write(&self, path: &str, data: &[u8]) -> anyhow::Result<()> {
        let size = data.len() as u64;
        if size > self.max_size {
            return Err(anyhow!(
                "upload of {size} bytes exceeds limit of {} bytes",
                self.max_size
            ));
        }
        let blob_path = self.blob_path(path)?;
        let temp_path = self.temp_path();

        if let Err(e) = self.write_chunks(&temp_path, path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e);
        }
        if let Some(parent) = blob_path.parent() {
            fs::create_dir_all(parent)
                .await
                .context("create blob directory")?;
        }
        if let Err(e) = fs::rename(&temp_path, &blob_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e).context("move blob into place");
        }
        Ok(())
    }

    async fn write_chunks(&self, temp_path: &Path, path: &str, data: &[u8]) -> anyhow::Result<()> {
        let total = data.len();
        let mut file = fs::File::create(temp_path)
            .await
            .context("create temp file")?;
        let mut written = 0usize;
        for chunk in data.chunks(CHUNK_SIZE) {
            file.write_all(chunk).await.context("write chunk")?;
            written += chunk.len();
            tracing::trace!(%path, written, total, "upload progress");
        }
        file.flush().await.context("flush temp file")?;
        Ok(())
    }
}

impl BlobStore for FilesystemBlobStore {
    async fn put(&self, path: &str, data: &[u8]) -> Result<String, RecipesServiceError> {
        self.write(path, data)
            .await
            .map_err(RecipesServiceError::UploadFailed)?;
        Ok(format!("{}/{path}", self.public_url))
    }
}
