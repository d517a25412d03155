use std::path::PathBuf;

use anyhow::Context;
use axum::async_trait;
use bytes::Bytes;
use tracing::debug;

#[async_trait]
pub trait StorageClient: Send + Sync {
    async fn put_object(&self, key: &str, body: Bytes) -> anyhow::Result<()>;
    async fn delete_object(&self, key: &str) -> anyhow::Result<()>;
}

/// Disk-backed object store rooted at the configured upload directory.
/// Keys are relative paths like `20240215/abc.jpg` or `reports/def.pdf`.
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub async fn new(root: PathBuf) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&root)
            .await
            .context("create upload dir")?;
        Ok(Self { root })
    }
}

#[async_trait]
impl StorageClient for LocalStorage {
    async fn put_object(&self, key: &str, body: Bytes) -> anyhow::Result<()> {
        let path = self.root.join(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("create object dir")?;
        }
        tokio::fs::write(&path, &body)
            .await
            .with_context(|| format!("write {}", path.display()))?;
        debug!(key, bytes = body.len(), "object stored");
        Ok(())
    }

    async fn delete_object(&self, key: &str) -> anyhow::Result<()> {
        let path = self.root.join(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("delete {}", path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn put_and_delete_roundtrip() {
        let root = std::env::temp_dir().join(format!("vitalog-test-{}", Uuid::new_v4()));
        let storage = LocalStorage::new(root.clone())
            .await
            .expect("create storage");

        storage
            .put_object("20240101/photo.jpg", Bytes::from_static(b"jpegbytes"))
            .await
            .expect("put should succeed");
        let on_disk = tokio::fs::read(root.join("20240101/photo.jpg"))
            .await
            .expect("file exists");
        assert_eq!(on_disk, b"jpegbytes");

        storage
            .delete_object("20240101/photo.jpg")
            .await
            .expect("delete should succeed");
        assert!(!root.join("20240101/photo.jpg").exists());

        // deleting a missing key is not an error
        storage
            .delete_object("20240101/photo.jpg")
            .await
            .expect("second delete is a no-op");

        tokio::fs::remove_dir_all(&root).await.ok();
    }
}
