//! Filesystem-level asset storage.
//!
//! Uploaded files are stored at `{root}/{type}/{content_id}.{ext}` and
//! addressed externally as `/uploads/{type}/{content_id}.{ext}`. Bytes are
//! written verbatim; nothing here inspects or decodes the payload.

use std::path::{Component, Path, PathBuf};

use tokio::sync::Mutex;

use folio_core::{ContentId, Error, Result};

/// URL prefix under which the upload root is served.
pub const UPLOADS_PREFIX: &str = "/uploads";

/// Filesystem manager for uploaded assets.
///
/// Writes and removals are serialized through a single mutation lock.
#[derive(Debug)]
pub struct AssetStorage {
    root: PathBuf,
    mutation: Mutex<()>,
}

impl AssetStorage {
    /// Create a new `AssetStorage` rooted at `root`.
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            mutation: Mutex::new(()),
        }
    }

    /// The upload root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `data` for `content_id` and return its external reference.
    ///
    /// The extension of the stored file is taken from `filename`
    /// (see [`asset_file_name`]). The per-type directory is created on demand.
    pub async fn store(
        &self,
        content_id: ContentId,
        type_tag: &str,
        filename: &str,
        data: &[u8],
    ) -> Result<String> {
        let file_name = asset_file_name(content_id, filename);
        let path = self.path(type_tag, &file_name)?;

        let _guard = self.mutation.lock().await;

        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }

        if let Err(e) = tokio::fs::write(&path, data).await {
            tracing::warn!("Failed to write asset {}: {e}", path.display());
            // Do not leave a truncated file behind.
            let _ = tokio::fs::remove_file(&path).await;
            return Err(e.into());
        }

        tracing::debug!(bytes = data.len(), "Stored asset at {}", path.display());
        Ok(reference(type_tag, &file_name))
    }

    /// Delete the file behind `reference`, stored under `type_tag`.
    ///
    /// A file that is already gone is not an error.
    pub async fn remove(&self, type_tag: &str, reference: &str) -> Result<()> {
        let file_name = reference.rsplit('/').next().unwrap_or(reference);
        let path = self.path(type_tag, file_name)?;

        let _guard = self.mutation.lock().await;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!("Removed asset {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Asset {} already absent", path.display());
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve the on-disk path of `file_name` in the `type_tag` namespace.
    ///
    /// Both parts must be a single plain path segment so that no asset can
    /// land outside its type directory.
    pub fn path(&self, type_tag: &str, file_name: &str) -> Result<PathBuf> {
        check_segment("content type", type_tag)?;
        check_segment("asset file name", file_name)?;
        Ok(self.root.join(type_tag).join(file_name))
    }
}

/// Derive the stored file name `{content_id}.{ext}`.
///
/// `ext` is whatever follows the last `.` in `filename`; a name without a dot
/// is used whole as the extension.
pub fn asset_file_name(content_id: ContentId, filename: &str) -> String {
    let extension = match filename.rsplit_once('.') {
        Some((_, ext)) => ext,
        None => filename,
    };
    format!("{content_id}.{extension}")
}

/// External reference for a stored asset.
fn reference(type_tag: &str, file_name: &str) -> String {
    format!("{UPLOADS_PREFIX}/{type_tag}/{file_name}")
}

fn check_segment(what: &str, segment: &str) -> Result<()> {
    let mut components = Path::new(segment).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if single_normal && !segment.contains(['/', '\\']) {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "{what} is not usable as a storage path segment: {segment:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn fixed_id() -> ContentId {
        ContentId::from_str("6f1c2c1e-8a43-4c59-9d0e-1f9f4b1f2a10").unwrap()
    }

    #[test]
    fn file_name_uses_last_extension() {
        let name = asset_file_name(fixed_id(), "holiday.photo.JPG");
        assert_eq!(name, "6f1c2c1e-8a43-4c59-9d0e-1f9f4b1f2a10.JPG");
    }

    #[test]
    fn file_name_without_dot_uses_whole_name() {
        let name = asset_file_name(fixed_id(), "thumbnail");
        assert_eq!(name, "6f1c2c1e-8a43-4c59-9d0e-1f9f4b1f2a10.thumbnail");
    }

    #[test]
    fn file_name_with_trailing_dot() {
        let name = asset_file_name(fixed_id(), "image.");
        assert_eq!(name, "6f1c2c1e-8a43-4c59-9d0e-1f9f4b1f2a10.");
    }

    #[test]
    fn path_is_namespaced_by_type() {
        let storage = AssetStorage::new(PathBuf::from("/data/uploads"));
        let path = storage.path("product", "abc.png").unwrap();
        assert_eq!(path, PathBuf::from("/data/uploads/product/abc.png"));
    }

    #[test]
    fn path_rejects_traversal() {
        let storage = AssetStorage::new(PathBuf::from("/data/uploads"));
        for bad in ["..", ".", "", "a/b", "../etc", "a\\b", "/abs"] {
            let err = storage.path(bad, "abc.png").unwrap_err();
            assert!(matches!(err, Error::Validation(_)), "accepted {bad:?}");
        }
        assert!(storage.path("blog", "x.png/../../y").is_err());
    }

    #[tokio::test]
    async fn store_writes_bytes_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let storage = AssetStorage::new(dir.path().to_path_buf());
        let id = fixed_id();
        let data = b"\x89PNG\r\n\x1a\n not really an image";

        let reference = storage.store(id, "blog", "cover.png", data).await.unwrap();
        assert_eq!(reference, format!("/uploads/blog/{id}.png"));

        let on_disk = std::fs::read(dir.path().join("blog").join(format!("{id}.png"))).unwrap();
        assert_eq!(on_disk, data);
    }

    #[tokio::test]
    async fn store_rejects_bad_type_before_touching_disk() {
        let dir = tempfile::tempdir().unwrap();
        let storage = AssetStorage::new(dir.path().join("root"));

        let err = storage
            .store(ContentId::new(), "../escape", "x.png", b"data")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(!dir.path().join("root").exists());
        assert!(!dir.path().join("escape").exists());
    }

    #[tokio::test]
    async fn store_fails_with_io_when_root_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("not-a-dir");
        std::fs::write(&root, b"occupied").unwrap();
        let storage = AssetStorage::new(root);

        let err = storage
            .store(ContentId::new(), "blog", "x.png", b"data")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[tokio::test]
    async fn remove_deletes_then_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let storage = AssetStorage::new(dir.path().to_path_buf());
        let id = ContentId::new();

        let reference = storage.store(id, "page", "hero.webp", b"bytes").await.unwrap();
        let path = storage.path("page", &format!("{id}.webp")).unwrap();
        assert!(path.exists());

        storage.remove("page", &reference).await.unwrap();
        assert!(!path.exists());

        storage.remove("page", &reference).await.unwrap();
    }
}
