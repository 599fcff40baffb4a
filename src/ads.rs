// src/ads.rs

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};

/// Images shown on the waiting-room screen, relative to the web root.
pub const ADS_IMAGE_DIR: &str = "ads/img";

#[derive(Debug)]
pub struct AdDisplay {
    images_dir: PathBuf,
    interval: AtomicI64,
}

impl AdDisplay {
    pub fn new(web_root: impl AsRef<Path>, interval: i64) -> Self {
        Self {
            images_dir: web_root.as_ref().join(ADS_IMAGE_DIR),
            interval: AtomicI64::new(interval),
        }
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    /// Regular files (symlinks followed) under the image directory as web
    /// paths (`ads/img/<file>`), sorted by name. A missing directory yields an
    /// empty list.
    pub async fn list_images(&self) -> io::Result<Vec<String>> {
        let dir = self.images_dir();
        let mut entries = match tokio::fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(dir = %dir.display(), "ads directory missing");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_file = match tokio::fs::metadata(&path).await {
                Ok(meta) => meta.is_file(),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    tracing::debug!(path = %path.display(), "skipping dangling link");
                    false
                }
                Err(e) => return Err(e),
            };
            if !is_file {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => {
                    tracing::debug!(name = ?raw, "skipping image with non utf-8 name");
                }
            }
        }
        names.sort();

        Ok(names
            .into_iter()
            .map(|name| format!("{ADS_IMAGE_DIR}/{name}"))
            .collect())
    }

    pub fn interval(&self) -> i64 {
        self.interval.load(Ordering::Relaxed)
    }

    pub fn set_interval(&self, seconds: i64) {
        self.interval.store(seconds, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn lists_sorted_files_relative_to_web_root() {
        let root = TempDir::new().unwrap();
        let img = root.path().join(ADS_IMAGE_DIR);
        std::fs::create_dir_all(img.join("nested")).unwrap();
        std::fs::write(img.join("b.png"), b"b").unwrap();
        std::fs::write(img.join("a.jpg"), b"a").unwrap();

        let ads = AdDisplay::new(root.path(), 10);
        let images = ads.list_images().await.unwrap();
        assert_eq!(images, vec!["ads/img/a.jpg", "ads/img/b.png"]);
    }

    #[tokio::test]
    async fn missing_directory_is_empty() {
        let root = TempDir::new().unwrap();
        let ads = AdDisplay::new(root.path(), 10);
        assert!(ads.list_images().await.unwrap().is_empty());
    }

    #[test]
    fn interval_is_mutable() {
        let ads = AdDisplay::new("web", 10);
        assert_eq!(ads.interval(), 10);
        ads.set_interval(25);
        assert_eq!(ads.interval(), 25);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn follows_symlinked_images() {
        let root = TempDir::new().unwrap();
        let img = root.path().join(ADS_IMAGE_DIR);
        std::fs::create_dir_all(&img).unwrap();
        std::fs::write(root.path().join("real.png"), b"png").unwrap();
        std::os::unix::fs::symlink("../../real.png", img.join("link.png")).unwrap();
        std::os::unix::fs::symlink("../../gone.png", img.join("dangling.png")).unwrap();

        let ads = AdDisplay::new(root.path(), 10);
        assert_eq!(ads.list_images().await.unwrap(), vec!["ads/img/link.png"]);
    }
}
