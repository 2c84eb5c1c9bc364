//! Filesystem library adapter

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, OpenOptions};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::application::ports::{Library, StorageError};
use crate::domain::audio::TargetFormat;
use crate::domain::job::OutputPath;
use crate::domain::library::ProjectListing;

/// Library rooted at a directory; one subdirectory per project
pub struct FsLibrary {
    root: PathBuf,
}

impl FsLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn write_failed(path: &Path, e: std::io::Error) -> StorageError {
        StorageError::WriteFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        }
    }

    fn read_failed(path: &Path, e: std::io::Error) -> StorageError {
        StorageError::ReadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        }
    }

    /// Finished outputs in one project directory, unsorted
    async fn scan_project(dir: &Path, extension: &str) -> Result<Vec<String>, StorageError> {
        let mut files = Vec::new();
        let mut entries = fs::read_dir(dir)
            .await
            .map_err(|e| Self::read_failed(dir, e))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| Self::read_failed(dir, e))?
        {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }

            let matches_ext = Path::new(&name)
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(extension));
            if !matches_ext {
                continue;
            }

            let metadata = entry
                .metadata()
                .await
                .map_err(|e| Self::read_failed(&entry.path(), e))?;
            // Zero-length files are reservations still being transcoded
            if metadata.is_file() && metadata.len() > 0 {
                files.push(name);
            }
        }

        Ok(files)
    }
}

#[async_trait]
impl Library for FsLibrary {
    fn root(&self) -> &Path {
        &self.root
    }

    async fn reserve(&self, output: &OutputPath) -> Result<PathBuf, StorageError> {
        let dir = self.root.join(output.project().as_str());
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| StorageError::CreateDirFailed {
                path: dir.display().to_string(),
                message: e.to_string(),
            })?;

        let path = output.resolve(&self.root);
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| {
                if e.kind() == ErrorKind::AlreadyExists {
                    StorageError::AlreadyExists(output.to_string())
                } else {
                    Self::write_failed(&path, e)
                }
            })?;

        debug!(path = %path.display(), "output reserved");
        Ok(path)
    }

    async fn discard(&self, output: &OutputPath) -> Result<(), StorageError> {
        let path = output.resolve(&self.root);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::write_failed(&path, e)),
        }
    }

    fn abandon(&self, output: &OutputPath) {
        let path = output.resolve(&self.root);
        match std::fs::remove_file(&path) {
            Ok(()) => debug!(path = %path.display(), "abandoned output removed"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(path = %path.display(), error = %e, "failed to remove abandoned output"),
        }
    }

    async fn size_of(&self, output: &OutputPath) -> Result<u64, StorageError> {
        let path = output.resolve(&self.root);
        let metadata = fs::metadata(&path)
            .await
            .map_err(|e| Self::read_failed(&path, e))?;
        Ok(metadata.len())
    }

    async fn scan(&self, target: TargetFormat) -> Result<Vec<ProjectListing>, StorageError> {
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Self::read_failed(&self.root, e)),
        };

        let mut projects = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| Self::read_failed(&self.root, e))?
        {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            let is_dir = entry
                .file_type()
                .await
                .map_err(|e| Self::read_failed(&entry.path(), e))?
                .is_dir();
            if !is_dir {
                continue;
            }

            let files = Self::scan_project(&entry.path(), target.extension()).await?;
            projects.push(ProjectListing::new(name, files));
        }

        Ok(projects)
    }

    async fn write_listing(&self, file_name: &str, content: &str) -> Result<PathBuf, StorageError> {
        let target = self.root.join(file_name);
        if file_name.is_empty() || file_name.contains(['/', '\\']) || file_name.starts_with('.') {
            return Err(StorageError::WriteFailed {
                path: target.display().to_string(),
                message: "listing filename must be a plain file name".to_string(),
            });
        }

        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StorageError::CreateDirFailed {
                path: self.root.display().to_string(),
                message: e.to_string(),
            })?;

        // Write beside the target then rename, so readers never see half a file
        let temp = self.root.join(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));
        fs::write(&temp, content)
            .await
            .map_err(|e| Self::write_failed(&temp, e))?;

        if let Err(e) = fs::rename(&temp, &target).await {
            let _ = fs::remove_file(&temp).await;
            return Err(Self::write_failed(&target, e));
        }

        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audio::SourceFilename;
    use crate::domain::project::ProjectLabel;
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    fn output(project: &str, name: &str, secs: u32) -> OutputPath {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, secs).unwrap();
        OutputPath::derive(
            &ProjectLabel::parse(project).unwrap(),
            &SourceFilename::parse(name).unwrap(),
            TargetFormat::Mp3,
            &at,
        )
    }

    #[tokio::test]
    async fn reserve_creates_project_dir_and_empty_file() {
        let dir = tempdir().unwrap();
        let library = FsLibrary::new(dir.path());
        let out = output("kitabo", "song.wav", 1);

        let path = library.reserve(&out).await.unwrap();

        assert!(path.starts_with(dir.path().join("kitabo")));
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
    }

    #[tokio::test]
    async fn reserve_is_exclusive() {
        let dir = tempdir().unwrap();
        let library = FsLibrary::new(dir.path());
        let out = output("kitabo", "song.wav", 1);

        library.reserve(&out).await.unwrap();
        let err = library.reserve(&out).await.unwrap_err();

        assert!(matches!(err, StorageError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn discard_tolerates_missing_file() {
        let dir = tempdir().unwrap();
        let library = FsLibrary::new(dir.path());
        let out = output("kitabo", "song.wav", 1);

        library.discard(&out).await.unwrap();
        library.reserve(&out).await.unwrap();
        library.discard(&out).await.unwrap();
        assert!(!out.resolve(dir.path()).exists());
    }

    #[tokio::test]
    async fn abandon_removes_partial_output() {
        let dir = tempdir().unwrap();
        let library = FsLibrary::new(dir.path());
        let out = output("kitabo", "song.wav", 1);
        let path = library.reserve(&out).await.unwrap();
        std::fs::write(&path, b"partial").unwrap();

        library.abandon(&out);
        assert!(!path.exists());
        // Second call finds nothing and stays quiet
        library.abandon(&out);
    }

    #[tokio::test]
    async fn size_of_reports_length() {
        let dir = tempdir().unwrap();
        let library = FsLibrary::new(dir.path());
        let out = output("kitabo", "song.wav", 1);
        let path = library.reserve(&out).await.unwrap();
        std::fs::write(&path, b"ID3data").unwrap();

        assert_eq!(library.size_of(&out).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn scan_missing_root_is_empty() {
        let dir = tempdir().unwrap();
        let library = FsLibrary::new(dir.path().join("missing"));
        assert!(library.scan(TargetFormat::Mp3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn scan_filters_by_extension_and_skips_hidden() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("kitabo/nested")).unwrap();
        std::fs::create_dir_all(root.join(".cache")).unwrap();
        std::fs::create_dir_all(root.join("empty")).unwrap();
        std::fs::write(root.join("kitabo/a.mp3"), b"x").unwrap();
        std::fs::write(root.join("kitabo/B.MP3"), b"x").unwrap();
        std::fs::write(root.join("kitabo/notes.txt"), b"x").unwrap();
        std::fs::write(root.join("kitabo/pending.mp3"), b"").unwrap();
        std::fs::write(root.join("kitabo/nested/deep.mp3"), b"x").unwrap();
        std::fs::write(root.join(".cache/c.mp3"), b"x").unwrap();
        std::fs::write(root.join("INDEX.md"), b"# old").unwrap();

        let library = FsLibrary::new(root);
        let mut projects = library.scan(TargetFormat::Mp3).await.unwrap();
        projects.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].name, "empty");
        assert!(projects[0].files.is_empty());
        assert_eq!(projects[1].name, "kitabo");
        let mut files = projects[1].files.clone();
        files.sort();
        assert_eq!(files, vec!["B.MP3", "a.mp3"]);
    }

    #[tokio::test]
    async fn write_listing_replaces_file() {
        let dir = tempdir().unwrap();
        let library = FsLibrary::new(dir.path().join("lib"));

        let path = library.write_listing("INDEX.md", "first").await.unwrap();
        library.write_listing("INDEX.md", "second").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
        let leftovers: Vec<_> = std::fs::read_dir(dir.path().join("lib"))
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn write_listing_rejects_nested_name() {
        let dir = tempdir().unwrap();
        let library = FsLibrary::new(dir.path());
        assert!(library.write_listing("../escape.md", "x").await.is_err());
        assert!(library.write_listing("", "x").await.is_err());
    }
}
