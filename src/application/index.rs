//! Regenerate index use case

use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::audio::TargetFormat;
use crate::domain::library::ListingDocument;

use super::ports::{Library, StorageError};

/// Errors from index regeneration
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Failed to regenerate index: {0}")]
    Storage(#[from] StorageError),
}

/// Output from a written regeneration
#[derive(Debug, Clone)]
pub struct IndexOutput {
    pub document: ListingDocument,
    pub index_path: PathBuf,
}

/// Scan the library and build a fresh listing. No caching between calls.
pub async fn build_listing<L>(library: &L, target: TargetFormat) -> Result<ListingDocument, IndexError>
where
    L: Library + ?Sized,
{
    let projects = library.scan(target).await?;
    let document = ListingDocument::new(projects);
    debug!(
        projects = document.projects().len(),
        files = document.file_count(),
        "listing built"
    );
    Ok(document)
}

/// Build the listing and write it to `index_file` under the library root
pub async fn write_listing<L>(
    library: &L,
    target: TargetFormat,
    index_file: &str,
) -> Result<IndexOutput, IndexError>
where
    L: Library + ?Sized,
{
    let document = build_listing(library, target).await?;
    let index_path = library
        .write_listing(index_file, &document.to_markdown())
        .await?;
    info!(path = %index_path.display(), files = document.file_count(), "index written");
    Ok(IndexOutput {
        document,
        index_path,
    })
}

/// Full-rebuild listing of the converted files, grouped by project
pub struct RegenerateIndexUseCase<L>
where
    L: Library,
{
    library: L,
    target: TargetFormat,
    index_file: String,
}

impl<L> RegenerateIndexUseCase<L>
where
    L: Library,
{
    /// Create a new use case instance
    pub fn new(library: L, target: TargetFormat, index_file: impl Into<String>) -> Self {
        Self {
            library,
            target,
            index_file: index_file.into(),
        }
    }

    /// Render the listing without touching the index file
    pub async fn execute(&self) -> Result<ListingDocument, IndexError> {
        build_listing(&self.library, self.target).await
    }

    /// Render the listing and replace the index file
    pub async fn execute_and_write(&self) -> Result<IndexOutput, IndexError> {
        write_listing(&self.library, self.target, &self.index_file).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::domain::job::OutputPath;
    use crate::domain::library::ProjectListing;

    struct MockLibrary {
        projects: Vec<ProjectListing>,
        written: Mutex<Vec<(String, String)>>,
    }

    impl MockLibrary {
        fn new(projects: Vec<ProjectListing>) -> Self {
            Self {
                projects,
                written: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Library for MockLibrary {
        fn root(&self) -> &Path {
            Path::new("/library")
        }

        async fn reserve(&self, output: &OutputPath) -> Result<PathBuf, StorageError> {
            Ok(output.resolve(self.root()))
        }

        async fn discard(&self, _output: &OutputPath) -> Result<(), StorageError> {
            Ok(())
        }

        fn abandon(&self, _output: &OutputPath) {}

        async fn size_of(&self, _output: &OutputPath) -> Result<u64, StorageError> {
            Ok(0)
        }

        async fn scan(&self, _target: TargetFormat) -> Result<Vec<ProjectListing>, StorageError> {
            Ok(self.projects.clone())
        }

        async fn write_listing(
            &self,
            file_name: &str,
            content: &str,
        ) -> Result<PathBuf, StorageError> {
            self.written
                .lock()
                .unwrap()
                .push((file_name.to_string(), content.to_string()));
            Ok(self.root().join(file_name))
        }
    }

    fn projects() -> Vec<ProjectListing> {
        vec![
            ProjectListing::new("zeta", vec!["b.mp3".to_string(), "a.mp3".to_string()]),
            ProjectListing::new("alpha", vec![]),
        ]
    }

    #[tokio::test]
    async fn execute_sorts_listing() {
        let use_case = RegenerateIndexUseCase::new(
            MockLibrary::new(projects()),
            TargetFormat::Mp3,
            "INDEX.md",
        );

        let doc = use_case.execute().await.unwrap();
        assert_eq!(doc.projects()[0].name, "alpha");
        assert_eq!(doc.projects()[1].files, vec!["a.mp3", "b.mp3"]);
    }

    #[tokio::test]
    async fn execute_is_idempotent() {
        let use_case = RegenerateIndexUseCase::new(
            MockLibrary::new(projects()),
            TargetFormat::Mp3,
            "INDEX.md",
        );

        let first = use_case.execute().await.unwrap();
        let second = use_case.execute().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_markdown(), second.to_markdown());
    }

    #[tokio::test]
    async fn execute_does_not_write() {
        let library = MockLibrary::new(projects());
        build_listing(&library, TargetFormat::Mp3).await.unwrap();
        assert!(library.written.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn execute_and_write_writes_markdown() {
        let library = MockLibrary::new(projects());
        let output = write_listing(&library, TargetFormat::Mp3, "LIST.md")
            .await
            .unwrap();

        assert_eq!(output.index_path, PathBuf::from("/library/LIST.md"));
        let written = library.written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].0, "LIST.md");
        assert_eq!(written[0].1, output.document.to_markdown());
    }
}
