use std::path::PathBuf;

use tracing::debug;

use crate::domain::{
    common::entities::app_errors::CoreError,
    ingredient::{entities::TermList, ports::TermListRepository},
};

/// Reads the newline-delimited term file from disk on every call.
#[derive(Debug, Clone)]
pub struct FileTermListRepository {
    path: PathBuf,
}

impl FileTermListRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TermListRepository for FileTermListRepository {
    async fn load_terms(&self) -> Result<TermList, CoreError> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            CoreError::ResourceLoadError(format!("{}: {}", self.path.display(), e))
        })?;

        let terms = TermList::parse(&raw);
        debug!(path = %self.path.display(), terms = terms.len(), "Loaded term list");

        Ok(terms)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[tokio::test]
    async fn loads_terms_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Sugar\nHigh Fructose Corn Syrup\n\nMSG").unwrap();

        let repo = FileTermListRepository::new(file.path());
        let terms = repo.load_terms().await.unwrap();

        assert_eq!(terms.terms(), ["sugar", "high fructose corn syrup", "msg"]);
    }

    #[tokio::test]
    async fn empty_file_yields_empty_list() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let terms = FileTermListRepository::new(file.path())
            .load_terms()
            .await
            .unwrap();
        assert!(terms.is_empty());
    }

    #[tokio::test]
    async fn missing_file_is_a_resource_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileTermListRepository::new(dir.path().join("nope.txt"));

        let err = repo.load_terms().await.unwrap_err();

        assert!(matches!(err, CoreError::ResourceLoadError(msg) if msg.contains("nope.txt")));
    }
}
