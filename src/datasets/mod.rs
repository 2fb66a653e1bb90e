use std::{fmt::Display, path::Path};

use async_trait::async_trait;

/// Folder-per-class text corpora
pub mod corpus;

pub use corpus::{load_split, Corpus, Document};

/// A dataset which can be loaded from a root directory
#[async_trait]
pub trait LoadableDataset {
    /// Load the dataset
    async fn load(root: &Path) -> Result<Self, DatasetError>
    where
        Self: std::marker::Sized;
}

/// The corpus splits
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Split {
    /// Training split, required
    Train,

    /// Validation split
    Val,

    /// Test split
    Test,
}

impl Split {
    /// Get the unique string token that identifies this split
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Val => "val",
            Split::Test => "test",
        }
    }
}

impl Display for Split {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Dataset Error
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    /// A directory or file could not be read, or was not valid UTF-8
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A required split has no documents
    #[error("no documents found under {0}")]
    Empty(String),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_split_names() {
        let names: Vec<_> = [Split::Train, Split::Val, Split::Test]
            .iter()
            .map(ToString::to_string)
            .collect();

        assert_eq!(names, ["train", "val", "test"]);
    }
}
