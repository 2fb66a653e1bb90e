use std::path::{Path, PathBuf};

use async_trait::async_trait;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::{pipelines::text_classification, utils::files};

use super::{DatasetError, LoadableDataset};

/// The extension of the documents picked up by the loader
pub static EXTENSION: &str = "txt";

/// A single labeled text document
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Document {
    /// Where the document was read from
    pub path: PathBuf,

    /// The file name of the document
    pub name: String,

    /// The raw document text
    pub text: String,

    /// The class name, taken from the parent directory
    pub class_label: String,
}

impl text_classification::Item for Document {
    fn name(&self) -> &str {
        &self.name
    }

    fn input(&self) -> &str {
        &self.text
    }

    fn class_label(&self) -> &str {
        &self.class_label
    }
}

/// A corpus laid out as `root/<class>/<document>.txt`
#[derive(Clone, Debug)]
pub struct Corpus {
    /// The directory the corpus was loaded from
    root: PathBuf,

    /// Documents in class-then-file order
    documents: Vec<Document>,
}

#[async_trait]
impl LoadableDataset for Corpus {
    /// Reads every `*.txt` file exactly two levels below `root`. Hidden entries are skipped.
    async fn load(root: &Path) -> Result<Self, DatasetError> {
        let mut documents = Vec::new();

        for class_dir in files::sorted_entries(root).await? {
            if is_hidden(&class_dir) || !fs::metadata(&class_dir).await?.is_dir() {
                continue;
            }

            let class_label = file_name(&class_dir);

            for path in files::sorted_entries(&class_dir).await? {
                let is_text = path.extension().is_some_and(|ext| ext == EXTENSION);

                if !is_text || is_hidden(&path) || !fs::metadata(&path).await?.is_file() {
                    continue;
                }

                let text = files::read_text(&path).await?;
                let name = file_name(&path);

                documents.push(Document::new(path, name, text, class_label.clone()));
            }
        }

        if documents.is_empty() {
            warn!("No documents found under {}", root.display());
        } else {
            debug!("Loaded {} documents from {}", documents.len(), root.display());
        }

        Ok(Self {
            root: root.to_path_buf(),
            documents,
        })
    }
}

impl Corpus {
    /// The directory the corpus was loaded from
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All documents
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// The class label of every document, in document order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(|d| d.class_label.as_str())
    }

    /// Returns the number of documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True if no documents were found
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Load an optional split; an absent path stays absent
pub async fn load_split(root: Option<&Path>) -> Result<Option<Corpus>, DatasetError> {
    match root {
        Some(root) => Ok(Some(Corpus::load(root).await?)),
        None => Ok(None),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn is_hidden(path: &Path) -> bool {
    file_name(path).starts_with('.')
}
