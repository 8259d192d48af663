//! Directory of page payloads: `<root>/<slug>.json`.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use walkdir::WalkDir;

use crate::model::WidgetDescriptor;
use crate::sources::{DescriptorSource, SourceError, parse_page_payload, validate_slug};

pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn page_path(&self, page: &str) -> PathBuf {
        self.root.join(format!("{page}.json"))
    }

    /// Slugs of every page payload directly under the root, sorted.
    pub fn pages(&self) -> Result<Vec<String>, SourceError> {
        if !self.root.is_dir() {
            return Err(SourceError::Io {
                path: self.root.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
            });
        }
        let mut pages: Vec<String> = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .flatten()
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                let path = e.path();
                if path.extension().and_then(|s| s.to_str()) != Some("json") {
                    return None;
                }
                let stem = path.file_stem()?.to_str()?;
                validate_slug(stem).ok().map(|_| stem.to_string())
            })
            .collect();
        pages.sort();
        Ok(pages)
    }
}

impl DescriptorSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    fn fetch(&self, page: &str) -> Result<Vec<WidgetDescriptor>, SourceError> {
        validate_slug(page)?;
        let path = self.page_path(page);
        if !path.is_file() {
            return Err(SourceError::PageNotFound(page.to_string()));
        }
        let content = fs::read_to_string(&path).map_err(|source| SourceError::Io {
            path: path.clone(),
            source,
        })?;
        let payload: Value = serde_json::from_str(&content)?;
        let descriptors = parse_page_payload(&payload)?;
        tracing::debug!(
            "file source: loaded {} widgets for {page} from {}",
            descriptors.len(),
            path.display()
        );
        Ok(descriptors)
    }
}
