//! # Catalog Loader
//!
//! One-shot read of the catalog document at startup.
//!
//! ## Startup Contract
//! The catalog load is the only piece of startup I/O, and the UI must not
//! become interactive until it resolves. On failure the shell stays in a
//! non-interactive error state (here: the process reports the error and
//! exits); there is no automatic retry.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use magnate_core::{Catalog, CatalogDocument};

/// Catalog load failures. Fatal to interactivity.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The document could not be read from disk.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document was read but is not a valid catalog.
    #[error("failed to parse catalog document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Reads and translates the catalog document.
pub async fn load_catalog(path: &Path) -> Result<Catalog, LoadError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let doc: CatalogDocument = serde_json::from_str(&raw)?;
    let catalog = Catalog::from_document(doc);

    info!(
        path = %path.display(),
        personas = catalog.personas().len(),
        items = catalog.items().len(),
        "catalog loaded"
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const VALID: &str = r#"{
        "billionaires": [{"id": "musk", "name": "Elon Musk", "money": 244000000000}],
        "items": [{"id": "yacht", "title": "Luxury yacht", "price": 300000000}],
        "rates": {"USD": 1, "UZS": 12500}
    }"#;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_loads_valid_document() {
        let file = write_temp(VALID);
        let catalog = load_catalog(file.path()).await.unwrap();

        assert_eq!(catalog.personas().len(), 1);
        assert_eq!(catalog.items().len(), 1);
        assert!(catalog.persona("musk").is_some());
    }

    #[tokio::test]
    async fn test_malformed_document_is_parse_error() {
        let file = write_temp("{ not json");
        let err = load_catalog(file.path()).await.unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let err = load_catalog(Path::new("/definitely/not/here.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
