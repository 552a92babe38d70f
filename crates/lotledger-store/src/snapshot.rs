//! JSON snapshot persistence for the four collections.
//!
//! The reference adapter: the whole dataset is serialized to one JSON file,
//! loaded at startup and saved after mutations. Storage stays an injected
//! value - callers decide the path and when to save; nothing here reaches
//! into ambient global state.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Journal, LotStore, OutputStore, ProductStore};

/// Errors raised while loading or saving a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// IO failure reading the snapshot file.
    #[error("failed to read snapshot {path}: {source}")]
    Read {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// IO failure writing the snapshot file.
    #[error("failed to write snapshot {path}: {source}")]
    Write {
        /// The path that failed to write.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The file exists but does not deserialize.
    #[error("malformed snapshot {path}: {source}")]
    Malformed {
        /// The offending file.
        path: PathBuf,
        /// The decode error.
        #[source]
        source: serde_json::Error,
    },
}

/// The four persisted collections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    /// The product registry.
    pub products: ProductStore,
    /// The lot store.
    pub lots: LotStore,
    /// Withdrawals and their lines.
    pub outputs: OutputStore,
    /// The transaction journal.
    pub journal: Journal,
}

impl Dataset {
    /// Load a dataset from a snapshot file.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let bytes = fs::read(path).map_err(|source| SnapshotError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| SnapshotError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a dataset, treating a missing file as an empty dataset.
    pub fn load_or_default(path: &Path) -> Result<Self, SnapshotError> {
        match fs::read(path) {
            Ok(bytes) => {
                serde_json::from_slice(&bytes).map_err(|source| SnapshotError::Malformed {
                    path: path.to_path_buf(),
                    source,
                })
            }
            Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(SnapshotError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Save the dataset to a snapshot file.
    ///
    /// Writes to a sibling temp file first and renames it into place, so an
    /// interrupted save never truncates the previous snapshot.
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        let write_err = |source| SnapshotError::Write {
            path: path.to_path_buf(),
            source,
        };

        let json = serde_json::to_vec_pretty(self)
            .map_err(|source| write_err(io::Error::new(io::ErrorKind::InvalidData, source)))?;

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json).map_err(&write_err)?;
        fs::rename(&tmp, path).map_err(&write_err)
    }
}
