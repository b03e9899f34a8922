//! Raw acquisition adapters.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use mhd_model::DatasetId;

use crate::error::AcquisitionError;

/// Supplies the raw delimited text of a dataset.
///
/// Implementations own their timeout policy; any failure is treated by the
/// pipeline like an unusable parse.
pub trait RawSource: Send + Sync {
    /// Fetches the raw text for `dataset`.
    ///
    /// # Errors
    ///
    /// Returns [`AcquisitionError`] if the text cannot be obtained.
    fn fetch(&self, dataset: &DatasetId) -> Result<String, AcquisitionError>;
}

impl<F> RawSource for F
where
    F: Fn(&DatasetId) -> Result<String, AcquisitionError> + Send + Sync,
{
    fn fetch(&self, dataset: &DatasetId) -> Result<String, AcquisitionError> {
        self(dataset)
    }
}

/// Reads `<root>/<file name>` for each dataset.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path the dataset is read from.
    pub fn path_for(&self, dataset: &DatasetId) -> PathBuf {
        self.root.join(dataset.file_name())
    }
}

impl RawSource for DirectorySource {
    fn fetch(&self, dataset: &DatasetId) -> Result<String, AcquisitionError> {
        let path = self.path_for(dataset);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(AcquisitionError::NotFound {
                dataset: dataset.to_string(),
                path,
            }),
            Err(source) => Err(AcquisitionError::Read { path, source }),
        }
    }
}
