use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::manifest::{DataManifest, MANIFEST_VERSION};

pub const MANIFEST_FILE_NAME: &str = "dossier.manifest.json";

/// A directory of dataset files plus the manifest that locates them.
#[derive(Debug, Clone)]
pub struct DataPackage {
    root: PathBuf,
    manifest: DataManifest,
}

#[derive(Debug)]
pub enum DataPackageError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    UnsupportedVersion { found: String },
}

impl fmt::Display for DataPackageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataPackageError::Io(err) => write!(f, "I/O error: {err}"),
            DataPackageError::Parse(err) => write!(f, "Manifest parse error: {err}"),
            DataPackageError::UnsupportedVersion { found } => {
                write!(f, "Unsupported manifest version: {found}")
            }
        }
    }
}

impl std::error::Error for DataPackageError {}

/// Raw bytes of every dataset file, read in manifest order.
#[derive(Debug, Clone)]
pub struct PackageFiles {
    pub entries: Vec<PackageFile>,
}

#[derive(Debug, Clone)]
pub struct PackageFile {
    pub dataset: &'static str,
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

#[derive(Debug)]
pub struct FileReadError {
    pub dataset: &'static str,
    pub path: PathBuf,
    pub source: std::io::Error,
}

impl fmt::Display for FileReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to read {} ({}): {}",
            self.dataset,
            self.path.display(),
            self.source
        )
    }
}

impl std::error::Error for FileReadError {}

impl DataPackage {
    /// Opens `root`. The manifest file is optional; without it the default
    /// dataset layout is assumed.
    pub fn load(root: impl AsRef<Path>) -> Result<Self, DataPackageError> {
        let root = root.as_ref().to_path_buf();
        let manifest_path = root.join(MANIFEST_FILE_NAME);
        let manifest = match fs::read_to_string(&manifest_path) {
            Ok(payload) => serde_json::from_str(&payload).map_err(DataPackageError::Parse)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => DataManifest::new(),
            Err(err) => return Err(DataPackageError::Io(err)),
        };
        Self::with_manifest(root, manifest)
    }

    pub fn with_manifest(
        root: impl AsRef<Path>,
        manifest: DataManifest,
    ) -> Result<Self, DataPackageError> {
        if manifest.version != MANIFEST_VERSION {
            return Err(DataPackageError::UnsupportedVersion {
                found: manifest.version,
            });
        }
        Ok(Self {
            root: root.as_ref().to_path_buf(),
            manifest,
        })
    }

    pub fn manifest(&self) -> &DataManifest {
        &self.manifest
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reads every dataset file. Stops at the first file that cannot be read.
    pub fn read_files(&self) -> Result<PackageFiles, FileReadError> {
        let mut entries = Vec::with_capacity(11);
        for (dataset, rel) in self.manifest.files.entries() {
            let path = self.root.join(rel);
            let bytes = fs::read(&path).map_err(|source| FileReadError {
                dataset,
                path: path.clone(),
                source,
            })?;
            entries.push(PackageFile {
                dataset,
                path,
                bytes,
            });
        }
        Ok(PackageFiles { entries })
    }
}

impl PackageFiles {
    pub fn get(&self, dataset: &str) -> Option<&PackageFile> {
        self.entries.iter().find(|e| e.dataset == dataset)
    }

    /// Content hash over all files (dataset label, length and bytes, in
    /// manifest order), hex encoded.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for entry in &self.entries {
            hasher.update(entry.dataset.as_bytes());
            hasher.update(&(entry.bytes.len() as u64).to_le_bytes());
            hasher.update(&entry.bytes);
        }
        hasher.finalize().to_hex().to_string()
    }
}
