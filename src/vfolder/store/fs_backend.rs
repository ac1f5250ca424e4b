use super::backend::StorageBackend;
use super::Catalog;
use crate::error::{Result, VfolderError};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const DATA_FILENAME: &str = "data.json";

pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(VfolderError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load_catalog(&self) -> Result<Catalog> {
        let data_file = self.root.join(DATA_FILENAME);
        if !data_file.exists() {
            return Ok(Catalog::default());
        }
        let content = fs::read_to_string(data_file).map_err(VfolderError::Io)?;
        let catalog: Catalog =
            serde_json::from_str(&content).map_err(VfolderError::Serialization)?;
        Ok(catalog)
    }

    fn save_catalog(&self, catalog: &Catalog) -> Result<()> {
        self.ensure_dir(&self.root)?;

        let data_file = self.root.join(DATA_FILENAME);
        let content = serde_json::to_string_pretty(catalog).map_err(VfolderError::Serialization)?;

        let tmp_file = self.root.join(format!(".data-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(VfolderError::Io)?;
        fs::rename(&tmp_file, &data_file).map_err(VfolderError::Io)?;

        tracing::debug!(target: "vfolder::store", path = %data_file.display(), "catalog saved");
        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.root.join(DATA_FILENAME)
    }
}
