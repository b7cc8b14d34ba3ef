use crate::domain::storage::{Storage, StorageKeys};
use crate::domain::{MedalRecord, ScheduleRecord};
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Stores each artifact as pretty-printed JSON at `<data_dir>/<key>.json`.
#[derive(Clone)]
pub struct FileSystemStore {
    data_dir: PathBuf,
}

impl FileSystemStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn get_path_for_key(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }

    fn ensure_dir(&self, dir: &Path) -> Result<()> {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    fn write_json_file<T: serde::Serialize + ?Sized>(&self, key: &str, data: &T) -> Result<()> {
        self.ensure_dir(&self.data_dir)?;

        let path = self.get_path_for_key(key);
        let staging = self.data_dir.join(format!(".{}.json.tmp", key));

        let mut content = serde_json::to_string_pretty(data)?;
        content.push('\n');

        fs::write(&staging, content)?;
        if let Err(e) = fs::rename(&staging, &path) {
            let _ = fs::remove_file(&staging);
            return Err(e.into());
        }
        Ok(())
    }

    fn read_json_file<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.get_path_for_key(key);
        if path.exists() {
            let content = fs::read_to_string(path)?;
            Ok(Some(serde_json::from_str(&content)?))
        } else {
            Ok(None)
        }
    }
}

impl Storage for FileSystemStore {
    fn save_medals(&self, medals: &[MedalRecord]) -> Result<()> {
        self.write_json_file(StorageKeys::MEDALS, medals)
    }

    fn load_medals(&self) -> Result<Option<Vec<MedalRecord>>> {
        self.read_json_file(StorageKeys::MEDALS)
    }

    fn save_schedule(&self, key: &str, events: &[ScheduleRecord]) -> Result<()> {
        self.write_json_file(key, events)
    }

    fn load_schedule(&self, key: &str) -> Result<Option<Vec<ScheduleRecord>>> {
        self.read_json_file(key)
    }
}
