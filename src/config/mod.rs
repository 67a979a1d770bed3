extern crate serde;
extern crate serde_yaml;

use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};
use color_eyre::eyre::{eyre, Result};

/// All dataset locations both utilities consume, read from a yaml file and
/// handed into the entry points explicitly. Input paths are existence-checked
/// up front instead of failing mid-stream.
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct DatasetConfig {
    pub dataset: String,
    pub image_dir: PathBuf,
    #[serde(default)]
    pub models_dir: Option<PathBuf>,
    pub processed_image_dir: PathBuf,
    pub pointcloud_image_dir: PathBuf,
    pub lidar_dir: PathBuf,
    pub lidar_timestamps: PathBuf,
    pub trajectory_file: PathBuf
}

impl DatasetConfig {

    pub fn from_file(file_path: &Path) -> Result<DatasetConfig> {
        let contents = std::fs::read_to_string(file_path)
            .map_err(|e| eyre!("could not read config {}: {}", file_path.display(), e))?;
        let config = serde_yaml::from_str::<DatasetConfig>(&contents)
            .map_err(|e| eyre!("could not parse config {}: {}", file_path.display(), e))?;
        Ok(config)
    }

    /// Preprocessing reads raw captures and writes processed frames; the
    /// output directory is created on demand.
    pub fn validate_preprocess(&self) -> Result<()> {
        ensure_dir(&self.image_dir)?;
        if let Some(models_dir) = &self.models_dir {
            ensure_dir(models_dir)?;
        }
        std::fs::create_dir_all(&self.processed_image_dir)?;
        Ok(())
    }

    /// Playback consumes preprocessing output plus the trajectory and lidar
    /// artifacts.
    pub fn validate_playback(&self) -> Result<()> {
        ensure_dir(&self.image_dir)?;
        ensure_dir(&self.processed_image_dir)?;
        ensure_dir(&self.pointcloud_image_dir)?;
        ensure_dir(&self.lidar_dir)?;
        ensure_file(&self.lidar_timestamps)?;
        ensure_file(&self.trajectory_file)?;
        Ok(())
    }
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    match path.is_dir() {
        true => Ok(()),
        false => Err(eyre!("directory does not exist: {}", path.display()))
    }
}

pub fn ensure_file(path: &Path) -> Result<()> {
    match path.is_file() {
        true => Ok(()),
        false => Err(eyre!("file does not exist: {}", path.display()))
    }
}
