use rand::{thread_rng, Rng};
use std::io::Write;
use std::path::PathBuf;

use robotcar::config::DatasetConfig;

fn temp_workspace(label: &str) -> PathBuf {
    let suffix = thread_rng().gen::<u32>();
    let path = std::env::temp_dir().join(format!("robotcar_{}_{}", label, suffix));
    std::fs::create_dir_all(&path).unwrap();
    path
}

fn config_yaml(workspace: &PathBuf) -> String {
    format!(
"dataset: \"2015-10-30-11-56-36\"
image_dir: {root}/stereo
processed_image_dir: {root}/processed
pointcloud_image_dir: {root}/pointcloud
lidar_dir: {root}/lidar
lidar_timestamps: {root}/ldmrs.timestamps
trajectory_file: {root}/vo.csv
", root = workspace.display())
}

#[test]
fn test_config_round_trip() {
    let workspace = temp_workspace("config");
    let config_path = workspace.join("dataset.yaml");
    let mut file = std::fs::File::create(&config_path).unwrap();
    file.write_all(config_yaml(&workspace).as_bytes()).unwrap();

    let config = DatasetConfig::from_file(&config_path).unwrap();
    assert_eq!(config.dataset, "2015-10-30-11-56-36");
    assert_eq!(config.image_dir, workspace.join("stereo"));
    assert!(config.models_dir.is_none());

    let _ = std::fs::remove_dir_all(&workspace);
}

#[test]
fn test_playback_validation_requires_inputs() {
    let workspace = temp_workspace("config_validate");
    let config_path = workspace.join("dataset.yaml");
    let mut file = std::fs::File::create(&config_path).unwrap();
    file.write_all(config_yaml(&workspace).as_bytes()).unwrap();

    let config = DatasetConfig::from_file(&config_path).unwrap();
    assert!(config.validate_playback().is_err());

    for dir in &["stereo", "processed", "pointcloud", "lidar"] {
        std::fs::create_dir_all(workspace.join(dir)).unwrap();
    }
    std::fs::File::create(workspace.join("ldmrs.timestamps")).unwrap();
    std::fs::File::create(workspace.join("vo.csv")).unwrap();

    assert!(config.validate_playback().is_ok());

    let _ = std::fs::remove_dir_all(&workspace);
}

#[test]
fn test_preprocess_validation_creates_output_dir() {
    let workspace = temp_workspace("config_output");
    let config_path = workspace.join("dataset.yaml");
    let mut file = std::fs::File::create(&config_path).unwrap();
    file.write_all(config_yaml(&workspace).as_bytes()).unwrap();

    let config = DatasetConfig::from_file(&config_path).unwrap();
    std::fs::create_dir_all(&config.image_dir).unwrap();

    config.validate_preprocess().unwrap();
    assert!(config.processed_image_dir.is_dir());

    let _ = std::fs::remove_dir_all(&workspace);
}
