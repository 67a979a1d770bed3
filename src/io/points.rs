use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use color_eyre::eyre::Result;

use crate::Float;
use crate::io::parse_to_float;

// Trajectory files and lidar scans share the same shape: comma-delimited
// rows, at least two float columns, no header. Only x and y are consumed.
fn load_point_list(file_path: &Path) -> Result<Vec<(Float,Float)>> {
    let file = File::open(file_path)?;
    let reader = BufReader::new(file);
    let mut points = Vec::<(Float,Float)>::new();

    for line in reader.lines() {
        let contents = line?;
        if contents.trim().is_empty() {
            continue;
        }
        let values = contents.split(',').map(|token| parse_to_float(token)).collect::<Vec<Float>>();
        assert!(values.len() >= 2, "point line has fewer than two columns: {}", contents);
        points.push((values[0], values[1]));
    }

    Ok(points)
}

pub fn load_trajectory(file_path: &Path) -> Result<Vec<(Float,Float)>> {
    load_point_list(file_path)
}

/// Scans are stored per lidar timestamp as `<timestamp>.csv`, loaded on
/// demand.
pub fn lidar_scan_path(lidar_dir: &Path, lidar_timestamp: u64) -> std::path::PathBuf {
    lidar_dir.join(format!("{}.csv", lidar_timestamp))
}

pub fn load_lidar_scan(file_path: &Path) -> Result<Vec<(Float,Float)>> {
    load_point_list(file_path)
}
