use std::path::PathBuf;
use std::time::Instant;
use color_eyre::eyre::Result;

use crate::Float;
use crate::camera::CameraKind;
use crate::camera::model::CameraModel;
use crate::io;
use crate::io::timestamps::{load_timestamps, ChunkTracker};

pub struct BatchParameters {
    pub image_dir: PathBuf,
    pub output_dir: PathBuf,
    pub preview_scale: Float
}

#[derive(Debug,Clone,PartialEq,Eq)]
pub struct BatchStats {
    pub processed: usize,
    pub skipped: usize,
    pub missing_chunks: Vec<u32>
}

/// Walks the camera timestamps file in order, demosaics and optionally
/// undistorts every capture present on disk, and writes the result to the
/// output directory under its timestamp. Missing captures are skipped and
/// reported once per chunk transition. A scaled preview copy is produced per
/// frame but never persisted.
pub fn process_directory(parameters: &BatchParameters, model: Option<&CameraModel>) -> Result<BatchStats> {
    let camera = match model {
        Some(m) => m.camera,
        None => CameraKind::from_path(&parameters.image_dir.to_string_lossy())?
    };

    let timestamps_path = io::resolve_timestamps_path(&parameters.image_dir, camera)?;
    let records = load_timestamps(&timestamps_path)?;

    std::fs::create_dir_all(&parameters.output_dir)?;

    let mut tracker = ChunkTracker::new();
    let mut stats = BatchStats { processed: 0, skipped: 0, missing_chunks: Vec::new() };
    let start = Instant::now();

    for record in &records {
        let file_name = format!("{}.png", record.timestamp);
        let image_path = parameters.image_dir.join(&file_name);

        if !image_path.is_file() {
            if tracker.record_missing(record.chunk) {
                println!("Chunk {} not found", record.chunk);
                stats.missing_chunks.push(record.chunk);
            }
            stats.skipped += 1;
            continue;
        }
        tracker.record_found(record.chunk);

        let frame = io::load_image(&image_path, model)?;
        frame.swap_red_blue().to_rgb_image().save(parameters.output_dir.join(&file_name))?;

        let preview = frame.downsample_area(parameters.preview_scale);

        stats.processed += 1;
        let fps = stats.processed as Float / start.elapsed().as_secs_f64();
        println!("{} preview {}x{}", record.datetime(), preview.width(), preview.height());
        println!("FPS of the video is {:5.2}", fps);
    }

    Ok(stats)
}
