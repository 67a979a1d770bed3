extern crate robotcar;

use clap::Parser;
use color_eyre::eyre::Result;
use std::path::PathBuf;

use robotcar::Float;
use robotcar::camera::model::CameraModel;
use robotcar::config::DatasetConfig;
use robotcar::preprocess::{process_directory, BatchParameters};

#[derive(Parser)]
#[command(about = "Preprocess and save all images")]
struct Args {
    /// Dataset configuration file
    #[arg(long, default_value = "dataset.yaml")]
    config: PathBuf,

    /// Directory containing images; overrides the configured image directory
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Directory containing the camera model; if supplied, images are
    /// undistorted before saving
    #[arg(long)]
    models_dir: Option<PathBuf>,

    /// Factor by which to scale images for the in-memory preview
    #[arg(long, default_value_t = 0.1)]
    scale: Float
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let mut config = DatasetConfig::from_file(&args.config)?;
    if let Some(dir) = args.dir {
        config.image_dir = dir;
    }
    if let Some(models_dir) = args.models_dir {
        config.models_dir = Some(models_dir);
    }
    config.validate_preprocess()?;

    let model = match &config.models_dir {
        Some(models_dir) => Some(CameraModel::from_dir(models_dir, &config.image_dir)?),
        None => None
    };

    let parameters = BatchParameters {
        image_dir: config.image_dir.clone(),
        output_dir: config.processed_image_dir.clone(),
        preview_scale: args.scale
    };

    let stats = process_directory(&parameters, model.as_ref())?;
    println!("processed {} frames, skipped {} ({} missing chunks)",
        stats.processed, stats.skipped, stats.missing_chunks.len());

    Ok(())
}
