extern crate image as image_rs;

use std::path::{Path, PathBuf};
use color_eyre::eyre::{eyre, Result};

use crate::Float;
use crate::camera::CameraKind;
use crate::camera::model::CameraModel;
use crate::image::{Image,ColorImage,bayer};

pub mod timestamps;
pub mod points;

pub fn parse_to_float(string: &str) -> Float {
    match string.trim().parse::<Float>() {
        Ok(value) => value,
        Err(_) => panic!("string malformed for parsing to float: {}", string)
    }
}

/// The timestamps file of a camera lives next to its image directory, either
/// one or two levels up. Both utilities resolve it through this helper so the
/// fallback order is identical everywhere.
pub fn resolve_timestamps_path(image_dir: &Path, camera: CameraKind) -> Result<PathBuf> {
    let file_name = format!("{}.timestamps", camera.name());

    let candidate = image_dir.join("..").join(&file_name);
    if candidate.is_file() {
        return Ok(candidate);
    }

    let fallback = image_dir.join("..").join("..").join(&file_name);
    if fallback.is_file() {
        return Ok(fallback);
    }

    Err(eyre!("could not find {} next to {}", file_name, image_dir.display()))
}

pub fn load_raw_image(file_path: &Path) -> Result<Image> {
    let raw = image_rs::open(file_path)?.to_luma8();
    Ok(Image::from_gray_image(&raw))
}

/// Loads and rectifies one raw capture: decode, demosaic with the pattern of
/// the camera identity, undistort when a model is supplied. The identity
/// comes from the model when present, otherwise from the image path.
pub fn load_image(image_path: &Path, model: Option<&CameraModel>) -> Result<ColorImage> {
    let camera = match model {
        Some(m) => m.camera,
        None => CameraKind::from_path(&image_path.to_string_lossy())?
    };

    let raw = load_raw_image(image_path)?;
    let demosaiced = bayer::demosaic_bilinear(&raw, camera.bayer_pattern());

    match model {
        Some(m) => Ok(m.undistort(&demosaiced)),
        None => Ok(demosaiced)
    }
}
