use color_eyre::eyre::{eyre, Result};

use crate::image::bayer::BayerPattern;

pub mod pinhole;
pub mod model;

/// The four camera positions recorded in the dataset. Directory paths embed
/// the camera name, which in turn fixes the Bayer pattern of the raw capture.
#[repr(u8)]
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum CameraKind {
    Stereo,
    MonoLeft,
    MonoRight,
    MonoRear
}

pub const ALL_CAMERAS: [CameraKind; 4] = [
    CameraKind::Stereo,
    CameraKind::MonoLeft,
    CameraKind::MonoRight,
    CameraKind::MonoRear
];

impl CameraKind {

    /// Resolves the camera identity from the leftmost camera name embedded in
    /// a path. Fails when the path names no camera.
    pub fn from_path(path: &str) -> Result<CameraKind> {
        let mut best: Option<(usize, CameraKind)> = None;
        for &camera in ALL_CAMERAS.iter() {
            if let Some(position) = path.find(camera.name()) {
                best = match best {
                    Some((best_position, _)) if best_position <= position => best,
                    _ => Some((position, camera))
                };
            }
        }
        match best {
            Some((_, camera)) => Ok(camera),
            None => Err(eyre!("no camera identity found in path: {}", path))
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CameraKind::Stereo => "stereo",
            CameraKind::MonoLeft => "mono_left",
            CameraKind::MonoRight => "mono_right",
            CameraKind::MonoRear => "mono_rear"
        }
    }

    pub fn bayer_pattern(&self) -> BayerPattern {
        match self {
            CameraKind::Stereo => BayerPattern::Gbrg,
            _ => BayerPattern::Rggb
        }
    }
}
