extern crate nalgebra as na;

use na::DMatrix;
use std::path::Path;
use color_eyre::eyre::{eyre, Result};

use crate::Float;
use crate::camera::{CameraKind, pinhole::Pinhole};
use crate::image::ColorImage;
use crate::io::parse_to_float;

/// Brown-Conrady lens distortion coefficients: three radial, two tangential.
#[derive(Debug,Copy,Clone)]
pub struct Distortion {
    pub k1: Float,
    pub k2: Float,
    pub k3: Float,
    pub p1: Float,
    pub p2: Float
}

impl Distortion {
    pub fn zero() -> Distortion {
        Distortion { k1: 0.0, k2: 0.0, k3: 0.0, p1: 0.0, p2: 0.0 }
    }
}

/// Intrinsics and distortion for one camera, read from
/// `<models_dir>/<camera>.txt`: first line `fx fy cx cy`, second line
/// `k1 k2 k3 p1 p2`.
#[derive(Debug,Clone)]
pub struct CameraModel {
    pub camera: CameraKind,
    pub pinhole: Pinhole,
    pub distortion: Distortion
}

impl CameraModel {

    pub fn new(camera: CameraKind, pinhole: Pinhole, distortion: Distortion) -> CameraModel {
        CameraModel { camera, pinhole, distortion }
    }

    pub fn from_dir(models_dir: &Path, image_dir: &Path) -> Result<CameraModel> {
        let camera = CameraKind::from_path(&image_dir.to_string_lossy())?;
        let model_path = models_dir.join(format!("{}.txt", camera.name()));
        let contents = std::fs::read_to_string(&model_path)?;

        let lines = contents.lines().filter(|line| !line.trim().is_empty()).collect::<Vec<&str>>();
        if lines.len() < 2 {
            return Err(eyre!("camera model file {} is missing intrinsics or distortion", model_path.display()));
        }

        let intrinsics = lines[0].split_whitespace().map(|token| parse_to_float(token)).collect::<Vec<Float>>();
        if intrinsics.len() < 4 {
            return Err(eyre!("camera model file {} needs fx fy cx cy", model_path.display()));
        }
        let pinhole = Pinhole::new(intrinsics[0], intrinsics[1], intrinsics[2], intrinsics[3]);

        let coefficients = lines[1].split_whitespace().map(|token| parse_to_float(token)).collect::<Vec<Float>>();
        if coefficients.len() < 5 {
            return Err(eyre!("camera model file {} needs k1 k2 k3 p1 p2", model_path.display()));
        }
        let distortion = Distortion {
            k1: coefficients[0],
            k2: coefficients[1],
            k3: coefficients[2],
            p1: coefficients[3],
            p2: coefficients[4]
        };

        Ok(CameraModel { camera, pinhole, distortion })
    }

    /// Produces the geometrically corrected image by inverse mapping: every
    /// target pixel is normalized, pushed through the forward distortion and
    /// sampled bilinearly from the source. Spatial dimensions are preserved.
    pub fn undistort(&self, image: &ColorImage) -> ColorImage {
        let rows = image.height();
        let cols = image.width();
        let fx = self.pinhole.get_fx();
        let fy = self.pinhole.get_fy();
        let cx = self.pinhole.get_cx();
        let cy = self.pinhole.get_cy();
        let Distortion { k1, k2, k3, p1, p2 } = self.distortion;

        let mut channels = [
            DMatrix::<Float>::zeros(rows,cols),
            DMatrix::<Float>::zeros(rows,cols),
            DMatrix::<Float>::zeros(rows,cols)
        ];

        for r in 0..rows {
            for c in 0..cols {
                let x = (c as Float - cx)/fx;
                let y = (r as Float - cy)/fy;

                let r2 = x*x + y*y;
                let r4 = r2*r2;
                let r6 = r2*r4;
                let radial = 1.0 + k1*r2 + k2*r4 + k3*r6;

                let x_distorted = x*radial + 2.0*p1*x*y + p2*(r2 + 2.0*x*x);
                let y_distorted = y*radial + p1*(r2 + 2.0*y*y) + 2.0*p2*x*y;

                let source_col = fx*x_distorted + cx;
                let source_row = fy*y_distorted + cy;

                for channel_index in 0..3 {
                    channels[channel_index][(r,c)] = sample_bilinear(&image.channels[channel_index], source_row, source_col);
                }
            }
        }

        ColorImage { channels, original_encoding: image.original_encoding }
    }
}

// Out-of-bounds sample positions resolve to 0.
fn sample_bilinear(plane: &DMatrix<Float>, row: Float, col: Float) -> Float {
    let rows = plane.nrows();
    let cols = plane.ncols();

    let row_base = row.floor();
    let col_base = col.floor();
    let row_fraction = row - row_base;
    let col_fraction = col - col_base;

    let mut acc = 0.0;
    for &(dr, dc, weight) in [
        (0i64, 0i64, (1.0-row_fraction)*(1.0-col_fraction)),
        (0, 1, (1.0-row_fraction)*col_fraction),
        (1, 0, row_fraction*(1.0-col_fraction)),
        (1, 1, row_fraction*col_fraction)
    ].iter() {
        let sample_row = row_base as i64 + dr;
        let sample_col = col_base as i64 + dc;
        if sample_row < 0 || sample_col < 0 || sample_row >= rows as i64 || sample_col >= cols as i64 {
            continue;
        }
        acc += weight*plane[(sample_row as usize, sample_col as usize)];
    }

    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::image_encoding::ImageEncoding;

    #[test]
    fn test_zero_distortion_is_identity() {
        let rows = 8;
        let cols = 10;
        let mut channels = [
            DMatrix::<Float>::zeros(rows,cols),
            DMatrix::<Float>::zeros(rows,cols),
            DMatrix::<Float>::zeros(rows,cols)
        ];
        for channel_index in 0..3 {
            for r in 0..rows {
                for c in 0..cols {
                    channels[channel_index][(r,c)] = (channel_index*100 + r*10 + c) as Float;
                }
            }
        }
        let image = ColorImage { channels, original_encoding: ImageEncoding::U8 };

        let model = CameraModel::new(
            CameraKind::Stereo,
            Pinhole::new(400.0, 400.0, cols as Float/2.0, rows as Float/2.0),
            Distortion::zero()
        );
        let undistorted = model.undistort(&image);

        assert_eq!(undistorted.height(), rows);
        assert_eq!(undistorted.width(), cols);
        for channel_index in 0..3 {
            for r in 0..rows {
                for c in 0..cols {
                    let expected = image.channels[channel_index][(r,c)];
                    assert!((undistorted.channels[channel_index][(r,c)] - expected).abs() < 1e-9);
                }
            }
        }
    }
}
