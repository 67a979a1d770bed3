extern crate nalgebra as na;

use na::DMatrix;

use crate::Float;
use crate::image::{Image,ColorImage};

/// The 2x2 color filter arrangements present in the dataset. The stereo
/// camera captures gbrg, the mono cameras rggb.
#[repr(u8)]
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum BayerPattern {
    Gbrg,
    Rggb
}

#[repr(u8)]
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum CfaColor {
    Red,
    Green,
    Blue
}

pub const CHANNEL_ORDER: [CfaColor; 3] = [CfaColor::Red, CfaColor::Green, CfaColor::Blue];

impl BayerPattern {

    pub fn name(&self) -> &'static str {
        match self {
            BayerPattern::Gbrg => "gbrg",
            BayerPattern::Rggb => "rggb"
        }
    }

    pub fn color_at(&self, row: usize, col: usize) -> CfaColor {
        match (self, row % 2, col % 2) {
            (BayerPattern::Gbrg, 1, 0) => CfaColor::Red,
            (BayerPattern::Gbrg, 0, 1) => CfaColor::Blue,
            (BayerPattern::Gbrg, _, _) => CfaColor::Green,
            (BayerPattern::Rggb, 0, 0) => CfaColor::Red,
            (BayerPattern::Rggb, 1, 1) => CfaColor::Blue,
            (BayerPattern::Rggb, _, _) => CfaColor::Green
        }
    }
}

// Green sites interpolate across the 4-neighborhood, red and blue across the
// full 3x3 window. Weights are renormalized over the sites actually sampled,
// which also covers the image border.
fn interpolation_kernel(color: CfaColor) -> [[Float; 3]; 3] {
    match color {
        CfaColor::Green => [
            [0.0, 1.0, 0.0],
            [1.0, 4.0, 1.0],
            [0.0, 1.0, 0.0]
        ],
        _ => [
            [1.0, 2.0, 1.0],
            [2.0, 4.0, 2.0],
            [1.0, 2.0, 1.0]
        ]
    }
}

/// Reconstructs a full three-plane color image from a single-plane color
/// filter array capture. Spatial dimensions are preserved.
pub fn demosaic_bilinear(raw: &Image, pattern: BayerPattern) -> ColorImage {
    let rows = raw.buffer.nrows();
    let cols = raw.buffer.ncols();

    let mut channels = [
        DMatrix::<Float>::zeros(rows,cols),
        DMatrix::<Float>::zeros(rows,cols),
        DMatrix::<Float>::zeros(rows,cols)
    ];

    for (channel_index, &color) in CHANNEL_ORDER.iter().enumerate() {
        let kernel = interpolation_kernel(color);
        for r in 0..rows {
            for c in 0..cols {
                let mut acc = 0.0;
                let mut weight_sum = 0.0;
                for dr in -1i64..=1 {
                    for dc in -1i64..=1 {
                        let site_r = r as i64 + dr;
                        let site_c = c as i64 + dc;
                        if site_r < 0 || site_c < 0 || site_r >= rows as i64 || site_c >= cols as i64 {
                            continue;
                        }
                        if pattern.color_at(site_r as usize, site_c as usize) != color {
                            continue;
                        }
                        let weight = kernel[(dr+1) as usize][(dc+1) as usize];
                        acc += weight*raw.buffer[(site_r as usize, site_c as usize)];
                        weight_sum += weight;
                    }
                }
                channels[channel_index][(r,c)] = match weight_sum > 0.0 {
                    true => acc/weight_sum,
                    false => 0.0
                };
            }
        }
    }

    ColorImage { channels, original_encoding: raw.original_encoding }
}
