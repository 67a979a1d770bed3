extern crate image as image_rs;
extern crate nalgebra as na;

use image_rs::{GrayImage,Pixel,Rgb};
use na::DMatrix;

use crate::Float;
use self::image_encoding::ImageEncoding;

pub mod image_encoding;
pub mod bayer;

/// A single image plane. Raw Bayer captures decode into one of these before
/// demosaicing.
#[derive(Debug,Clone)]
pub struct Image {
    pub buffer: DMatrix<Float>,
    pub original_encoding: ImageEncoding
}

impl Image {

    pub fn width(&self) -> usize {
        self.buffer.ncols()
    }

    pub fn height(&self) -> usize {
        self.buffer.nrows()
    }

    pub fn from_matrix(matrix: &DMatrix<Float>, original_encoding: ImageEncoding) -> Image {
        Image{ buffer: matrix.clone(), original_encoding}
    }

    pub fn from_gray_image(image: &GrayImage) -> Image {
        let buffer = Image::image8_to_matrix(image);
        Image{ buffer, original_encoding: ImageEncoding::U8}
    }

    fn image8_to_matrix(gray_image: &GrayImage) -> DMatrix<Float> {
        let (width, height) = gray_image.dimensions();
        let size = (width * height) as usize;
        let mut vec_column_major: Vec<Float> = Vec::with_capacity(size);
        for x in 0..width {
            for y in 0..height {
                let pixel = gray_image.get_pixel(x, y);
                let pixel_value = pixel.channels()[0];
                vec_column_major.push(pixel_value as Float);
            }
        }
        DMatrix::<Float>::from_vec(height as usize, width as usize, vec_column_major)
    }
}

/// A demosaiced three-plane image in channel order red, green, blue.
#[derive(Debug,Clone)]
pub struct ColorImage {
    pub channels: [DMatrix<Float>; 3],
    pub original_encoding: ImageEncoding
}

impl ColorImage {

    pub fn width(&self) -> usize {
        self.channels[0].ncols()
    }

    pub fn height(&self) -> usize {
        self.channels[0].nrows()
    }

    /// Casts all three planes to 8-bit unsigned pixel values.
    pub fn to_rgb_image(&self) -> image_rs::RgbImage {
        let rows = self.height();
        let cols = self.width();
        let mut rgb_image = image_rs::RgbImage::new(cols as u32, rows as u32);
        for c in 0..cols {
            for r in 0..rows {
                let pixel = Rgb([
                    self.original_encoding.cast_to_u8(self.channels[0][(r,c)]),
                    self.original_encoding.cast_to_u8(self.channels[1][(r,c)]),
                    self.original_encoding.cast_to_u8(self.channels[2][(r,c)])
                ]);
                rgb_image.put_pixel(c as u32, r as u32, pixel);
            }
        }
        rgb_image
    }

    /// Reverses the channel order. Output frames are written with the first
    /// and third planes exchanged.
    pub fn swap_red_blue(&self) -> ColorImage {
        let [red, green, blue] = self.channels.clone();
        ColorImage {
            channels: [blue, green, red],
            original_encoding: self.original_encoding
        }
    }

    /// Area downsampling by an arbitrary factor in (0,1]. Every target pixel
    /// averages the source block it covers.
    pub fn downsample_area(&self, scale: Float) -> ColorImage {
        assert!(scale > 0.0 && scale <= 1.0, "invalid downsampling scale: {}", scale);

        let rows = self.height();
        let cols = self.width();
        let new_rows = std::cmp::max((rows as Float * scale) as usize, 1);
        let new_cols = std::cmp::max((cols as Float * scale) as usize, 1);
        let row_ratio = rows as Float / new_rows as Float;
        let col_ratio = cols as Float / new_cols as Float;

        let mut channels = [
            DMatrix::<Float>::zeros(new_rows,new_cols),
            DMatrix::<Float>::zeros(new_rows,new_cols),
            DMatrix::<Float>::zeros(new_rows,new_cols)
        ];

        for channel_index in 0..3 {
            let plane = &self.channels[channel_index];
            for r in 0..new_rows {
                for c in 0..new_cols {
                    let r_start = (r as Float * row_ratio) as usize;
                    let r_end = std::cmp::min(((r+1) as Float * row_ratio) as usize, rows);
                    let r_end = std::cmp::max(r_end, r_start+1);
                    let c_start = (c as Float * col_ratio) as usize;
                    let c_end = std::cmp::min(((c+1) as Float * col_ratio) as usize, cols);
                    let c_end = std::cmp::max(c_end, c_start+1);

                    let mut acc = 0.0;
                    for block_r in r_start..r_end {
                        for block_c in c_start..c_end {
                            acc += plane[(block_r,block_c)];
                        }
                    }
                    let count = ((r_end-r_start)*(c_end-c_start)) as Float;
                    channels[channel_index][(r,c)] = acc/count;
                }
            }
        }

        ColorImage { channels, original_encoding: self.original_encoding }
    }
}
