extern crate image as image_rs;
extern crate minifb;

use minifb::{Key, Window, WindowOptions};

/// A framebuffer window displaying one RGB image at a time. The update rate
/// cap doubles as the playback pacing yield.
pub struct ImageWindow {
    window: Window,
    buffer: Vec<u32>,
    width: usize,
    height: usize
}

impl ImageWindow {

    pub fn new(title: &str, width: usize, height: usize) -> Result<ImageWindow, minifb::Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())?;
        window.limit_update_rate(Some(std::time::Duration::from_micros(16600)));

        Ok(ImageWindow {
            window,
            buffer: vec![0u32; width*height],
            width,
            height
        })
    }

    pub fn show_rgb_image(&mut self, image: &image_rs::RgbImage) -> Result<(), minifb::Error> {
        let image_width = image.width() as usize;
        let image_height = image.height() as usize;

        for y in 0..self.height {
            for x in 0..self.width {
                self.buffer[x + y*self.width] = match x < image_width && y < image_height {
                    true => rgb_to_u32(image.get_pixel(x as u32, y as u32)),
                    false => 0
                };
            }
        }

        self.window.update_with_buffer(&self.buffer, self.width, self.height)
    }

    /// Displays a packed RGB byte buffer of exactly width*height*3 bytes.
    pub fn show_rgb_buffer(&mut self, rgb: &[u8]) -> Result<(), minifb::Error> {
        assert_eq!(rgb.len(), self.width*self.height*3);

        for pixel_index in 0..self.width*self.height {
            let offset = pixel_index*3;
            self.buffer[pixel_index] = (rgb[offset] as u32) << 16
                | (rgb[offset+1] as u32) << 8
                | rgb[offset+2] as u32;
        }

        self.window.update_with_buffer(&self.buffer, self.width, self.height)
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn quit_requested(&self) -> bool {
        self.window.is_key_down(Key::Q) || self.window.is_key_down(Key::Escape)
    }
}

fn rgb_to_u32(pixel: &image_rs::Rgb<u8>) -> u32 {
    (pixel[0] as u32) << 16 | (pixel[1] as u32) << 8 | pixel[2] as u32
}
