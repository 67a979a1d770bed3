use crate::Float;

#[repr(u8)]
#[derive(Debug,Copy,Clone,PartialEq)]
pub enum ImageEncoding {
    U8,
    F64
}

impl ImageEncoding {
    pub fn cast_to_u8(&self, value: Float) -> u8 {
        match value {
            v if v <= 0.0 => 0,
            v if v >= 255.0 => 255,
            v => v as u8
        }
    }
}
