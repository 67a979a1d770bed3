extern crate nalgebra as na;

use na::Matrix3;
use crate::Float;

#[derive(Debug,Copy,Clone)]
pub struct Pinhole {
    pub projection: Matrix3<Float>,
    pub inverse_projection: Matrix3<Float>
}

impl Pinhole {
    pub fn new(fx: Float, fy: Float, cx: Float, cy: Float) -> Pinhole {
       let projection = Matrix3::<Float>::new(fx, 0.0, cx,
                                              0.0, fy, cy,
                                              0.0, 0.0, 1.0);
       let inverse_projection = Matrix3::<Float>::new(1.0/fx, 0.0, -cx/fx,
                                                      0.0, 1.0/fy, -cy/fy,
                                                      0.0, 0.0, 1.0);

      Pinhole{projection,inverse_projection}
    }

    pub fn get_fx(&self) -> Float {
        self.projection[(0,0)]
    }

    pub fn get_fy(&self) -> Float {
        self.projection[(1,1)]
    }

    pub fn get_cx(&self) -> Float {
        self.projection[(0,2)]
    }

    pub fn get_cy(&self) -> Float {
        self.projection[(1,2)]
    }
}
