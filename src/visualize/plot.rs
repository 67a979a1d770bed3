extern crate plotters;

use plotters::prelude::*;

use crate::{float,Float};

fn get_min_max<'a, I: Iterator<Item = &'a Float>>(values: I) -> (Float,Float) {
    let mut min = float::MAX;
    let mut max = float::MIN;

    for &v in values {
        if v < min {
            min = v;
        }

        if v > max {
            max = v;
        }
    }

    if (max-min) < 1e-5 {
        max = min + 1e-5;
    }

    (min,max)
}

/// Live chart of the vehicle trajectory with lidar scan overlays. Points
/// accumulate across frames; every render redraws the whole history into a
/// caller-supplied RGB buffer.
pub struct TrajectoryPlot {
    width: u32,
    height: u32,
    trajectory: Vec<(Float,Float)>,
    lidar_points: Vec<(Float,Float)>
}

impl TrajectoryPlot {

    pub fn new(width: u32, height: u32) -> TrajectoryPlot {
        TrajectoryPlot {
            width,
            height,
            trajectory: Vec::new(),
            lidar_points: Vec::new()
        }
    }

    pub fn push_trajectory_point(&mut self, point: (Float,Float)) {
        self.trajectory.push(point);
    }

    pub fn overlay_lidar_points(&mut self, points: &[(Float,Float)]) {
        self.lidar_points.extend_from_slice(points);
    }

    pub fn buffer_size(&self) -> usize {
        (self.width*self.height*3) as usize
    }

    pub fn render(&self, buffer: &mut [u8]) -> Result<(), Box<dyn std::error::Error>> {
        let root = BitMapBackend::with_buffer(buffer, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        if self.trajectory.is_empty() && self.lidar_points.is_empty() {
            root.present()?;
            return Ok(());
        }

        let (x_min,x_max) = get_min_max(self.trajectory.iter().map(|point| &point.0)
            .chain(self.lidar_points.iter().map(|point| &point.0)));
        let (y_min,y_max) = get_min_max(self.trajectory.iter().map(|point| &point.1)
            .chain(self.lidar_points.iter().map(|point| &point.1)));

        let mut chart = ChartBuilder::on(&root)
            .set_label_area_size(LabelAreaPosition::Left, 60)
            .set_label_area_size(LabelAreaPosition::Bottom, 60)
            .caption("Trajectory", ("sans-serif", 40))
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .draw()?;

        chart.draw_series(
            self.trajectory.iter().map(|&(x,y)| Circle::new((x,y), 2, RED.filled()))
        )?;

        chart.draw_series(
            self.lidar_points.iter().map(|&(x,y)| Circle::new((x,y), 1, BLUE.filled()))
        )?;

        root.present()?;
        Ok(())
    }
}
