extern crate robotcar;
extern crate image as image_rs;
extern crate termion;

use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use std::path::PathBuf;
use termion::input::TermRead;

use robotcar::Float;
use robotcar::camera::CameraKind;
use robotcar::config::DatasetConfig;
use robotcar::io;
use robotcar::io::points::{load_trajectory, load_lidar_scan, lidar_scan_path};
use robotcar::io::timestamps::{load_timestamps, load_lidar_timestamps, ChunkTracker};
use robotcar::playback::lidar_scan_index;
use robotcar::visualize::display::ImageWindow;
use robotcar::visualize::plot::TrajectoryPlot;

const PLOT_WIDTH: usize = 800;
const PLOT_HEIGHT: usize = 600;

#[derive(Parser)]
#[command(about = "Replay trajectory, camera frames and lidar scans in lockstep")]
struct Args {
    /// Dataset configuration file
    #[arg(long, default_value = "dataset.yaml")]
    config: PathBuf
}

fn window_for<'a>(slot: &'a mut Option<ImageWindow>, title: &str, width: usize, height: usize) -> Result<&'a mut ImageWindow> {
    if slot.is_none() {
        *slot = Some(ImageWindow::new(title, width, height)?);
    }
    Ok(slot.as_mut().expect("window was just created"))
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let config = DatasetConfig::from_file(&args.config)?;
    config.validate_playback()?;

    let trajectory = load_trajectory(&config.trajectory_file)?;
    let lidar_timestamps = load_lidar_timestamps(&config.lidar_timestamps)?;

    let camera = CameraKind::from_path(&config.image_dir.to_string_lossy())?;
    let timestamps_path = io::resolve_timestamps_path(&config.image_dir, camera)?;
    let records = load_timestamps(&timestamps_path)?;

    let mut plot = TrajectoryPlot::new(PLOT_WIDTH as u32, PLOT_HEIGHT as u32);
    let mut plot_buffer = vec![0u8; plot.buffer_size()];
    let mut plot_window = ImageWindow::new("trajectory", PLOT_WIDTH, PLOT_HEIGHT)?;

    // Frame windows open lazily once the first image fixes their dimensions.
    let mut frame_window: Option<ImageWindow> = None;
    let mut pointcloud_window: Option<ImageWindow> = None;

    let mut frame_tracker = ChunkTracker::new();
    let mut pointcloud_tracker = ChunkTracker::new();
    let mut lidar_tracker = ChunkTracker::new();

    // Counts frames actually displayed. Records skipped for a missing file
    // consume neither a trajectory index nor a lidar slot.
    let mut found_frames = 0usize;

    let mut keys = termion::async_stdin().keys();

    'records: for record in &records {
        let file_name = format!("{}.png", record.timestamp);
        let frame_path = config.processed_image_dir.join(&file_name);

        if !frame_path.is_file() {
            if frame_tracker.record_missing(record.chunk) {
                println!("Chunk {} not found", record.chunk);
            }
            continue;
        }
        frame_tracker.record_found(record.chunk);

        let frame = image_rs::open(&frame_path)?.to_rgb8();
        let window = window_for(&mut frame_window, "camera", frame.width() as usize, frame.height() as usize)?;
        window.show_rgb_image(&frame)?;

        let pointcloud_path = config.pointcloud_image_dir.join(&file_name);
        if pointcloud_path.is_file() {
            pointcloud_tracker.record_found(record.chunk);
            let pointcloud = image_rs::open(&pointcloud_path)?.to_rgb8();
            let window = window_for(&mut pointcloud_window, "pointcloud", pointcloud.width() as usize, pointcloud.height() as usize)?;
            window.show_rgb_image(&pointcloud)?;
        } else if pointcloud_tracker.record_missing(record.chunk) {
            println!("Pointcloud chunk {} not found", record.chunk);
        }

        let &point = trajectory.get(found_frames)
            .ok_or_else(|| eyre!("trajectory exhausted at frame {}", found_frames))?;
        plot.push_trajectory_point(point);

        if let Some(scan_index) = lidar_scan_index(found_frames) {
            let &scan_timestamp = lidar_timestamps.get(scan_index)
                .ok_or_else(|| eyre!("lidar timestamps exhausted at scan {}", scan_index))?;
            let scan_path = lidar_scan_path(&config.lidar_dir, scan_timestamp);
            if scan_path.is_file() {
                lidar_tracker.record_found(record.chunk);
                let scan = load_lidar_scan(&scan_path)?;
                let flipped = scan.iter().map(|&(x,y)| (-x,y)).collect::<Vec<(Float,Float)>>();
                plot.overlay_lidar_points(&flipped);
            } else if lidar_tracker.record_missing(record.chunk) {
                println!("Lidar chunk {} not found", record.chunk);
            }
        }

        plot.render(&mut plot_buffer).map_err(|e| eyre!("plot rendering failed: {}", e))?;
        plot_window.show_rgb_buffer(&plot_buffer)?;

        found_frames += 1;

        while let Some(Ok(key)) = keys.next() {
            if let termion::event::Key::Char('q') = key {
                break 'records;
            }
        }
        if !plot_window.is_open() || plot_window.quit_requested() {
            break;
        }
        if let Some(window) = &frame_window {
            if !window.is_open() || window.quit_requested() {
                break;
            }
        }
        if let Some(window) = &pointcloud_window {
            if !window.is_open() || window.quit_requested() {
                break;
            }
        }
    }

    println!("done!");
    Ok(())
}
