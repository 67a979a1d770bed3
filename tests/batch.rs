extern crate image as image_rs;

use rand::{thread_rng, Rng};
use std::io::Write;
use std::path::{Path, PathBuf};

use robotcar::image::bayer::{BayerPattern, CfaColor};
use robotcar::preprocess::{process_directory, BatchParameters};

fn temp_workspace(label: &str) -> PathBuf {
    let suffix = thread_rng().gen::<u32>();
    let path = std::env::temp_dir().join(format!("robotcar_{}_{}", label, suffix));
    std::fs::create_dir_all(&path).unwrap();
    path
}

fn write_cfa_png(path: &Path, pattern: BayerPattern, width: u32, height: u32) {
    let mut raw = image_rs::GrayImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let value = match pattern.color_at(y as usize, x as usize) {
                CfaColor::Red => 100u8,
                CfaColor::Green => 50u8,
                CfaColor::Blue => 200u8
            };
            raw.put_pixel(x, y, image_rs::Luma([value]));
        }
    }
    raw.save(path).unwrap();
}

// Three records over two chunks, only the middle image present: one report
// for chunk 1, one processed frame, one report for chunk 2.
#[test]
fn test_batch_skips_and_reports_per_chunk() {
    let workspace = temp_workspace("batch");
    let image_dir = workspace.join("stereo");
    std::fs::create_dir_all(&image_dir).unwrap();

    let mut timestamps_file = std::fs::File::create(workspace.join("stereo.timestamps")).unwrap();
    timestamps_file.write_all(b"1000000 1\n2000000 1\n3000000 2\n").unwrap();

    write_cfa_png(&image_dir.join("2000000.png"), BayerPattern::Gbrg, 8, 8);

    let parameters = BatchParameters {
        image_dir,
        output_dir: workspace.join("processed"),
        preview_scale: 0.5
    };
    let stats = process_directory(&parameters, None).unwrap();

    assert_eq!(stats.processed, 1);
    assert_eq!(stats.skipped, 2);
    assert_eq!(stats.missing_chunks, vec![1, 2]);

    let written = image_rs::open(parameters.output_dir.join("2000000.png")).unwrap().to_rgb8();
    assert_eq!(written.dimensions(), (8, 8));
    // Output channel order is swapped relative to the demosaiced frame.
    assert_eq!(written.get_pixel(4, 4), &image_rs::Rgb([200u8, 50u8, 100u8]));

    let _ = std::fs::remove_dir_all(&workspace);
}

// A run of missing records inside one chunk is reported exactly once.
#[test]
fn test_batch_counts_missing_runs_not_records() {
    let workspace = temp_workspace("batch_runs");
    let image_dir = workspace.join("mono_left");
    std::fs::create_dir_all(&image_dir).unwrap();

    let mut timestamps_file = std::fs::File::create(workspace.join("mono_left.timestamps")).unwrap();
    timestamps_file.write_all(
        b"1000000 1\n1100000 1\n1200000 1\n1300000 2\n1400000 2\n1500000 3\n"
    ).unwrap();

    write_cfa_png(&image_dir.join("1300000.png"), BayerPattern::Rggb, 4, 4);
    write_cfa_png(&image_dir.join("1400000.png"), BayerPattern::Rggb, 4, 4);

    let parameters = BatchParameters {
        image_dir,
        output_dir: workspace.join("processed"),
        preview_scale: 0.5
    };
    let stats = process_directory(&parameters, None).unwrap();

    assert_eq!(stats.processed, 2);
    assert_eq!(stats.skipped, 4);
    assert_eq!(stats.missing_chunks, vec![1, 3]);

    let _ = std::fs::remove_dir_all(&workspace);
}

#[test]
fn test_batch_without_timestamps_file_is_fatal() {
    let workspace = temp_workspace("batch_fatal");
    let image_dir = workspace.join("stereo");
    std::fs::create_dir_all(&image_dir).unwrap();

    let parameters = BatchParameters {
        image_dir,
        output_dir: workspace.join("processed"),
        preview_scale: 0.5
    };
    assert!(process_directory(&parameters, None).is_err());

    let _ = std::fs::remove_dir_all(&workspace);
}
