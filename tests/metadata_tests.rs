use std::fs;
use std::path::{Path, PathBuf};

use geotagger::core::container::ExifContainer;
use geotagger::core::metadata::{GeotagEngine, GeotagError};
use geotagger::models::{Coordinate, GpsBlock};
use little_exif::exif_tag::ExifTag;
use little_exif::metadata::Metadata as ExifMetadata;
use little_exif::rational::uR64;
use tempfile::TempDir;

fn write_jpeg(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    image::RgbImage::from_pixel(16, 16, image::Rgb([200, 120, 40]))
        .save_with_format(&path, image::ImageFormat::Jpeg)
        .expect("should encode fixture jpeg");
    path
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {expected}, got {actual}"
    );
}

fn staging_files(dir: &Path) -> usize {
    fs::read_dir(dir)
        .expect("should list temp dir")
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(".geotag-"))
        .count()
}

#[test]
fn write_then_read_round_trips_coordinates() {
    let dir = TempDir::new().expect("should create temp dir");
    let path = write_jpeg(&dir, "harbour.jpg");

    GeotagEngine::write_coordinates(&path, 40.7128, -74.006).expect("write should succeed");

    let coordinate = GeotagEngine::read_coordinates(&path).expect("coordinates should be present");
    assert_close(coordinate.latitude, 40.7128);
    assert_close(coordinate.longitude, -74.006);
    assert_eq!(staging_files(dir.path()), 0);
}

#[test]
fn southern_and_western_hemispheres_keep_their_sign() {
    let dir = TempDir::new().expect("should create temp dir");
    let path = write_jpeg(&dir, "sydney.JPG");

    GeotagEngine::write_coordinates(&path, -33.8688, 151.2093).expect("write should succeed");

    let coordinate = GeotagEngine::read_coordinates(&path).expect("coordinates should be present");
    assert_close(coordinate.latitude, -33.8688);
    assert_close(coordinate.longitude, 151.2093);
}

#[test]
fn second_write_replaces_first() {
    let dir = TempDir::new().expect("should create temp dir");
    let path = write_jpeg(&dir, "moved.jpeg");

    GeotagEngine::write_coordinates(&path, 51.5074, -0.1278).expect("first write");
    GeotagEngine::write_coordinates(&path, 48.8566, 2.3522).expect("second write");

    let coordinate = GeotagEngine::read_coordinates(&path).expect("coordinates should be present");
    assert_close(coordinate.latitude, 48.8566);
    assert_close(coordinate.longitude, 2.3522);
}

#[test]
fn write_keeps_unrelated_exif_tags() {
    let dir = TempDir::new().expect("should create temp dir");
    let path = write_jpeg(&dir, "described.jpg");

    let mut exif = ExifMetadata::new();
    exif.set_tag(ExifTag::ImageDescription(String::from("Harbour at dawn")));
    exif.write_to_file(&path).expect("should seed description");

    GeotagEngine::write_coordinates(&path, 37.7749, -122.4194).expect("write should succeed");

    let reloaded = ExifMetadata::new_from_path(&path).expect("should reload exif");
    let description = (&reloaded).into_iter().find_map(|tag| match tag {
        ExifTag::ImageDescription(value) => Some(value.trim_end_matches('\0').to_string()),
        _ => None,
    });
    assert_eq!(description.as_deref(), Some("Harbour at dawn"));
    assert!(GeotagEngine::read_coordinates(&path).is_some());
}

#[test]
fn has_no_gps_flips_after_geotagging() {
    let dir = TempDir::new().expect("should create temp dir");
    let path = write_jpeg(&dir, "untagged.jpg");

    assert!(GeotagEngine::has_no_gps(&path));
    assert!(GeotagEngine::read_coordinates(&path).is_none());

    GeotagEngine::write_coordinates(&path, 35.6762, 139.6503).expect("write should succeed");

    assert!(!GeotagEngine::has_no_gps(&path));
}

#[test]
fn unreadable_files_count_as_untagged() {
    let dir = TempDir::new().expect("should create temp dir");
    let garbage = dir.path().join("broken.jpg");
    fs::write(&garbage, b"definitely not a jpeg").expect("should write garbage");

    assert!(GeotagEngine::has_no_gps(&garbage));
    assert!(GeotagEngine::has_no_gps(&dir.path().join("missing.jpg")));
    assert!(GeotagEngine::read_coordinates(&garbage).is_none());
    assert!(matches!(
        GeotagEngine::try_read_coordinates(&garbage),
        Err(GeotagError::ContainerLoad { .. })
    ));
}

#[test]
fn write_to_missing_file_fails_without_creating_it() {
    let dir = TempDir::new().expect("should create temp dir");
    let path = dir.path().join("ghost.jpg");

    let result = GeotagEngine::write_coordinates(&path, 1.0, 2.0);

    assert!(matches!(result, Err(GeotagError::FileNotFound(_))));
    assert!(!path.exists());
}

#[test]
fn failed_write_leaves_file_untouched() {
    let dir = TempDir::new().expect("should create temp dir");
    let path = dir.path().join("fake.jpg");
    fs::write(&path, b"plain text with a jpg name").expect("should write file");

    let result = GeotagEngine::write_coordinates(&path, 1.0, 2.0);

    assert!(matches!(result, Err(GeotagError::ContainerLoad { .. })));
    assert_eq!(
        fs::read(&path).expect("should read file"),
        b"plain text with a jpg name"
    );
    assert_eq!(staging_files(dir.path()), 0);
}

#[test]
fn read_only_file_reports_persist_error() {
    let dir = TempDir::new().expect("should create temp dir");
    let path = write_jpeg(&dir, "locked.jpg");
    let before = fs::read(&path).expect("should read fixture");

    let mut permissions = fs::metadata(&path).expect("should stat").permissions();
    permissions.set_readonly(true);
    fs::set_permissions(&path, permissions).expect("should mark read-only");

    let result = GeotagEngine::write_coordinates(&path, 10.0, 20.0);

    assert!(matches!(result, Err(GeotagError::Persist { .. })));
    assert_eq!(fs::read(&path).expect("should read fixture"), before);
    assert_eq!(staging_files(dir.path()), 0);
}

#[test]
fn non_jpeg_extension_is_rejected() {
    let dir = TempDir::new().expect("should create temp dir");
    let path = dir.path().join("notes.txt");
    fs::write(&path, b"hello").expect("should write file");

    assert!(GeotagEngine::write_coordinates(&path, 1.0, 2.0).is_err());
    assert!(GeotagEngine::has_no_gps(&path));
    assert_eq!(fs::read(&path).expect("should read file"), b"hello");
}

#[test]
fn write_drops_stale_gps_fields() {
    let dir = TempDir::new().expect("should create temp dir");
    let path = write_jpeg(&dir, "altitude.jpg");

    let mut exif = ExifMetadata::new();
    exif.set_tag(ExifTag::GPSAltitude(vec![uR64 {
        nominator: 1200,
        denominator: 1,
    }]));
    exif.write_to_file(&path).expect("should seed altitude");

    GeotagEngine::write_coordinates(&path, 46.5197, 6.6323).expect("write should succeed");

    let reloaded = ExifMetadata::new_from_path(&path).expect("should reload exif");
    let altitude = (&reloaded)
        .into_iter()
        .any(|tag| matches!(tag, ExifTag::GPSAltitude(_)));
    assert!(!altitude);

    let coordinate = GeotagEngine::read_coordinates(&path).expect("coordinates should be present");
    assert_close(coordinate.latitude, 46.5197);
    assert_close(coordinate.longitude, 6.6323);
}

#[test]
fn persist_writes_onto_the_bytes_it_loaded() {
    let dir = TempDir::new().expect("should create temp dir");
    let path = write_jpeg(&dir, "swapped.jpg");

    let mut container = ExifContainer::load_or_empty(&path).expect("should load fixture");
    container.replace_gps_block(&GpsBlock::from_coordinate(Coordinate::new(-12.0464, -77.0428)));

    fs::write(&path, b"replaced after load").expect("should overwrite file");
    container.persist(&path).expect("persist should succeed");

    let coordinate = GeotagEngine::read_coordinates(&path).expect("coordinates should be present");
    assert_close(coordinate.latitude, -12.0464);
    assert_close(coordinate.longitude, -77.0428);
    assert_eq!(staging_files(dir.path()), 0);
}
