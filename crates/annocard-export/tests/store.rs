//! Integration tests for the image stores

use std::path::Path;

use annocard_core::{ImageStore, PersistError, RasterImage};
use annocard_export::{GalleryStore, PngFile};

fn checker() -> RasterImage {
    let mut data = Vec::new();
    for i in 0..16u32 {
        let on = i % 2 == 0;
        data.extend_from_slice(if on { &[255, 0, 0, 255] } else { &[0, 0, 255, 128] });
    }
    RasterImage {
        width: 4,
        height: 4,
        data,
    }
}

#[test]
fn test_gallery_when_album_is_missing_then_creates_it_and_saves() {
    let root = tempfile::tempdir().unwrap();
    let store = GalleryStore::new(root.path());

    let location = store.persist(&checker()).unwrap();
    let path = Path::new(&location.0);

    assert!(path.starts_with(root.path().join("LegadoThoughts")));
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("thought_") && name.ends_with(".png"), "{name}");
    let millis = name
        .trim_start_matches("thought_")
        .trim_end_matches(".png")
        .split('_')
        .next()
        .unwrap();
    assert!(millis.parse::<u128>().is_ok());
}

#[test]
fn test_gallery_when_saved_then_png_decodes_to_same_pixels() {
    let root = tempfile::tempdir().unwrap();
    let image = checker();
    let location = GalleryStore::new(root.path()).persist(&image).unwrap();

    let decoded = image::open(&location.0).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (4, 4));
    assert_eq!(decoded.as_raw(), &image.data);
}

#[test]
fn test_gallery_when_root_is_a_file_then_reports_unavailable() {
    let root = tempfile::NamedTempFile::new().unwrap();
    let result = GalleryStore::new(root.path()).persist(&checker());
    assert!(matches!(result, Err(PersistError::Unavailable(_))));
}

#[test]
fn test_png_file_when_parent_is_missing_then_creates_it() {
    let root = tempfile::tempdir().unwrap();
    let target = root.path().join("cards").join("walden.png");

    let location = PngFile::new(&target).persist(&checker()).unwrap();
    assert_eq!(Path::new(&location.0), target);
    assert!(std::fs::metadata(&target).unwrap().len() > 0);
}

#[test]
fn test_store_when_image_is_malformed_then_encoding_fails_before_writing() {
    let root = tempfile::tempdir().unwrap();
    let broken = RasterImage {
        width: 4,
        height: 4,
        data: vec![0; 3],
    };

    let result = GalleryStore::new(root.path()).persist(&broken);
    assert!(matches!(result, Err(PersistError::EncodingFailed(_))));
    assert!(!root.path().join("LegadoThoughts").exists());
}
