use std::io::Write;
use std::path::{Path, PathBuf};

use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_codec_encode").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn sample_frame() -> RgbaFrame {
    RgbaFrame {
        width: 2,
        height: 1,
        data: vec![1, 2, 3, 255, 4, 5, 6, 0],
    }
}

#[test]
fn write_png_is_lossless_for_every_level() {
    let dir = scratch_dir("levels");
    for level in [
        PngCompression::Fast,
        PngCompression::Default,
        PngCompression::Best,
    ] {
        let path = dir.join(format!("{level:?}.png"));
        ensure_parent_dir(&path).unwrap();
        write_png(&sample_frame(), &path, level).unwrap();

        let back = image::open(&path).unwrap();
        assert_eq!(back.color(), image::ColorType::Rgba8);
        assert_eq!(back.to_rgba8().into_raw(), sample_frame().data);
    }
}

#[test]
fn write_png_into_missing_dir_fails_without_ensure() {
    let dir = scratch_dir("missing");
    let path = dir.join("nested").join("out.png");
    assert!(write_png(&sample_frame(), &path, PngCompression::Default).is_err());
    ensure_parent_dir(&path).unwrap();
    write_png(&sample_frame(), &path, PngCompression::Default).unwrap();
    assert!(path.is_file());
}

#[test]
fn compression_parses_case_insensitively() {
    assert_eq!("BEST".parse::<PngCompression>().unwrap(), PngCompression::Best);
    assert_eq!(" fast ".parse::<PngCompression>().unwrap(), PngCompression::Fast);
    assert!("zip".parse::<PngCompression>().is_err());
}

#[test]
fn failed_write_leaves_neither_output_nor_staging_file() {
    let dir = scratch_dir("interrupted");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("frame_rgba.png");

    let err = write_atomically(&path, |out| {
        out.write_all(&[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a])
            .map_err(|e| TorqueError::io(e.to_string()))?;
        out.write_all(&vec![0u8; 64 * 1024])
            .map_err(|e| TorqueError::io(e.to_string()))?;
        Err(TorqueError::io("no space left on device"))
    })
    .unwrap_err();

    assert!(err.to_string().contains("no space left"));
    assert!(!path.exists());
    assert!(!staging_path(&path).exists());
}

#[test]
fn failed_rename_cleans_up_staging_file() {
    let dir = scratch_dir("rename");
    let path = dir.join("taken");
    std::fs::create_dir_all(path.join("inner")).unwrap();

    assert!(write_png(&sample_frame(), &path, PngCompression::Fast).is_err());
    assert!(path.is_dir());
    assert!(!staging_path(&path).exists());
}

#[test]
fn successful_write_replaces_existing_output() {
    let dir = scratch_dir("replace");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("out.png");
    std::fs::write(&path, b"stale").unwrap();

    write_png(&sample_frame(), &path, PngCompression::Default).unwrap();
    assert_eq!(
        image::open(&path).unwrap().to_rgba8().into_raw(),
        sample_frame().data
    );
    assert!(!staging_path(&path).exists());
}

#[test]
fn staging_path_is_a_sibling() {
    assert_eq!(
        staging_path(Path::new("out/a.b_rgba.png")),
        PathBuf::from("out/a.b_rgba.png.tmp")
    );
}
