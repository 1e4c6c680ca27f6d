//! File-system conversion through `Converter`

use std::fs;
use std::path::Path;

use mtl_dedup::io::{ConvertError, Converter};
use mtl_dedup::prelude::*;

fn write_model(dir: &Path) -> std::path::PathBuf {
    fs::write(
        dir.join("lamp_raw.mtl"),
        "newmtl shade_a\nKd 1 1 0.8\nmap_Kd fabric.png\n\nnewmtl shade_b\nKd 1 1 0.8\nmap_Kd fabric.png\n\nnewmtl base\nKd 0.2 0.2 0.2\n",
    )
    .unwrap();
    fs::write(dir.join("fabric.png"), b"fake png bytes").unwrap();

    let model = dir.join("lamp.obj");
    fs::write(
        &model,
        "mtllib lamp_raw.mtl\nusemtl shade_a\nf 1 2 3\nusemtl shade_b\nf 1 2 3\nusemtl base\nf 1 2 3",
    )
    .unwrap();
    model
}

#[test]
fn test_convert_into_output_directory() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let model = write_model(input.path());

    let config = ConversionConfig::default()
        .with_output_directory(output.path())
        .with_keep_intermediate(true);
    let summary = Converter::new(config).convert(&model).unwrap();

    assert_eq!(summary.written.len(), 3);
    assert_eq!(summary.stats.distinct_materials, 2);
    assert_eq!(summary.textures.copied, 1);

    let geometry = fs::read_to_string(output.path().join("lamp.obj")).unwrap();
    assert_eq!(
        geometry,
        "mtllib lamp.mtl\nusemtl shade_a\nf 1 2 3\nusemtl shade_a\nf 1 2 3\nusemtl base\nf 1 2 3"
    );

    let library = fs::read_to_string(output.path().join("lamp.mtl")).unwrap();
    assert!(library.starts_with("newmtl shade_a\n"));
    assert!(!library.contains("shade_b"));

    let report = fs::read_to_string(output.path().join("lamp_duplicates.txt")).unwrap();
    assert!(report.contains("shade_a: 2 occurrences\n\tshade_b"));
    assert!(output.path().join("fabric.png").is_file());
}

#[test]
fn test_convert_in_place_keeps_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let model = write_model(dir.path());
    let original_geometry = fs::read_to_string(&model).unwrap();

    let summary = Converter::new(ConversionConfig::default()).convert(&model).unwrap();

    assert_eq!(summary.written.len(), 2);
    assert_eq!(fs::read_to_string(&model).unwrap(), original_geometry);
    assert!(dir.path().join("lamp_dedup.obj").is_file());
    assert!(dir.path().join("lamp_dedup.mtl").is_file());
    assert!(!dir.path().join("lamp_dedup_duplicates.txt").exists());
    assert_eq!(summary.textures.unchanged, 1);
}

#[test]
fn test_failed_deduplication_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("raw.mtl"), "newmtl only\n").unwrap();
    let model = dir.path().join("broken.obj");
    fs::write(&model, "mtllib raw.mtl\nusemtl ghost\n").unwrap();

    let result = Converter::new(ConversionConfig::default()).convert(&model);

    assert!(matches!(
        result,
        Err(ConvertError::Dedup(DedupError::UnresolvedMaterialReference { .. }))
    ));
    assert!(!dir.path().join("broken_dedup.obj").exists());
    assert!(!dir.path().join("broken_dedup.mtl").exists());
}
