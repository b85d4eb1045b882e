use super::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_scan_lists_only_top_level_inputs_sorted() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::write(root.join("b.vpax"), b"").unwrap();
    fs::write(root.join("A.VPAX"), b"").unwrap();
    fs::write(root.join("a.csv"), b"").unwrap();
    fs::write(root.join("notes.txt"), b"").unwrap();
    fs::create_dir(root.join("nested")).unwrap();
    fs::write(root.join("nested").join("c.vpax"), b"").unwrap();
    fs::create_dir(root.join("folder.vpax")).unwrap();

    let files = scan_input_files(root, &ExtractorConfig::default()).unwrap();
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["A.VPAX", "b.vpax"]);
}

#[test]
fn test_scan_empty_directory() {
    let dir = TempDir::new().unwrap();
    let files = scan_input_files(dir.path(), &ExtractorConfig::default()).unwrap();
    assert!(files.is_empty());
}

#[test]
fn test_scan_missing_directory_is_filesystem_error() {
    let err = scan_input_files(Path::new("/nonexistent/path"), &ExtractorConfig::default())
        .unwrap_err();
    assert_eq!(err.kind(), "FilesystemError");
}

#[test]
fn test_ensure_directory_rejects_files() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("model.vpax");
    fs::write(&file, b"").unwrap();

    let err = ensure_directory(&file).unwrap_err();
    assert!(err.to_string().contains("not a directory"));
    assert!(ensure_directory(dir.path()).is_ok());
}
