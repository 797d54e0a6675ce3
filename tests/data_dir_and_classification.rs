use filekeep::classify::{Category, CategoryTable};
use filekeep::paths::AppPaths;
use filekeep::store::{ItemStore, LoadSource};
use std::fs;
use tempfile::TempDir;

#[test]
fn first_data_file_lookup_creates_directory() {
    let base = TempDir::new().unwrap();
    let data_dir = base.path().join(".file_and_folder_manager");
    assert!(!data_dir.exists());

    let paths = AppPaths::at(&data_dir).unwrap();

    assert!(data_dir.is_dir());
    assert_eq!(
        paths.data_file_path(),
        base.path()
            .join(".file_and_folder_manager")
            .join("file_manager_data.json")
    );

    let again = AppPaths::at(&data_dir).unwrap();
    assert_eq!(again.data_dir(), paths.data_dir());
}

#[test]
fn listing_a_real_directory() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("report.docx"), b"").unwrap();
    fs::write(tmp.path().join("archive.tar.gz"), b"").unwrap();
    fs::write(tmp.path().join("file"), b"").unwrap();
    fs::create_dir(tmp.path().join("shots.png")).unwrap();

    let table = CategoryTable::default();
    let cases = [
        ("report.docx", Category::Document, "📄"),
        ("archive.tar.gz", Category::Archive, "📦"),
        ("file", Category::Other, "📄"),
        ("shots.png", Category::Folder, "📁"),
    ];

    for (name, category, glyph) in cases {
        let result = table.classify(tmp.path().join(name));
        assert_eq!(result.category, category, "{}", name);
        assert_eq!(result.glyph, glyph, "{}", name);
    }
}

#[test]
fn tracked_items_survive_a_corrupt_data_file() {
    let tmp = TempDir::new().unwrap();
    let paths = AppPaths::at(tmp.path().join("data")).unwrap();
    let tracked = tmp.path().join("notes.txt");
    fs::write(&tracked, b"x").unwrap();

    let (mut store, _) = ItemStore::load(&paths).unwrap();
    store.add(&tracked).unwrap();
    store.save().unwrap();
    store.save().unwrap();

    fs::write(paths.data_file_path(), b"\0\0\0").unwrap();

    let (store, source) = ItemStore::load(&paths).unwrap();
    assert_eq!(source, LoadSource::Backup);
    assert_eq!(store.items()[0].path, tracked);
}
