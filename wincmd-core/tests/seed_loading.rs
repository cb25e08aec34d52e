//! Integration tests for seed loading from JSON and ZIP archives.

use std::io::{Cursor, Write};
use std::path::PathBuf;

use wincmd_core::{
    dispatch, load_seed, load_seed_from_path, load_seed_from_zip, HeadlessTerminal, SeedImage,
    ShellError,
};

const SEED: &str = r#"{
    "userName": "guest",
    "computerName": "LAB-01",
    "directories": [
        {"path": "C:\\", "entries": [
            {"name": "Projects", "directory": true, "modified": "2023-04-01 09:15"},
            {"name": "notes.txt", "size": "2,048", "modified": "2023-04-02 17:30"}
        ]},
        {"path": "C:\\Projects", "entries": [
            {"name": "readme.md", "size": "512", "modified": "2023-04-03 08:00"}
        ]}
    ]
}"#;

fn create_seed_zip(member: &str, content: &str) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let cursor = Cursor::new(&mut buf);
        let mut zip = zip::ZipWriter::new(cursor);

        zip.start_file::<_, ()>("README.txt", Default::default())
            .unwrap();
        zip.write_all(b"not the seed").unwrap();

        zip.start_file::<_, ()>(member, Default::default()).unwrap();
        zip.write_all(content.as_bytes()).unwrap();

        zip.finish().unwrap();
    }
    buf
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("wincmd-{}-{}", std::process::id(), name))
}

#[test]
fn test_seed_from_zip() {
    let data = create_seed_zip("seed.json", SEED);
    let seed = load_seed_from_zip(Cursor::new(data)).unwrap();
    assert_eq!(seed.user_name, "guest");
    assert_eq!(seed.computer_name, "LAB-01");
    assert_eq!(seed.directories.len(), 2);
}

#[test]
fn test_seed_in_subfolder_of_zip() {
    let data = create_seed_zip("image/seed.json", SEED);
    let seed = load_seed_from_zip(Cursor::new(data)).unwrap();
    assert_eq!(seed.user_name, "guest");
}

#[test]
fn test_zip_without_seed() {
    let data = create_seed_zip("other.json", SEED);
    let err = load_seed_from_zip(Cursor::new(data)).unwrap_err();
    assert!(matches!(err, ShellError::InvalidSeed(_)));
}

#[test]
fn test_not_a_zip() {
    let err = load_seed_from_zip(Cursor::new(b"plain text".to_vec())).unwrap_err();
    assert!(matches!(err, ShellError::Zip(_)));
}

#[test]
fn test_seed_from_path() {
    let json_path = temp_path("seed.json");
    std::fs::write(&json_path, SEED).unwrap();
    let seed = load_seed_from_path(&json_path).unwrap();
    assert_eq!(seed.computer_name, "LAB-01");
    std::fs::remove_file(&json_path).unwrap();

    let zip_path = temp_path("seed.zip");
    std::fs::write(&zip_path, create_seed_zip("seed.json", SEED)).unwrap();
    let seed = load_seed_from_path(&zip_path).unwrap();
    assert_eq!(seed.user_name, "guest");
    std::fs::remove_file(&zip_path).unwrap();
}

#[test]
fn test_missing_seed_file() {
    let err = load_seed_from_path(temp_path("missing.json")).unwrap_err();
    assert!(matches!(err, ShellError::Io(_)));
}

#[test]
fn test_seeded_session_lists_entries() {
    let seed = load_seed(SEED.as_bytes()).unwrap();
    let mut session = seed.into_session().unwrap();
    let mut term = HeadlessTerminal::new();

    dispatch(&mut session, &mut term, "dir").unwrap();
    let out = term.output_string();
    assert!(out.contains(" Directory of C:\\\n"));
    assert!(out.contains("04/01/2023  09:15 AM    <DIR>    Projects\n"));
    assert!(out.contains("04/02/2023  05:30 PM"));
    assert!(out.contains("               1 File(s)     2,048 bytes\n"));
    assert!(out.contains("               1 Dir(s)      unlimited bytes free\n"));

    term.clear_output();
    dispatch(&mut session, &mut term, "cd projects").unwrap();
    assert_eq!(session.current_dir, "C:\\Projects");
    dispatch(&mut session, &mut term, "dir /b").unwrap();
    assert_eq!(term.output_string(), "readme.md\n");

    // Identity comes from the seed, environment from the defaults.
    term.clear_output();
    dispatch(&mut session, &mut term, "echo %COMPUTERNAME%").unwrap();
    assert_eq!(term.output_string(), "LAB-01\n");
}

#[test]
fn test_builtin_seed_serializes() {
    let seed = SeedImage::builtin("User", "TEXTYOS-PC");
    let json = serde_json::to_string(&seed).unwrap();
    assert!(json.contains("\"userName\":\"User\""));
    let back = load_seed(json.as_bytes()).unwrap();
    assert_eq!(back.directories.len(), seed.directories.len());
}
