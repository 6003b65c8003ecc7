//! Concurrency tests for mapty.
//!
//! Writes replace the whole file through an atomic rename, so readers
//! running alongside writers must always see a complete list.

use assert_cmd::Command;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("mapty"))
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn add_run(data_dir: &std::path::Path) {
    cli()
        .arg("add")
        .arg("--data-dir")
        .arg(data_dir)
        .args(["--at", "39,-12"])
        .args(["--distance", "5", "--duration", "25", "--cadence", "170"])
        .assert()
        .success();
}

#[test]
fn test_sequential_adds_accumulate() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    for i in 0..5 {
        thread::sleep(Duration::from_millis(i * 5));
        add_run(&data_dir);
    }

    let content =
        std::fs::read_to_string(data_dir.join("workouts.json")).expect("Failed to read workouts");
    let stored: Vec<serde_json::Value> = serde_json::from_str(&content).unwrap();
    assert_eq!(stored.len(), 5, "Expected 5 workouts, got {}", stored.len());

    let mut ids: Vec<&str> = stored.iter().map(|w| w["id"].as_str().unwrap()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 5, "Workout ids must be unique");
}

#[test]
fn test_readers_never_see_torn_file() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();
    add_run(&data_dir);

    let writer_dir = data_dir.clone();
    let writer = thread::spawn(move || {
        for _ in 0..5 {
            add_run(&writer_dir);
        }
    });

    let mut readers = Vec::new();
    for _ in 0..3 {
        let reader_dir = data_dir.clone();
        readers.push(thread::spawn(move || {
            for _ in 0..5 {
                let output = cli()
                    .arg("list")
                    .arg("--data-dir")
                    .arg(&reader_dir)
                    .output()
                    .expect("Failed to run list");
                assert!(output.status.success());
                let stdout = String::from_utf8_lossy(&output.stdout);
                // A torn read would fail to parse and list nothing
                assert!(
                    stdout.contains("Running on"),
                    "Reader saw no workouts: {}",
                    stdout
                );
            }
        }));
    }

    writer.join().expect("Writer thread panicked");
    for reader in readers {
        reader.join().expect("Reader thread panicked");
    }

    let content =
        std::fs::read_to_string(data_dir.join("workouts.json")).expect("Failed to read workouts");
    let stored: Vec<serde_json::Value> = serde_json::from_str(&content).unwrap();
    assert_eq!(stored.len(), 6);
}
