//! Error scenario integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn audio_depot_bin(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("audio-depot").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("TMPDIR", home.path())
        .env_remove("AUDIO_DEPOT_ROOT")
        .env_remove("AUDIO_DEPOT_TRANSCODER")
        .env_remove("AUDIO_DEPOT_CONFIG");
    cmd
}

#[test]
fn convert_missing_file() {
    let home = TempDir::new().unwrap();
    audio_depot_bin(&home)
        .args(["convert", "no-such-take.wav", "--project", "kitabo", "--root"])
        .arg(home.path().join("library"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Cannot read"));
}

#[test]
fn convert_requires_project_flag() {
    let home = TempDir::new().unwrap();
    audio_depot_bin(&home)
        .args(["convert", "take.wav"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--project"));
}

#[test]
fn convert_invalid_project_creates_nothing() {
    let home = TempDir::new().unwrap();
    let source = home.path().join("take.wav");
    std::fs::write(&source, b"RIFF").unwrap();
    let library = home.path().join("library");

    audio_depot_bin(&home)
        .arg("convert")
        .arg(&source)
        .args(["--project", "../escape", "--root"])
        .arg(&library)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid project label"));

    assert!(!library.exists());
}

#[test]
fn convert_unsupported_source() {
    let home = TempDir::new().unwrap();
    let source = home.path().join("notes.txt");
    std::fs::write(&source, b"not audio").unwrap();
    let library = home.path().join("library");

    audio_depot_bin(&home)
        .arg("convert")
        .arg(&source)
        .args(["--project", "kitabo", "--root"])
        .arg(&library)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unrecognized source audio file"));

    assert!(!library.exists());
}

#[test]
fn convert_with_missing_transcoder() {
    let home = TempDir::new().unwrap();
    let source = home.path().join("take.wav");
    std::fs::write(&source, b"RIFF").unwrap();
    let library = home.path().join("library");

    audio_depot_bin(&home)
        .arg("convert")
        .arg(&source)
        .args(["--project", "kitabo", "--transcoder", "/nonexistent/ffmpeg", "--root"])
        .arg(&library)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Conversion failed"));

    // The reserved output is removed again
    let leftovers: Vec<_> = std::fs::read_dir(library.join("kitabo"))
        .map(|entries| entries.flatten().collect())
        .unwrap_or_default();
    assert!(leftovers.is_empty());
}

#[test]
fn config_get_unknown_key() {
    let home = TempDir::new().unwrap();
    audio_depot_bin(&home)
        .args(["config", "get", "unknown_key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown key"));
}

#[test]
fn config_set_unknown_key() {
    let home = TempDir::new().unwrap();
    audio_depot_bin(&home)
        .args(["config", "set", "unknown_key", "value"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Valid keys"));
}

#[test]
fn config_set_invalid_format() {
    let home = TempDir::new().unwrap();
    audio_depot_bin(&home)
        .args(["config", "set", "transcoder.format", "wav"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid target format"));
}

#[test]
fn config_set_invalid_boolean() {
    let home = TempDir::new().unwrap();
    audio_depot_bin(&home)
        .args(["config", "set", "keep_scratch", "sometimes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("true"));
}

#[test]
fn config_init_twice_fails() {
    let home = TempDir::new().unwrap();
    audio_depot_bin(&home).args(["config", "init"]).assert().success();
    audio_depot_bin(&home)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn malformed_config_file_is_ignored() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join(".config/audio-depot");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "this is = = not toml").unwrap();

    audio_depot_bin(&home)
        .args(["index", "--root"])
        .arg(home.path().join("library"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Audio Library"));
}
