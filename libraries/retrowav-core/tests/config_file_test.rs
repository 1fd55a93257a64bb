//! Configuration loading from disk and environment
//!
//! `PlayerConfig::load` reads the process environment, so every load lives
//! in this single test and runs in order with the `RETROWAV_*` mutations.
//! Unit tests in `config.rs` only use `from_toml_str`, which ignores the
//! environment.

use retrowav_core::{ColorTag, CoreError, PlayerConfig, Track};
use std::io::Write;
use std::path::Path;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn load_layers_file_and_environment() {
    // File only
    let expected = PlayerConfig {
        volume: 60,
        muted: false,
        start_index: 0,
        tracks: vec![
            Track::new("One", "A", "/one.mp3", ColorTag::Secondary),
            Track::new("Two", "B", "/two.mp3", ColorTag::Accent),
        ],
    };
    let file = write_config(&toml::to_string(&expected).unwrap());
    assert_eq!(PlayerConfig::load(Some(file.path())).unwrap(), expected);

    // Missing file falls back to defaults
    let config = PlayerConfig::load(Some(Path::new("/definitely/not/here.toml"))).unwrap();
    assert_eq!(config, PlayerConfig::default());

    // Values that parse but do not validate
    let invalid = write_config("volume = 250\n");
    let err = PlayerConfig::load(Some(invalid.path())).unwrap_err();
    assert!(matches!(err, CoreError::InvalidConfig(_)));

    // Environment overrides the file
    std::env::set_var("RETROWAV_START_INDEX", "1");
    std::env::set_var("RETROWAV_MUTED", "true");
    let layered = PlayerConfig::load(Some(file.path()));
    std::env::remove_var("RETROWAV_START_INDEX");
    std::env::remove_var("RETROWAV_MUTED");

    let layered = layered.unwrap();
    assert_eq!(layered.start_index, 1);
    assert!(layered.muted);
    assert_eq!(layered.volume, 60);
    assert_eq!(layered.tracks[1].title, "Two");
}
