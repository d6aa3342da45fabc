//! CLI smoke tests
//!
//! Run the real binary for `themes` and `render`, covering both saved cards
//! and the failure paths a user can hit from the shell.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn annocard(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_annocard"))
        .args(args)
        .env_remove("ANNOCARD_TYPEFACE")
        .env_remove("ANNOCARD_SYSTEM_TYPEFACE")
        .output()
        .expect("Failed to execute annocard")
}

#[test]
fn test_help_lists_commands() {
    let output = annocard(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("render"));
    assert!(stdout.contains("themes"));
}

#[test]
fn test_themes_lists_every_palette() {
    let output = annocard(&["themes"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 1 + annocard::Theme::all().len());
    assert!(stdout.contains("#"));
}

#[test]
fn test_render_to_png_file() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("card.png");

    let output = annocard(&[
        "render",
        "--book",
        "Walden",
        "--author",
        "Thoreau",
        "--chapter",
        "Economy",
        "--excerpt",
        "Simplify, simplify.",
        "--reflection",
        "Still true.",
        "--theme",
        "2",
        "-o",
        target.to_str().unwrap(),
        "-q",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), target.to_str().unwrap());

    let decoded = image::open(&target).unwrap();
    assert_eq!(decoded.width(), 1125);
}

#[test]
fn test_render_card_file_into_gallery() {
    let dir = tempfile::tempdir().unwrap();
    let card = dir.path().join("card.json");
    fs::write(
        &card,
        r#"{ "book_name": "Walden", "excerpt": "I went to the woods.", "reflection": "" }"#,
    )
    .unwrap();
    let pictures = dir.path().join("Pictures");

    let output = annocard(&[
        "r",
        "--card",
        card.to_str().unwrap(),
        "--gallery",
        pictures.to_str().unwrap(),
        "--album",
        "Notes",
        "--typeface",
        "/nonexistent/font.ttf",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let saved: Vec<_> = fs::read_dir(pictures.join("Notes")).unwrap().collect();
    assert_eq!(saved.len(), 1);
}

#[test]
fn test_render_without_destination_fails() {
    let output = annocard(&["render", "--excerpt", "x"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--output"));
}

#[test]
fn test_render_with_bad_card_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let card = dir.path().join("card.json");
    fs::write(&card, "not json").unwrap();
    let target = dir.path().join("card.png");

    let output = annocard(&[
        "render",
        "--card",
        card.to_str().unwrap(),
        "-o",
        target.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(!Path::new(&target).exists());
}
