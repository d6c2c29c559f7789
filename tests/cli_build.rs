//! End-to-end CLI tests: run the built binary against `fixtures/site/`.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_salon-page"))
}

fn fixture_site() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/site")
}

fn run(args: &[&str]) -> Output {
    bin().args(args).output().expect("failed to run salon-page")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn build_writes_page_and_assets() {
    let out = TempDir::new().unwrap();
    let output = run(&[
        "build",
        "--source",
        path_str(&fixture_site()),
        "--output",
        path_str(out.path()),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let html = std::fs::read_to_string(out.path().join("index.html")).unwrap();
    assert!(html.contains("<title>Salon Melati - Waxing &amp; Perawatan</title>"));
    assert!(html.contains("https://wa.me/6281234567890?text="));
    assert!(html.contains(r#"data-target="120""#));
    assert!(out.path().join("assets/logo.svg").exists());
    assert!(out.path().join("assets/gallery/tile-1.svg").exists());

    let text = stdout(&output);
    assert!(text.contains("Counters: 120+, 5"), "{text}");
    assert!(text.contains("(3 files)"), "{text}");
    assert!(text.contains("==> Build complete"));
}

#[test]
fn check_reports_sections() {
    let output = run(&["check", "--source", path_str(&fixture_site())]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("001 Hero (1 slides)"), "{text}");
    assert!(text.contains("002 Stats (2 counters)"), "{text}");
    assert!(text.contains("==> Config is valid"));
}

#[test]
fn check_rejects_invalid_config() {
    let site = TempDir::new().unwrap();
    std::fs::write(
        site.path().join("config.toml"),
        "[contact]\nwhatsapp_number = \"+62 812\"\n",
    )
    .unwrap();
    let output = run(&["check", "--source", path_str(site.path())]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("whatsapp_number"));
}

#[test]
fn check_rejects_unknown_keys() {
    let site = TempDir::new().unwrap();
    std::fs::write(site.path().join("config.toml"), "[hero]\nspeed = 2\n").unwrap();
    let output = run(&["check", "--source", path_str(site.path())]);
    assert!(!output.status.success());
}

#[test]
fn gen_config_round_trips_to_defaults() {
    let output = run(&["gen-config"]);
    assert!(output.status.success());

    let site = TempDir::new().unwrap();
    std::fs::write(site.path().join("config.toml"), &output.stdout).unwrap();
    let check = run(&["check", "--source", path_str(site.path())]);
    assert!(check.status.success());
    assert!(stdout(&check).contains("001 Klien Puas \u{2192} 500+"));
}

#[test]
fn simulate_prints_settled_counters_and_rotator() {
    let output = run(&["simulate", "--source", path_str(&fixture_site()), "--frame-ms", "20"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let text = stdout(&output);
    assert!(text.contains("001 Klien Puas \u{2192} 120+"), "{text}");
    assert!(text.contains("002 Rating \u{2192} 5"), "{text}");
    assert!(text.contains("Rotator (1 slides, every 4000ms, over 12500ms)"), "{text}");
}

#[test]
fn simulate_stock_rotator_changes_twice() {
    let site = TempDir::new().unwrap();
    let output = run(&["simulate", "--source", path_str(site.path())]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("    5000ms \u{2192} slide 2"), "{text}");
    assert!(text.contains("    10000ms \u{2192} slide 1"), "{text}");
    assert!(text.contains("Showing slide 1 after 2 changes"), "{text}");
}
