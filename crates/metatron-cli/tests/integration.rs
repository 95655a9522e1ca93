//! Integration tests for metatron CLI commands.
//!
//! These tests run the actual binary and verify end-to-end behavior.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

/// Path to the metatron binary built for this test run.
fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_metatron"))
}

fn run(args: &[&str]) -> Output {
    Command::new(binary_path())
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// A scratch directory unique to one test.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("metatron-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).expect("Failed to create scratch dir");
    dir
}

#[test]
fn render_produces_svg() {
    let output = run(&["render"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("<?xml"), "Should have XML declaration");
    assert!(stdout.contains("<svg"), "Should have SVG element");
    assert!(stdout.contains("</svg>"), "Should close SVG element");
    assert_eq!(stdout.matches("<line ").count(), 42);
    assert_eq!(stdout.matches("<circle ").count(), 13);
}

#[test]
fn render_four_copies_without_circles() {
    let output = run(&["render", "-n", "4", "--no-circles"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("<line ").count(), 4 * 42);
    assert_eq!(stdout.matches("<circle ").count(), 0);
    assert_eq!(stdout.matches("<g ").count(), 4);
}

#[test]
fn render_json_lists_draw_calls() {
    let output = run(&["render", "-n", "2", "--json"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"summary\""), "Should have summary key");
    assert!(stdout.contains("\"set_color\""), "Should have color ops");
    assert!(stdout.contains("\"x1\""), "Should have x1 coordinate");
    assert!(stdout.contains("\"cx\""), "Should have circle centers");
    assert_eq!(stdout.matches("\"op\": \"line\"").count(), 2 * 42);
}

#[test]
fn render_light_mode_uses_white_background() {
    let output = run(&["render", "--mode", "light", "-n", "4"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("fill=\"#ffffff\""));
    assert!(!stdout.contains("stroke=\"#0000ff\""));
}

#[test]
fn render_writes_files() {
    let dir = scratch_dir("files");
    let svg = dir.join("cube.svg");
    let png = dir.join("cube.png");

    let output = run(&[
        "render",
        "--width", "200",
        "--height", "200",
        "-o", svg.to_str().unwrap(),
        "--png", png.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    assert!(fs::read_to_string(&svg).unwrap().contains("<svg"));
    let bytes = fs::read(&png).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn render_reads_scene_file() {
    let dir = scratch_dir("scene");
    let scene = dir.join("scene.yaml");
    fs::write(&scene, "copies: 2\nshow_circles: false\n").unwrap();

    let output = run(&["render", "-c", scene.to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("<line ").count(), 2 * 42);
    assert_eq!(stdout.matches("<circle ").count(), 0);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn page_produces_printable_svg() {
    let output = run(&["page", "-n", "4"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("width=\"612.00\""));
    assert!(stdout.contains("stroke-width=\"0.40\""));
    assert!(stdout.contains("stroke=\"#000000\""));
    assert_eq!(stdout.matches("<line ").count(), 4 * 42);
}

#[test]
fn page_places_drawing_inside_margins() {
    let output = run(&["page", "--margin", "36"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("transform=\"translate(36.00 36.00)\""));
    // min(540, 720) / 5, centered in the imageable area
    assert!(stdout.contains("<circle cx=\"270.00\" cy=\"360.00\" r=\"54.00\""));
}

#[test]
fn page_uses_scene_stroke_width() {
    let dir = scratch_dir("page-stroke");
    let scene = dir.join("scene.yaml");
    fs::write(&scene, "stroke_width: 3.0\n").unwrap();

    let output = run(&["page", "-c", scene.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("stroke-width=\"3.00\""));

    let output = run(&["page", "-c", scene.to_str().unwrap(), "-w", "0.5"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("stroke-width=\"0.50\""));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn page_rejects_negative_margin() {
    let output = run(&["page", "--margin=-200"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("margin"));
}

#[test]
fn page_plot_emits_polylines() {
    let output = run(&["page", "--plot"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"layers\""));
    assert!(stdout.contains("\"polylines\""));
}

#[test]
fn info_lists_rotations() {
    let output = run(&["info", "-n", "4"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("30.0°"));
    assert!(stdout.contains("45.0°"));
    assert!(stdout.contains("60.0°"));
    assert!(stdout.contains("75.0°"));
    assert!(stdout.contains("168 segments"));
}

#[test]
fn out_of_set_copy_count_draws_four() {
    let output = run(&["info", "-n", "3"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("4 drawn"));
}

#[test]
fn bad_color_fails() {
    let output = run(&["render", "--palette", "red,blue,nope,green"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid palette"), "stderr: {}", stderr);
}

#[test]
fn non_finite_numbers_fail() {
    for args in [
        &["render", "--width", "NaN"][..],
        &["render", "--height", "inf"][..],
        &["render", "--top-offset", "NaN"][..],
        &["render", "-r", "NaN"][..],
        &["render", "-w", "NaN"][..],
        &["render", "--png-scale", "NaN", "--png", "unused.png"][..],
        &["page", "--margin", "NaN"][..],
        &["page", "--plot", "--tolerance", "NaN"][..],
        &["info", "--width", "NaN"][..],
    ] {
        let output = run(args);
        assert!(!output.status.success(), "{:?} should fail", args);
        assert!(output.stdout.is_empty(), "{:?} wrote output", args);
    }
}

#[test]
fn info_follows_scene_canvas() {
    let dir = scratch_dir("info-canvas");
    let scene = dir.join("scene.yaml");
    fs::write(&scene, "canvas: { width: 520, height: 300, top_offset: 40 }\n").unwrap();

    let output = run(&["info", "-c", scene.to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("50.00 on screen, 52.00 printed (520x260 area)"), "{}", stdout);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn unparseable_copy_count_fails() {
    let output = run(&["render", "-n", "many"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn help_command_shows_usage() {
    let output = run(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("render"), "Should mention render command");
    assert!(stdout.contains("page"), "Should mention page command");
    assert!(stdout.contains("info"), "Should mention info command");
}
