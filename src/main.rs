use anyhow::{bail, Result};
use clap::Parser;
use colored::*;
use std::io::Write;

use rusty_signs::args::Args;
use rusty_signs::camera::CameraSource;
use rusty_signs::compositor::OverlayCompositor;
use rusty_signs::config::AppConfig;
use rusty_signs::output::WindowOutput;
use rusty_signs::provider::OnnxLandmarkProvider;
use rusty_signs::session::Session;
use rusty_signs::types::DetectionMode;

fn main() -> Result<()> {
    let args = Args::parse();

    if args.list {
        let cameras = nokhwa::query(nokhwa::utils::ApiBackend::Auto)?;
        println!("Available Cameras:");
        println!("{:<5} | {:<30} | {:<10}", "Index", "Name", "Misc");
        println!("{}", "-".repeat(60));
        for cam in cameras {
            println!("{:<5} | {:<30} | {:?}", cam.index(), cam.human_name(), cam.misc());
        }
        return Ok(());
    }

    // 0. Load Config
    let config = AppConfig::load()?;

    // 1. Mode selection happens exactly once, before anything runs.
    let mode = match args.mode {
        Some(m) => m.into(),
        None => prompt_mode()?,
    };
    println!("{}", mode.title().cyan());

    // 2. Setup Camera
    let mut camera = CameraSource::new(args.cam_index as usize)?;
    println!("Opened camera: {}", camera.name());

    // 3. Setup Landmark Provider
    let mut provider = OnnxLandmarkProvider::new(mode)?;

    // 4. Setup Output
    let width = camera.width();
    let height = camera.height();
    let window = WindowOutput::new("Rusty Signs", width as usize, height as usize)?;
    println!("Window created successfully.");
    let mut sink = OverlayCompositor::new(window, config.ui, mode, config.defaults.show_landmarks);

    // 5. Run
    let mirror = config.defaults.mirror_mode && !args.no_mirror;
    let mut session = Session::new(mirror, config.thresholds);
    session.start(mode)?;
    println!("Controls: [Q] or [Esc] quits");

    match session.run(&mut camera, &mut provider, &mut sink) {
        Ok(()) => println!("Session ended."),
        Err(e) => {
            // Capture failures end the session cleanly; the camera and
            // window release on drop.
            eprintln!("{}", format!("Session ended: {:#}", e).red());
        }
    }

    Ok(())
}

/// Interactive stand-in for the welcome screen: pick a mode on stdin.
fn prompt_mode() -> Result<DetectionMode> {
    println!("Choose a detection mode:");
    println!("  [1] Facial expressions (smile, surprise, anger)");
    println!("  [2] Hand gestures (OK, like, heart, I love you)");
    println!("  [3] Both");

    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if std::io::stdin().read_line(&mut line)? == 0 {
            bail!("stdin closed before a mode was chosen");
        }
        match line.trim().to_lowercase().as_str() {
            "1" | "face" => return Ok(DetectionMode::FaceOnly),
            "2" | "hand" => return Ok(DetectionMode::HandOnly),
            "3" | "both" => return Ok(DetectionMode::Both),
            other => println!("Unrecognized choice '{}'", other),
        }
    }
}
