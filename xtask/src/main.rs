//! Tooling tasks for slot-reels
//!
//! Usage:
//!   cargo xtask simulate --spins 3       # Run spins headlessly and report
//!   cargo xtask check-config [PATH]      # Validate a RON config
//!   cargo xtask build-web [--dev]        # Build WASM and stage dist/web

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use slot_reels::config::{SlotConfig, DEFAULT_CONFIG_PATH};
use slot_reels::tween::{Clock, ManualClock};
use slot_reels::SlotScene;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Frames a single spin may take before the simulation gives up
const MAX_FRAMES_PER_SPIN: u32 = 100_000;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Tooling for slot-reels")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Spin the reels headlessly at a fixed frame rate
    Simulate {
        /// Number of back-to-back spins
        #[arg(long, default_value_t = 1)]
        spins: u32,
        /// Simulated frames per second
        #[arg(long, default_value_t = 60.0)]
        fps: f64,
        /// RNG seed (overrides the config seed)
        #[arg(long)]
        seed: Option<u64>,
        /// Config file (defaults to assets/slots.ron, or built-in defaults)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Load and validate a config file
    CheckConfig {
        /// Path to the RON config
        path: Option<PathBuf>,
    },
    /// Build WASM for web deployment
    BuildWeb {
        /// Mark as dev build (adds DEV to the page title)
        #[arg(long)]
        dev: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { spins, fps, seed, config } => simulate(spins, fps, seed, config),
        Commands::CheckConfig { path } => check_config(path),
        Commands::BuildWeb { dev } => build_web(dev),
    }
}

/// Get the project root directory
fn project_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask has no parent directory")
}

fn load_config(path: Option<PathBuf>) -> Result<SlotConfig> {
    match path {
        Some(path) => SlotConfig::load(&path).with_context(|| format!("Failed to load {}", path.display())),
        None => Ok(SlotConfig::load_or_default(&project_root()?.join(DEFAULT_CONFIG_PATH))),
    }
}

/// Run spins against a manual clock and print what each reel did
fn simulate(spins: u32, fps: f64, seed: Option<u64>, config: Option<PathBuf>) -> Result<()> {
    if !(fps.is_finite() && fps > 0.0) {
        anyhow::bail!("fps must be positive (got {})", fps);
    }
    let config = load_config(config)?;
    let seed = seed.or(config.seed).unwrap_or(0);
    let frame_ms = 1000.0 / fps;

    let clock = ManualClock::new(0.0);
    let mut scene = SlotScene::from_config(&config, clock.clone(), seed);

    println!("Simulating {} spin(s) at {} fps, seed {}", spins, fps, seed);

    for spin in 1..=spins {
        if !scene.spin() {
            anyhow::bail!("Spin {} did not start", spin);
        }
        let plans = scene.machine.last_plans().to_vec();
        let skins_before: Vec<u32> = scene
            .machine
            .reels
            .iter()
            .map(|r| r.symbols.iter().map(|s| s.reskins).sum())
            .collect();

        let started = clock.now_ms();
        let mut frames = 0u32;
        let mut recycled = 0usize;
        while scene.is_running() {
            clock.advance(frame_ms);
            recycled += scene.update().symbols_recycled;
            frames += 1;
            if frames >= MAX_FRAMES_PER_SPIN {
                anyhow::bail!("Spin {} still running after {} frames", spin, frames);
            }
        }

        println!(
            "Spin {}: idle after {} frames ({:.0} ms), {} symbols recycled",
            spin,
            frames,
            clock.now_ms() - started,
            recycled
        );
        for (plan, (reel, before)) in plans.iter().zip(scene.machine.reels.iter().zip(&skins_before)) {
            let skins: u32 = reel.symbols.iter().map(|s| s.reskins).sum();
            println!(
                "  reel {}: extra {} -> position {} over {} ms, {} symbols recycled",
                plan.reel,
                plan.extra,
                reel.position,
                plan.duration_ms,
                skins - before
            );
        }
    }
    Ok(())
}

/// Validate a config and print a summary
fn check_config(path: Option<PathBuf>) -> Result<()> {
    let path = match path {
        Some(p) => p,
        None => project_root()?.join(DEFAULT_CONFIG_PATH),
    };
    let config = SlotConfig::load(&path).with_context(|| format!("Invalid config {}", path.display()))?;

    println!("{}: OK", path.display());
    println!(
        "  {} reels x {} symbols, cell {} px, reel width {} px",
        config.layout.reel_count, config.layout.symbols_per_reel, config.layout.symbol_size, config.layout.reel_width
    );
    println!(
        "  roll {} ms base, +{} ms per reel, +{} ms per extra, easing {}",
        config.spin.base_duration_ms,
        config.spin.duration_per_reel_ms,
        config.spin.duration_per_extra_ms,
        config.spin.easing.label()
    );
    for tex in &config.textures {
        let source = if tex.has_image() { tex.path.as_str() } else { "placeholder" };
        println!("  symbol {} ({}x{}) {}", tex.name, tex.width, tex.height, source);
    }
    Ok(())
}

/// Run a command and check for success
fn run_cmd(cmd: &mut Command) -> Result<()> {
    let status = cmd.status().context("Failed to execute command")?;
    if !status.success() {
        anyhow::bail!("Command failed with status: {}", status);
    }
    Ok(())
}

/// Copy directory recursively
fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Build WASM and stage it with the page, JS bundle, and assets
fn build_web(dev: bool) -> Result<()> {
    let root = project_root()?;
    let dist = root.join("dist/web");

    println!("Building WASM...");
    run_cmd(
        Command::new("cargo")
            .current_dir(&root)
            .args(["build", "--release", "--bin", "slot-reels", "--target", "wasm32-unknown-unknown"]),
    )?;

    if dist.exists() {
        std::fs::remove_dir_all(&dist)?;
    }
    std::fs::create_dir_all(&dist)?;

    println!("Copying files to dist/web...");
    std::fs::copy(
        root.join("target/wasm32-unknown-unknown/release/slot-reels.wasm"),
        dist.join("slot-reels.wasm"),
    )
    .context("WASM binary missing after build")?;

    let index = std::fs::read_to_string(root.join("web/index.html")).context("web/index.html missing")?;
    let index = if dev {
        index.replace("<title>", "<title>[DEV] ")
    } else {
        index
    };
    std::fs::write(dist.join("index.html"), index)?;

    let mq_js = dist.join("mq_js_bundle.js");
    println!("Downloading macroquad JS bundle...");
    run_cmd(
        Command::new("curl")
            .args(["-L", "-o"])
            .arg(&mq_js)
            .arg("https://raw.githubusercontent.com/not-fl3/macroquad/v0.4.14/js/mq_js_bundle.js"),
    )?;

    let assets = root.join("assets");
    if assets.exists() {
        copy_dir_recursive(&assets, &dist.join("assets"))?;
    }

    println!("Web build complete: dist/web/");
    Ok(())
}
