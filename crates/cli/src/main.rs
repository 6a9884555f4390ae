#![deny(unsafe_code)]
//! Offline preview CLI for the Villani explorer visualizers.
//!
//! Subcommands:
//! - `render <name>`: run a visualizer for N frames, write an SVG (or the
//!   last frame's draw commands as JSON with `--commands`)
//! - `describe <name>`: print the parameter schema
//! - `list`: print available visualizers

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use std::path::PathBuf;
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use villani_core::{Animation, FrameLoop, ManualScheduler, RecordingSurface, Surface};
use villani_viz::svg::SvgSurface;
use villani_viz::VisualizerKind;

#[derive(Parser)]
#[command(name = "villani", about = "Preview the Villani explorer visualizers")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a visualizer for N frames and write an SVG snapshot.
    Render {
        /// Visualizer name (e.g. "transport").
        name: String,

        /// Canvas width in pixels.
        #[arg(short = 'W', long, default_value_t = 600.0)]
        width: f64,

        /// Canvas height in pixels.
        #[arg(short = 'H', long, default_value_t = 300.0)]
        height: f64,

        /// Number of animation frames; 0 renders the initial state.
        #[arg(short, long, default_value_t = 60)]
        frames: usize,

        /// PRNG seed for deterministic point clouds.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Output file path.
        #[arg(short, long, default_value = "output.svg")]
        output: PathBuf,

        /// Visualizer parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Write the last frame's draw commands as JSON instead of an SVG.
        #[arg(long)]
        commands: bool,
    },
    /// Print the parameter schema of a visualizer.
    Describe {
        name: String,
    },
    /// List available visualizers.
    List,
}

/// Runs up to `frames` frames of a visualizer on `surface`.
///
/// Frames are driven through the same frame loop the page uses, so a run
/// that finishes early (the entropy plot) simply stops. Returns the surface
/// and the number of frames that drew; the frame that reports completion
/// draws nothing and is not counted.
fn run_visualizer<S: Surface + Clone + 'static>(
    name: &str,
    surface: S,
    frames: usize,
    seed: u64,
    params: &serde_json::Value,
) -> Result<(S, usize), CliError> {
    let viz = VisualizerKind::from_name(name, surface, seed, params)?;
    let scheduler = ManualScheduler::new();
    let lp = FrameLoop::new(viz, scheduler.clone());

    let drawn = if frames == 0 {
        lp.with_animation_mut(|v| v.render());
        0
    } else {
        lp.start();
        let ran = 1 + scheduler.run_frames(frames - 1);
        if lp.is_running() {
            ran
        } else {
            ran - 1
        }
    };
    lp.stop();
    debug!(name, drawn, "frames complete");
    Ok((lp.with_animation(|v| v.surface().clone()), drawn))
}

fn render_svg(
    name: &str,
    width: f64,
    height: f64,
    frames: usize,
    seed: u64,
    params: &serde_json::Value,
) -> Result<(SvgSurface, usize), CliError> {
    run_visualizer(name, SvgSurface::new(width, height)?, frames, seed, params)
}

fn render_commands(
    name: &str,
    width: f64,
    height: f64,
    frames: usize,
    seed: u64,
    params: &serde_json::Value,
) -> Result<(RecordingSurface, usize), CliError> {
    run_visualizer(name, RecordingSurface::new(width, height)?, frames, seed, params)
}

/// Writes the recorded draw commands as pretty-printed JSON at `path`.
fn write_commands(surface: &RecordingSurface, path: &std::path::Path) -> Result<(), CliError> {
    let doc = serde_json::to_string_pretty(surface.commands())?;
    std::fs::write(path, doc).map_err(|e| CliError::Io(format!("{}: {e}", path.display())))
}

fn default_surface() -> Result<SvgSurface, CliError> {
    Ok(SvgSurface::new(600.0, 300.0)?)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let names = VisualizerKind::<SvgSurface>::list_visualizers();
            if cli.json {
                let info = serde_json::json!({ "visualizers": names });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Visualizers:");
                for name in names {
                    println!("  {name}");
                }
            }
        }
        Command::Describe { name } => {
            let viz =
                VisualizerKind::from_name(&name, default_surface()?, 0, &serde_json::json!({}))?;
            let schema = viz.param_schema();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&schema)?);
            } else {
                println!("{name} parameters:");
                if let Some(fields) = schema.as_object() {
                    for (key, field) in fields {
                        println!(
                            "  {key:<14} {:<8} default {:<8} {}",
                            field["type"].as_str().unwrap_or("?"),
                            field["default"],
                            field["description"].as_str().unwrap_or("")
                        );
                    }
                }
            }
        }
        Command::Render {
            name,
            width,
            height,
            frames,
            seed,
            output,
            params,
            commands,
        } => {
            let params: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;

            let ran = if commands {
                let (surface, ran) = render_commands(&name, width, height, frames, seed, &params)?;
                write_commands(&surface, &output)?;
                ran
            } else {
                let (surface, ran) = render_svg(&name, width, height, frames, seed, &params)?;
                villani_viz::snapshot::write_svg(&surface, &output)?;
                ran
            };
            info!(name = %name, ran, output = %output.display(), "snapshot written");

            if cli.json {
                let info = serde_json::json!({
                    "visualizer": name,
                    "width": width,
                    "height": height,
                    "frames": ran,
                    "seed": seed,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {name} ({width}x{height}, {ran} frames, seed {seed}) -> {}",
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
