use clap::{Parser, Subcommand};
use clothsim_core::{run_scene, SceneConfig, SimulationResult};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "clothsim")]
#[command(about = "Clothsim - Mass-spring cloth simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scene headless and print the final state of each cloth
    Run {
        /// Scene file; the built-in clothesline scene is used when omitted
        #[arg(long)]
        scene: Option<PathBuf>,
        /// Number of frames to run
        #[arg(long, default_value_t = 200)]
        frames: usize,
        #[arg(long)]
        ticks_per_frame: Option<usize>,
        /// Integration time step in seconds
        #[arg(long)]
        dt: Option<f32>,
        /// Wind magnitude
        #[arg(long)]
        wind: Option<f32>,
        /// Resample every cloth to this many samples per edge
        #[arg(long)]
        samples: Option<usize>,
    },
    /// Print the built-in clothesline scene as JSON
    Preset,
}

struct Overrides {
    ticks_per_frame: Option<usize>,
    dt: Option<f32>,
    wind: Option<f32>,
    samples: Option<usize>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            scene,
            frames,
            ticks_per_frame,
            dt,
            wind,
            samples,
        } => {
            let overrides = Overrides {
                ticks_per_frame,
                dt,
                wind,
                samples,
            };
            match run_file(scene.as_ref(), frames, overrides) {
                Ok(result) => {
                    print_result(&result);
                    if result.halted {
                        std::process::exit(2);
                    }
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Preset => match SceneConfig::clothesline().to_json_pretty() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
    }
}

fn run_file(
    file: Option<&PathBuf>,
    frames: usize,
    overrides: Overrides,
) -> Result<SimulationResult, Box<dyn std::error::Error>> {
    let mut config = match file {
        Some(path) => {
            log::info!("loading scene from {}", path.display());
            SceneConfig::from_file(path)?
        }
        None => SceneConfig::clothesline(),
    };

    if let Some(ticks) = overrides.ticks_per_frame {
        config.simulation.ticks_per_frame = ticks;
    }
    if let Some(dt) = overrides.dt {
        config.simulation.dt = dt;
    }
    if let Some(magnitude) = overrides.wind {
        config.simulation.wind.magnitude = magnitude;
    }
    if let Some(samples) = overrides.samples {
        config = config.with_samples(samples);
    }

    Ok(run_scene(&config, frames)?)
}

fn print_result(result: &SimulationResult) {
    println!("frames = {}, ticks = {}", result.frames, result.ticks);
    for cloth in &result.cloths {
        println!(
            "{}: {} particles, lowest point {:.4}, max speed {:.4}",
            cloth.id, cloth.particles, cloth.min_height, cloth.max_speed
        );
    }
    match &result.diverged {
        Some((id, divergence)) => println!("halted: cloth '{}' diverged ({})", id, divergence),
        None => println!("halted: no"),
    }
}
