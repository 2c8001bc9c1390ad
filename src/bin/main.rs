//! Pack Mesher CLI
//!
//! Generate GLB 3D assets from texture pack content.

use clap::{Parser, Subcommand};
use pack_mesher::pack::loader::{load_model_dir, DirTextureSource};
use pack_mesher::{
    item_to_glb, model_to_glb, CoordinateSystem, ItemMeshConfig, ModelMeshConfig, Texture,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pack-mesher")]
#[command(author, version, about = "Generate GLB 3D assets from texture pack content", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extrude a flat item texture into a voxel GLB
    Item {
        /// Input PNG texture
        #[arg(short, long)]
        texture: PathBuf,

        /// Output GLB file path
        #[arg(short, long)]
        output: PathBuf,

        /// Edge length of the longer texture axis in output units
        #[arg(long, default_value = "1.0")]
        scale: f32,

        /// Emit Y-up (no root rotation) instead of the Z-up default
        #[arg(long)]
        y_up: bool,
    },

    /// Mesh a JSON block/entity model into a GLB
    Model {
        /// Model name within the model directory (e.g. "block/chest")
        #[arg(short, long)]
        model: String,

        /// Directory of model JSON documents
        #[arg(long)]
        model_dir: PathBuf,

        /// Directory of textures (block/, entity/, item/ subdirectories)
        #[arg(long)]
        texture_dir: PathBuf,

        /// Output GLB file path
        #[arg(short, long)]
        output: PathBuf,

        /// Multiplier applied to centered 0-16 coordinates
        #[arg(long, default_value = "0.0625")]
        scale: f32,

        /// Emit Y-up (no root rotation) instead of the Z-up default
        #[arg(long)]
        y_up: bool,
    },
}

fn coords(y_up: bool) -> CoordinateSystem {
    if y_up {
        CoordinateSystem::YUp
    } else {
        CoordinateSystem::ZUp
    }
}

fn run(cli: Cli) -> pack_mesher::Result<()> {
    match cli.command {
        Commands::Item {
            texture,
            output,
            scale,
            y_up,
        } => {
            let name = texture
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "item".to_string());

            let pixels = Texture::from_png_bytes(&std::fs::read(&texture)?)?;
            let config = ItemMeshConfig {
                scale,
                coords: coords(y_up),
            };

            match item_to_glb(&pixels, &name, &config)? {
                Some(glb) => {
                    std::fs::write(&output, &glb)?;
                    println!("Wrote {} ({} bytes)", output.display(), glb.len());
                }
                None => println!("{}: no opaque pixels, nothing to write", name),
            }
        }

        Commands::Model {
            model,
            model_dir,
            texture_dir,
            output,
            scale,
            y_up,
        } => {
            let store = load_model_dir(&model_dir)?;
            let textures = DirTextureSource::new(&texture_dir);

            let mut warnings = Vec::new();
            let resolved = store.resolve(&model, &mut warnings)?;
            let name = model.rsplit('/').next().unwrap_or(&model).to_string();

            let config = ModelMeshConfig {
                scale,
                coords: coords(y_up),
            };

            match model_to_glb(&resolved, &textures, &name, &config)? {
                Some(glb) => {
                    std::fs::write(&output, &glb)?;
                    println!("Wrote {} ({} bytes)", output.display(), glb.len());
                }
                None => println!("{}: model produced no geometry, nothing to write", model),
            }
        }
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
