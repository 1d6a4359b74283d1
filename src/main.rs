use clap::Parser;
use log::{error, info};

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;
use seethrough::output::save_image;
use seethrough::{Result, SceneConfig};

/// Load the scene and apply command line overrides.
fn scene_config(args: &Args) -> Result<SceneConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading scene from {}", path.display());
            SceneConfig::load(path)?
        }
        None => {
            info!("No scene file given, using the built-in demo scene");
            SceneConfig::default()
        }
    };

    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }
    if let Some(bounces) = args.bounces {
        config.render.max_bounces = bounces;
    }
    if args.depth_test_backdrop {
        config.render.depth_test_backdrop = true;
    }

    Ok(config)
}

fn run(args: &Args) -> Result<()> {
    let config = scene_config(args)?;
    let frame = config.build()?;

    info!(
        "Image resolution: {}x{}, bounces: {}, primitives: {}",
        frame.width,
        frame.height,
        frame.settings.max_bounces,
        frame.scene.len()
    );
    if frame.settings.depth_test_backdrop {
        info!("Backdrop planes are depth-tested against objects");
    }

    let image = frame.render();
    save_image(&image, &args.output)
}

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    // Log application startup with version information
    info!("Seethrough - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    if let Err(e) = run(&args) {
        error!("{e}");
        std::process::exit(1);
    }
}
