// Command-line runner for the picker: loads an image, samples the color under a
// point the same way a touch would, and prints it.

use anyhow::{Context, Result};
use clap::Parser;
use image_color_picker::{ColorPicker, PickerConfig, PoolingStrategy};
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "image_color_picker", about = "Pick a color from an image at a point")]
struct Args {
    /// Image to sample
    image: PathBuf,

    /// Horizontal position of the probe center, in pixels
    #[arg(short, long, allow_negative_numbers = true)]
    x: i32,

    /// Vertical position of the probe center, in pixels
    #[arg(short, long, allow_negative_numbers = true)]
    y: i32,

    /// Probe radius, overrides the config file
    #[arg(short, long)]
    radius: Option<i32>,

    /// Pooling strategy: average, brightest, darkest or max
    #[arg(short, long)]
    pooling: Option<PoolingStrategy>,

    /// JSON picker configuration
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => PickerConfig::from_json_file(path)?,
        None => PickerConfig::default(),
    };
    if let Some(radius) = args.radius {
        config.probe_radius = radius;
    }
    if let Some(pooling) = args.pooling {
        config.pooling = pooling;
    }

    let image = image::open(&args.image)
        .with_context(|| format!("opening {}", args.image.display()))?
        .to_rgba8();
    info!(
        "loaded {} ({}x{})",
        args.image.display(),
        image.width(),
        image.height()
    );

    let picker = ColorPicker::with_image(image, config)?;
    let color = picker
        .pick_color(args.x, args.y)
        .with_context(|| format!("sampling at ({}, {})", args.x, args.y))?;

    let (alpha, red, green, blue) = color.channels();
    println!("{color}  a={alpha} r={red} g={green} b={blue}");
    Ok(())
}
