use crate::config::load_config;
use crate::render::{encode_png, render_scene, write_output_png};
use crate::render_dump::write_render_dump;
use crate::snapshot::MapSnapshot;
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "vmr", version, about = "Render a Valetudo map snapshot to PNG")]
pub struct Args {
    /// Snapshot JSON file, or '-' for stdin. Accepts a bare map or a robot
    /// state document with a `map` field.
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output PNG file, or '-' for stdout
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Config JSON/JSON5 file (scale, finalUpscale, themeVariables, ...)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Canvas units per grid cell
    #[arg(short = 's', long = "scale")]
    pub scale: Option<f32>,

    /// Magnification applied to the finished image
    #[arg(short = 'u', long = "upscale")]
    pub upscale: Option<f32>,

    /// Write a JSON description of the render (bounds, sizes, skipped items)
    #[arg(long = "dump")]
    pub dump: Option<PathBuf>,
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(scale) = args.scale {
        config.scale = scale;
    }
    if let Some(upscale) = args.upscale {
        config.final_upscale = upscale;
    }
    config.validate()?;

    let input = read_input(args.input.as_deref())?;
    let snapshot = parse_snapshot(&input)?;

    let (pixmap, dump) = render_scene(&snapshot, &config)?;
    if let Some(dump_path) = args.dump.as_deref() {
        write_render_dump(dump_path, &dump)
            .with_context(|| format!("failed to write dump to {}", dump_path.display()))?;
        if args.output.is_none() {
            return Ok(());
        }
    }

    let output = ensure_output(&args.output)?;
    let png = encode_png(&pixmap)?;
    info!(
        width = pixmap.width(),
        height = pixmap.height(),
        bytes = png.len(),
        "rendered map"
    );
    if output == Path::new("-") {
        write_output_png(&png, None)?;
    } else {
        write_output_png(&png, Some(&output))?;
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()));
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for png output"))
}

/// Accepts either a bare map document or a full robot state whose map sits
/// under `map`.
fn parse_snapshot(input: &str) -> Result<MapSnapshot> {
    let mut value: serde_json::Value = serde_json::from_str(input).context("input is not JSON")?;
    let is_state = value.get("layers").is_none() && value.get("map").is_some_and(|m| m.is_object());
    if is_state {
        value = value["map"].take();
    }
    serde_json::from_value(value).context("input is not a map snapshot")
}
