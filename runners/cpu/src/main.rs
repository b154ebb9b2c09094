use anyhow::Context;
use clap::{Parser, ValueEnum};
use spirv_std::glam::Vec4;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use strum::{Display, EnumString};
use tracing::info;
use tracing_subscriber::FmtSubscriber;
use view_runner_cpu::config::ViewConfig;
use view_runner_cpu::{VertexStage, positions_from_flat};

#[rustfmt::skip]
const SAMPLE_VERTICES: [f32; 9] = [
    1.0, 2.0, 3.0,
    0.0, 0.0, 0.0,
    1.0, 0.0, 0.0,
];

#[derive(Debug, EnumString, Display, PartialEq, Eq, Copy, Clone, ValueEnum)]
#[strum(serialize_all = "snake_case")]
pub enum OutputFormat {
    /// JSON array of `[x, y, z, w]`
    Json,
    /// native-endian `f32`s, four per vertex
    Raw,
}

#[derive(Parser, Clone, Debug)]
#[command(about = "Runs the view shader's vertex stage on the CPU")]
pub struct Options {
    /// JSON file holding a flat `x, y, z` float array
    #[arg(long)]
    vertices: Option<PathBuf>,

    /// JSON view description; the identity view is used without it
    #[arg(long)]
    view: Option<PathBuf>,

    /// where to write the clip-space positions, stdout by default
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

fn encode(positions: &[Vec4], format: OutputFormat) -> anyhow::Result<Vec<u8>> {
    let arrays: Vec<[f32; 4]> = positions.iter().map(|p| p.to_array()).collect();
    Ok(match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_vec_pretty(&arrays)?;
            json.push(b'\n');
            json
        }
        OutputFormat::Raw => bytemuck::cast_slice(&arrays).to_vec(),
    })
}

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set global subscriber")?;

    let options = Options::parse();

    let view = match &options.view {
        Some(path) => ViewConfig::from_path(path)?,
        None => ViewConfig::default(),
    };
    info!(steps = view.steps.len(), "view loaded");

    let flat = match &options.vertices {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("reading vertices from '{}' failed", path.display()))?;
            serde_json::from_str::<Vec<f32>>(&content)
                .with_context(|| format!("parsing vertices from '{}' failed", path.display()))?
        }
        None => SAMPLE_VERTICES.to_vec(),
    };
    let positions = positions_from_flat(&flat)?;

    let stage = VertexStage::new(view.constants());
    let start = Instant::now();
    let clip_positions = stage.draw(&positions);
    info!(vertices = clip_positions.len(), took = ?start.elapsed(), "draw finished");

    let bytes = encode(&clip_positions, options.format)?;
    match &options.output {
        Some(path) => fs::write(path, &bytes)
            .with_context(|| format!("writing output to '{}' failed", path.display()))?,
        None => std::io::stdout().lock().write_all(&bytes)?,
    }
    Ok(())
}
