//! meshcast - STL inspection and conversion tool
//!
//! Thin command-line front-end over `meshcast-core`: parses STL files,
//! reports their contents, and re-encodes them through the export engine.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use meshcast_core::export::DEFAULT_SOLID_NAME;
use meshcast_core::measure::Aabb;
use meshcast_core::stl::{self, StlFormat};
use meshcast_core::{write_ascii, write_binary, ExportOptions, MeshNode, Transform};

#[derive(Parser)]
#[command(name = "meshcast")]
#[command(about = "Inspect and convert STL mesh files")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report format, solid name, facet count, and bounds of an STL file
    Info {
        /// Path to the STL file
        file: PathBuf,
    },

    /// Re-encode an STL file through the export engine
    Convert {
        /// Input STL file (ASCII or binary, autodetected)
        input: PathBuf,

        /// Output STL file
        output: PathBuf,

        /// Output encoding
        #[arg(short, long, value_enum, default_value = "binary")]
        format: Format,

        /// Solid name for the output (defaults to the input's name)
        #[arg(short, long)]
        name: Option<String>,

        /// Uniform unit scale applied to all vertices (e.g. 1000 for m -> mm)
        #[arg(short, long, default_value_t = 1.0)]
        scale: f64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Ascii,
    Binary,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { file } => cmd_info(&file),
        Commands::Convert {
            input,
            output,
            format,
            name,
            scale,
        } => cmd_convert(&input, &output, format, name, scale),
    }
}

fn cmd_info(path: &Path) -> Result<()> {
    let (format, model) = read_stl(path)?;

    println!("file:    {}", path.display());
    println!(
        "format:  {}",
        match format {
            StlFormat::Ascii => "ASCII",
            StlFormat::Binary => "binary",
        }
    );
    println!("solid:   {}", model.name.as_deref().unwrap_or("(unnamed)"));
    println!("facets:  {}", model.facet_count());

    let vertices = model.facets.iter().flat_map(|facet| facet.vertices);
    if let Some(bounds) = Aabb::from_points(vertices) {
        let size = bounds.size();
        println!(
            "min:     [{:.4}, {:.4}, {:.4}]",
            bounds.min.x, bounds.min.y, bounds.min.z
        );
        println!(
            "max:     [{:.4}, {:.4}, {:.4}]",
            bounds.max.x, bounds.max.y, bounds.max.z
        );
        println!("size:    [{:.4}, {:.4}, {:.4}]", size.x, size.y, size.z);
    }

    Ok(())
}

fn cmd_convert(
    input: &Path,
    output: &Path,
    format: Format,
    name: Option<String>,
    scale: f64,
) -> Result<()> {
    let (_, model) = read_stl(input)?;
    info!("read {} facets from {}", model.facet_count(), input.display());

    let solid_name = name
        .or_else(|| model.name.clone())
        .unwrap_or_else(|| DEFAULT_SOLID_NAME.to_string());
    let options = ExportOptions::named(solid_name).with_scale(scale);

    let scene = MeshNode::leaf(model.to_geometry(), Transform::identity());

    let file = File::create(output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    match format {
        Format::Ascii => write_ascii(&scene, &options, &mut writer)?,
        Format::Binary => write_binary(&scene, &options, &mut writer)?,
    }
    writer.flush()?;

    println!(
        "wrote {} facets to {}",
        model.facet_count(),
        output.display()
    );
    Ok(())
}

fn read_stl(path: &Path) -> Result<(StlFormat, stl::StlModel)> {
    let data = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    stl::parse(&data).with_context(|| format!("failed to parse {}", path.display()))
}
