// Copyright 2026 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `waymark` command.
//!
//! - `waymark generate <name>` writes a synthetic island dataset.
//! - `waymark render <name>` loads a dataset into a headless viewport,
//!   optionally pans and zooms it, reloads, and writes the raster as a PNG.
//!
//! Logging goes through `tracing`; set `RUST_LOG=debug` for decode details.

mod generate;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Render and generate Waymark map datasets")]
struct Args {
    /// Directory holding `<name>.dat` dataset files
    #[arg(long, global = true, default_value = ".")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a dataset to a PNG file
    Render(render::RenderArgs),

    /// Write a synthetic dataset
    Generate {
        /// Dataset name; the file is written as `<data-dir>/<name>.dat`
        #[arg(default_value = "sample")]
        name: String,

        /// Number of coastline vertices
        #[arg(long, default_value_t = 2_000)]
        detail: u32,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    match args.command {
        Command::Render(render_args) => render::run(&args.data_dir, &render_args),
        Command::Generate { name, detail } => generate::run(&args.data_dir, &name, detail),
    }
}
