//! Mason CLI
//!
//! Headless front end for the masonry engine:
//! - `mason layout`: pack an item file and print the placements
//! - `mason simulate`: run the animated engine through a series of resizes
//! - `mason init`: write a `mason.toml` with every option spelled out

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Responsive masonry layout, headless
#[derive(Parser, Debug)]
#[command(name = "mason")]
#[command(about = "Preview and simulate masonry layouts")]
#[command(version)]
struct Cli {
    /// Config file or directory containing mason.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pack items into columns and print the result
    Layout {
        /// Item file (JSON array)
        #[arg(short, long)]
        items: Option<PathBuf>,

        /// Container width; defaults to the viewport width
        #[arg(long)]
        width: Option<f32>,

        /// Viewport width used to pick the column count
        #[arg(long)]
        viewport_width: Option<f32>,

        /// Column gap in pixels
        #[arg(long)]
        gap: Option<f32>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Run the engine with animations through a sequence of viewport widths
    Simulate {
        /// Item file (JSON array)
        #[arg(short, long)]
        items: Option<PathBuf>,

        /// Viewport width to resize to; repeat for a sequence
        #[arg(short, long = "resize")]
        resizes: Vec<f32>,

        /// Frames per second of the simulated clock
        #[arg(long, default_value = "60", value_parser = clap::value_parser!(u32).range(1..=1000))]
        fps: u32,

        /// Frames to run between consecutive resizes
        #[arg(long, default_value = "12")]
        frames_between: u32,

        /// Hover the tile with this item id once the run settles
        #[arg(long)]
        hover: Option<String>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Write a mason.toml with default settings
    Init {
        /// Directory to write into
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Layout {
            items,
            width,
            viewport_width,
            gap,
            format,
        } => {
            let config = config::MasonConfig::load(cli.config.as_deref())?;
            commands::layout(
                &config,
                commands::LayoutArgs {
                    items,
                    width,
                    viewport_width,
                    gap,
                    format,
                },
            )
        }
        Commands::Simulate {
            items,
            resizes,
            fps,
            frames_between,
            hover,
            format,
        } => {
            let config = config::MasonConfig::load(cli.config.as_deref())?;
            commands::simulate(
                &config,
                commands::SimulateArgs {
                    items,
                    resizes,
                    fps,
                    frames_between,
                    hover,
                    format,
                },
            )
        }
        Commands::Init { path, force } => commands::init(&path, force),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_is_bounded() {
        let cli = Cli::try_parse_from(["mason", "simulate", "--fps", "30"]).unwrap();
        assert!(matches!(cli.command, Commands::Simulate { fps: 30, .. }));

        assert!(Cli::try_parse_from(["mason", "simulate", "--fps", "500000000"]).is_err());
        assert!(Cli::try_parse_from(["mason", "simulate", "--fps", "0"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
