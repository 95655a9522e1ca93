//! metatron - render Metatron's Cube diagrams
//!
//! Usage:
//!   metatron render [-n 4] [--mode light] [-o cube.svg] [--png cube.png]
//!   metatron page [--paper a4] [--landscape] [--plot]
//!   metatron info [-n 2]
//!
//! Set `RUST_LOG=debug` for per-render detail on stderr.

mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};

use cli::{cmd_info, cmd_page, cmd_render, InfoArgs, PageArgs, RenderArgs};

#[derive(Parser, Debug)]
#[command(name = "metatron", version, about = "Render Metatron's Cube diagrams")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render for screen display (SVG, PNG or JSON draw list)
    Render(RenderArgs),
    /// Render a printable page (SVG, PNG or plotter JSON)
    Page(PageArgs),
    /// Show the copies, rotations and colors a render would use
    Info(InfoArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Render(args) => cmd_render(args),
        Command::Page(args) => cmd_page(args),
        Command::Info(args) => cmd_info(args),
    }
}
