//! src/main.rs
//!
//! Entrypoint delegating to `app::run()`.

mod app;
mod cli;
mod demo;
mod graph;
mod logging;
mod panels;
mod timer;
mod ui;

use clap::Parser;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = cli::DemoArgs::parse();
    logging::init(&args.log_file, &args.log_level)?;
    app::run(args)
}
