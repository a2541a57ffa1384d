use std::{path::Path, process::ExitCode};

use cli::{Args, Command};
use color_eyre::eyre::Context;
use color_eyre::Result;
use iconkit::{
    center_reference_assets,
    data::AssetStore,
    icon::CenterOptions,
    inspect::{ColorReport, ImageReport},
};
use serde::Serialize;
use tracing::info;

mod cli;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    tracing_subscriber::fmt::init();

    let invocation = Args::try_parse_invocation(std::env::args_os()).unwrap_or_else(|e| e.exit());
    let store = AssetStore::new(&invocation.assets_dir);

    match invocation.command {
        Command::Center { size, padding } => {
            let options = CenterOptions::new(size, padding).wrap_err("Invalid centering options")?;
            info!(%size, %padding, "Centering reference assets");
            let run = center_reference_assets(&store, &options);
            if !run.all_succeeded() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::CheckImage { name, json } => {
            let (img, _) = load(&store, &name)?;
            print_report(&ImageReport::of(&img), json)?;
        }
        Command::CheckColor { name, json } => {
            let (img, _) = load(&store, &name)?;
            print_report(&ColorReport::of(&img), json)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn load(store: &AssetStore, name: &Path) -> Result<(image::RgbaImage, image::ImageFormat)> {
    let path = store.path(name);
    store
        .load(&path)
        .wrap_err(format!("Inspecting {}", path.display()))
}

fn print_report(report: &(impl Serialize + std::fmt::Display), json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(report).wrap_err("Serializing report")?
        );
    } else {
        println!("{report}");
    }
    Ok(())
}
