// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use snapcam::app::AppModel;
use snapcam::backends::camera::CameraFacing;
use snapcam::i18n;
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "snapcam")]
#[command(about = "Point-and-shoot camera for the COSMIC desktop")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available cameras
    List,

    /// Take a photo and save it to the photo library
    Snap {
        /// Camera to use: front or back
        #[arg(short, long, default_value = "front")]
        facing: CameraFacing,

        /// Fire the flash LED (back camera only)
        #[arg(long)]
        flash: bool,

        /// Save into this folder instead of the photo library
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Allow saving without asking
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=snapcam=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    // The CLI prints notification texts, so it needs the strings too
    let requested_languages = i18n_embed::DesktopLanguageRequester::requested_languages();
    i18n::init(&requested_languages);

    match cli.command {
        Some(Commands::List) => cli::list_cameras(),
        Some(Commands::Snap {
            facing,
            flash,
            output,
            yes,
        }) => cli::snap(cli::SnapOptions {
            facing,
            flash,
            output,
            assume_yes: yes,
        }),
        None => run_gui(),
    }
}

fn run_gui() -> Result<(), Box<dyn std::error::Error>> {
    // Settings for configuring the application window and iced runtime.
    let settings = cosmic::app::Settings::default().size_limits(
        cosmic::iced::Limits::NONE
            .min_width(360.0)
            .min_height(480.0),
    );

    // Starts the application's event loop with `()` as the application's flags.
    cosmic::app::run::<AppModel>(settings, ())?;

    Ok(())
}
