use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pcdebug_viewer::config::{DEBUG_FOLDER, SDK_FOLDER};
use pcdebug_viewer::{
    help_text, load_catalog, logging, statistics, Background, Catalog, DialogPicker, DirectoryPicker, DisplayState,
    InteractiveViewer, Navigator, SceneContext, SdkPaths, ViewOptions,
};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "pcdebug", version, about = "Step through localization debug point clouds")]
struct Cli {
    /// Directory holding the SDK folder
    #[arg(long, global = true, env = "APPDATA")]
    base_dir: Option<PathBuf>,

    #[arg(long, global = true, default_value = SDK_FOLDER)]
    sdk_folder: String,

    #[arg(long, global = true, default_value = DEBUG_FOLDER)]
    debug_folder: String,

    /// View options file, defaults to viewpoint.json in the SDK folder
    #[arg(long, global = true)]
    view_options: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Mode>,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Open the viewer window
    View {
        /// Items folder; a folder dialog opens when omitted
        #[arg(long)]
        items: Option<PathBuf>,
    },
    /// Print annotation statistics for an items folder
    Stats {
        #[arg(long)]
        items: PathBuf,
    },
}

fn main() -> Result<()> {
    logging::init_logging();
    let cli = Cli::parse();

    match cli.command {
        Some(Mode::Stats { ref items }) => run_stats(items),
        Some(Mode::View { ref items }) => run_view(&cli, items.clone()),
        None => run_view(&cli, None),
    }
}

fn run_stats(items: &Path) -> Result<()> {
    let catalog = load_catalog(items).with_context(|| format!("loading items from {}", items.display()))?;
    let stats = statistics::compute(&catalog);
    statistics::report(&stats);
    Ok(())
}

fn run_view(cli: &Cli, items: Option<PathBuf>) -> Result<()> {
    let base_dir = cli
        .base_dir
        .clone()
        .context("no base directory: pass --base-dir or set APPDATA")?;
    let paths = SdkPaths::resolve(&base_dir, &cli.sdk_folder, &cli.debug_folder)?;

    let options_path = cli.view_options.clone().unwrap_or_else(|| paths.view_options_file());
    let options = ViewOptions::load_or_default(&options_path);

    let scene = SceneContext::load(&paths.debug_dir)?;

    let mut picker = DialogPicker::default();
    let items = items.or_else(|| picker.pick_directory(&paths.debug_dir));
    let catalog = match items {
        Some(dir) => load_catalog(&dir).with_context(|| format!("loading items from {}", dir.display()))?,
        None => {
            tracing::warn!("No path selected");
            Catalog::default()
        }
    };

    let background = options.background_color.map(Background::from_color).unwrap_or_default();
    let navigator =
        Navigator::new(scene, catalog, &paths.debug_dir).with_display(DisplayState::with_background(background));

    println!("{}", help_text());
    InteractiveViewer::new(navigator, picker, options).run()?;
    Ok(())
}
