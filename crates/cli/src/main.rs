use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use settings::StripSettings;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod replay;
mod stress;

#[derive(Parser, Debug)]
#[command(name = "strip-cli", version, about = "Headless driver for the dismissible strip")]
struct Cli {
    /// Settings file (defaults to the per-user config location)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a JSON script of steps and print the resulting state
    Replay {
        script: PathBuf,
        #[arg(long)]
        pretty: bool,
    },
    /// Print the dismissal threshold for the active geometry
    Thresholds,
    /// Hammer a headless UI thread with control requests from many tasks
    Stress {
        #[arg(long, default_value_t = 4)]
        callers: usize,
        #[arg(long, default_value_t = 100)]
        requests: usize,
    },
    /// Write default settings to the settings path
    InitSettings {
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    let settings_path = cli.settings.clone().unwrap_or_else(settings::settings_path);

    match cli.command {
        Commands::Replay { script, pretty } => {
            let settings = StripSettings::load_or_default(&settings_path)
                .with_context(|| format!("loading settings {}", settings_path.display()))?;
            let steps = replay::load_script(&script)?;
            let report = replay::run(&steps, settings.build_list()).await?;
            let out = if pretty { serde_json::to_string_pretty(&report)? } else { serde_json::to_string(&report)? };
            println!("{out}");
        }
        Commands::Thresholds => {
            let settings = StripSettings::load_or_default(&settings_path)
                .with_context(|| format!("loading settings {}", settings_path.display()))?;
            let g = settings.geometry;
            println!("item:        {} x {}", g.item_width, g.item_height);
            println!("track:       {}", g.track_height);
            println!("threshold:   {}", g.dismissal_threshold());
            println!("dismiss at:  |offset| > {}", g.dismiss_distance());
            println!("snap back:   {}s", settings.snap_back_secs);
        }
        Commands::Stress { callers, requests } => {
            let settings = StripSettings::load_or_default(&settings_path)
                .with_context(|| format!("loading settings {}", settings_path.display()))?;
            let snapshot = stress::run(settings.build_list(), callers, requests).await?;
            println!("{}", serde_json::to_string(&snapshot)?);
        }
        Commands::InitSettings { force } => {
            if settings_path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", settings_path.display());
            }
            StripSettings::default().save(&settings_path)?;
            println!("wrote {}", settings_path.display());
        }
    }
    Ok(())
}
