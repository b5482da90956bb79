use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Instant;

use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mediscribe::cli::{Cli, Commands, HistoryCommands};
use mediscribe::core::api::ApiClient;
use mediscribe::core::format::format_file_size;
use mediscribe::core::storage::{self, SqliteStore};
use mediscribe::core::{audio_file, history};
use mediscribe::error::Result;
use mediscribe::output;
use mediscribe::settings::Settings;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = storage::load_settings();
    if let Some(url) = cli.api_url {
        settings.api.base_url = url;
    }

    match cli.command {
        Commands::Transcribe {
            file,
            json,
            no_history,
        } => transcribe(&settings, &file, json, no_history),
        Commands::History { command } => run_history(&settings, command),
        Commands::Health => {
            let client = ApiClient::new(&settings.api)?;
            let health = client.health()?;
            println!("{} ({})", health.status, health.service);
            Ok(())
        }
        Commands::Config {
            show,
            set_api_url,
            set_data_dir,
            toggle_dark_mode,
        } => run_config(settings, show, set_api_url, set_data_dir, toggle_dark_mode),
    }
}

fn open_store(settings: &Settings) -> Result<SqliteStore> {
    SqliteStore::open_default(settings)
}

fn transcribe(settings: &Settings, file: &Path, json: bool, no_history: bool) -> Result<()> {
    let meta = audio_file::inspect(file, settings.upload.max_file_bytes)?;
    let client = ApiClient::new(&settings.api)?;

    println!(
        "Uploading {} ({})...",
        meta.filename,
        format_file_size(meta.size_bytes)
    );
    let started = Instant::now();
    let result = client.transcribe(&meta.path)?;
    let processing_secs = started.elapsed().as_secs_f64();
    println!("Processed in {processing_secs:.2} seconds\n");

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", output::render_result(&result));
    }

    if !no_history {
        // A failed history write should never eat an already-received result.
        let recorded = open_store(settings)
            .and_then(|mut store| history::record(&mut store, &meta, &result, processing_secs));
        match recorded {
            Ok(entry) => tracing::debug!("recorded history entry {}", entry.id),
            Err(err) => tracing::warn!("could not record history: {err}"),
        }
    }

    Ok(())
}

fn run_history(settings: &Settings, command: HistoryCommands) -> Result<()> {
    match command {
        HistoryCommands::List { json } => {
            let store = open_store(settings)?;
            let entries = history::list(&store);
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                print!("{}", output::render_history(&entries, Utc::now()));
            }
            Ok(())
        }
        HistoryCommands::Show { id } => {
            let store = open_store(settings)?;
            let result = history::load(&store, &id)?;
            println!("Loaded from history\n");
            print!("{}", output::render_result(&result));
            Ok(())
        }
        HistoryCommands::Delete { id } => {
            let mut store = open_store(settings)?;
            history::remove(&mut store, &id)?;
            println!("Deleted {id}");
            Ok(())
        }
        HistoryCommands::Clear { yes } => {
            if !yes && !confirm("Clear all transcription history? [y/N] ")? {
                println!("Aborted.");
                return Ok(());
            }
            let mut store = open_store(settings)?;
            history::clear(&mut store)?;
            println!("History cleared.");
            Ok(())
        }
    }
}

fn run_config(
    mut settings: Settings,
    show: bool,
    set_api_url: Option<String>,
    set_data_dir: Option<String>,
    toggle_dark_mode: bool,
) -> Result<()> {
    let mut changed = false;

    if let Some(url) = set_api_url {
        settings.api.base_url = url;
        changed = true;
    }
    if let Some(dir) = set_data_dir {
        settings.storage.data_dir = dir;
        changed = true;
    }
    if changed {
        // Settings persist at the fixed default location, the store the
        // next `load_settings` call reads. Only history and preferences
        // live in the configured data dir.
        let mut store = storage::open_settings_store()?;
        storage::save_settings_to(&mut store, &settings)?;
        println!("Configuration updated.");
    }

    if toggle_dark_mode {
        let mut store = open_store(&settings)?;
        let enabled = storage::toggle_dark_mode(&mut store)?;
        println!(
            "Dark mode {}.",
            if enabled { "enabled" } else { "disabled" }
        );
    }

    if show || (!changed && !toggle_dark_mode) {
        println!("Configuration:");
        println!("  API URL: {}", settings.api.base_url);
        println!(
            "  Request timeout: {}",
            if settings.api.timeout_secs > 0 {
                format!("{}s", settings.api.timeout_secs)
            } else {
                "none".to_string()
            }
        );
        println!(
            "  Max upload size: {}",
            format_file_size(settings.upload.max_file_bytes)
        );
        println!("  Data dir: {}", settings.storage.data_dir);
        let store = open_store(&settings)?;
        println!(
            "  Dark mode: {}",
            if storage::dark_mode(&store) { "on" } else { "off" }
        );
    }

    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
