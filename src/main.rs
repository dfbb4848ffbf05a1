mod error;
mod models;
mod report;
mod run;
mod store;
mod ui;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

fn main() -> Result<()> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let file_override = take_file_flag(&mut args)?;

    let data_dir = get_data_dir()?;
    init_logging(&data_dir);

    let db_path = file_override.unwrap_or_else(|| data_dir.join("spendbook.db"));
    tracing::info!(path = %db_path.display(), "starting spendbook");
    let mut store = store::Store::open(&db_path)
        .with_context(|| format!("Failed to open {}", db_path.display()))?;

    if args.is_empty() {
        run::as_tui(&mut store)
    } else {
        run::as_cli(&args, &mut store)
    }
}

/// Remove `--file <path>` from the arguments and return the path.
fn take_file_flag(args: &mut Vec<String>) -> Result<Option<PathBuf>> {
    let Some(pos) = args.iter().position(|a| a == "--file" || a == "-f") else {
        return Ok(None);
    };
    if pos + 1 >= args.len() {
        anyhow::bail!("--file requires a path");
    }
    let path = args.remove(pos + 1);
    args.remove(pos);
    Ok(Some(PathBuf::from(run::shellexpand(&path))))
}

fn get_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "spendbook", "SpendBook")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}

/// Log to `spendbook.log` in the data directory; the terminal belongs to the
/// TUI. Filter with `SPENDBOOK_LOG` (default `info`).
fn init_logging(data_dir: &Path) {
    let log_path = data_dir.join("spendbook.log");
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: cannot open log file {}: {e}", log_path.display());
            return;
        }
    };

    let filter = std::env::var("SPENDBOOK_LOG").unwrap_or_else(|_| "info".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter.as_str())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
}
