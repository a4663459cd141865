use super::{config_file, load_config};
use crate::output::{new_table, Output};
use crate::ConfigCommands;
use catalog_config::{Config, PathManager};
use color_eyre::Result;
use comfy_table::Cell;
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::Path;

pub fn run_config(cmd: ConfigCommands, config_path: Option<&Path>, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    match cmd {
        ConfigCommands::Show => show_config(config_path, &paths, output),
        ConfigCommands::Init { force } => init_config(config_path, &paths, force, output),
        ConfigCommands::Path => show_paths(config_path, &paths, output),
    }
}

fn show_config(config_path: Option<&Path>, paths: &PathManager, output: &Output) -> Result<()> {
    let file = config_file(config_path, paths);
    let config = load_config(config_path, paths)?;

    if output.is_human() && !output.is_quiet() {
        let source = if file.exists() {
            file.display().to_string()
        } else {
            format!("{} (not found, using defaults)", file.display())
        };
        println!("{} {}\n", "Config file:".bright_white().bold(), source);

        let rendered = toml::to_string_pretty(&config)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to render config: {}", e))?;
        println!("{}", rendered.trim_end());
    }

    output.json(&json!({
        "config_file": file,
        "exists": file.exists(),
        "config": config,
    }));
    Ok(())
}

fn init_config(config_path: Option<&Path>, paths: &PathManager, force: bool, output: &Output) -> Result<()> {
    let file = config_file(config_path, paths);
    if file.exists() && !force {
        output.warn(format!("Config already exists at {}", file.display()));
        output.info("Use --force to overwrite it with defaults.");
        return Ok(());
    }

    Config::default()
        .save_to_file(&file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to write config to {}: {:#}", file.display(), e))?;
    paths
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create data directories: {:#}", e))?;

    output.success(format!("Wrote default config to {}", file.display()));
    Ok(())
}

fn show_paths(config_path: Option<&Path>, paths: &PathManager, output: &Output) -> Result<()> {
    let rows = [
        ("Config file", config_file(config_path, paths)),
        ("Data", paths.data_dir().to_path_buf()),
        ("Local storage", paths.storage_dir()),
        ("Mock API db", paths.mock_db_file()),
        ("Log file", paths.log_file()),
    ];

    let mut table = new_table(["Location", "Path"]);
    for (label, path) in &rows {
        table.add_row(vec![Cell::new(label), Cell::new(path.display())]);
    }
    output.table(&table);

    output.json(&json!({
        "config_file": rows[0].1,
        "data_dir": rows[1].1,
        "storage_dir": rows[2].1,
        "mock_db_file": rows[3].1,
        "log_file": rows[4].1,
    }));
    Ok(())
}
