use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::{get_config_path, validate_config, Config, PAGE_SIZES};
use crate::players::ModelType;
use crate::scoring::WeightPreset;

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Serialize `config` as YAML and write it, creating parent directories.
pub fn write_config(config_path: &Path, config: &Config) -> Result<()> {
    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(config_path, &yaml)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    Ok(())
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
/// With `accept_defaults`, nothing is asked and the default config is written.
pub fn run_init_wizard(default_path: Option<PathBuf>, accept_defaults: bool) -> Result<()> {
    let default_config_path = default_path.unwrap_or_else(get_config_path);

    if accept_defaults {
        write_config(&default_config_path, &Config::default())?;
        println!("Config written to {}", default_config_path.display());
        return Ok(());
    }

    println!();
    println!("Fantasy Hoops Configuration");
    println!("===========================");
    println!();

    let defaults = Config::default();

    let api_base_url = loop {
        let url = prompt_with_default("Stats API base URL", &defaults.api_base_url)?;
        if url.starts_with("http://") || url.starts_with("https://") {
            break url;
        }
        println!("  Invalid: must start with http:// or https://. Try again.");
    };

    println!();
    println!("Prediction models:");
    for model in ModelType::ALL {
        println!("  {:<18} {}", model.slug(), model.description());
    }
    let default_model = loop {
        let input = prompt_with_default("Default model", defaults.default_model.slug())?;
        match ModelType::parse(&input) {
            Ok(model) => break model,
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };

    println!();
    let sizes: Vec<String> = PAGE_SIZES.iter().map(|s| s.to_string()).collect();
    let page_size = loop {
        let input = prompt_with_default(
            &format!("Rows per page ({})", sizes.join("/")),
            &defaults.page_size.to_string(),
        )?;
        match input.parse::<usize>() {
            Ok(n) if n > 0 => break n,
            _ => println!("  Invalid: must be a positive whole number. Try again."),
        }
    };

    println!();
    println!("Scoring presets:");
    for preset in WeightPreset::ALL {
        println!("  {:<10} {}", preset.name(), preset.description());
    }
    let default_preset = loop {
        let input = prompt_with_default("Default scoring preset", defaults.default_preset.name())?;
        match WeightPreset::parse(&input) {
            Ok(preset) => break preset,
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };

    println!();
    let cache_ttl = loop {
        let input = prompt_with_default("Reuse API responses for (e.g. 15m, 1h)", &defaults.cache_ttl)?;
        match humantime::parse_duration(&input) {
            Ok(_) => break input,
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };

    let config = Config {
        api_base_url,
        default_model,
        page_size,
        default_preset,
        cache_ttl,
        ..defaults
    };

    if let Err(errors) = validate_config(&config) {
        anyhow::bail!("Invalid config:\n  {}", errors.join("\n  "));
    }

    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    // Check if file already exists
    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    write_config(&config_path, &config)?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `fantasy-hoops` to get started.");

    Ok(())
}
