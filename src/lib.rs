//! specid - Bird species identification from photos.
//!
//! This crate classifies bird photos with ONNX image classifiers and turns
//! the ranked guesses into display-ready descriptions.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod inference;
pub mod output;
pub mod pipeline;
pub mod species;

use clap::Parser;
use cli::{AnalyzeArgs, Cli, Command};
use config::{Config, ModelConfig, load_config_file, resolve_config_path, save_config};
use inference::{ClassifierAdapter, OnnxSpeciesModel};
use pipeline::{collect_input_files, process_image};
use species::FormatPolicy;
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

pub use error::{Error, Result};

/// Main entry point for the specid CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    let config_path = resolve_config_path(cli.config.as_deref())?;
    let config = load_config_file(&config_path)?;

    if let Some(command) = cli.command {
        return handle_command(command, &config, &config_path);
    }

    if cli.inputs.is_empty() {
        cli::help::print_smart_help(&config);
        return Ok(());
    }

    analyze_images(&cli.inputs, &cli.analyze, &config, cli.quiet)
}

/// Identify the species in every input image.
fn analyze_images(
    inputs: &[PathBuf],
    args: &AnalyzeArgs,
    config: &Config,
    quiet: bool,
) -> Result<()> {
    use crate::output::progress;
    use std::time::Instant;

    let total_start = Instant::now();

    config::validate_config(config)?;

    let files = collect_input_files(inputs)?;
    if files.is_empty() {
        return Err(Error::NoValidImages);
    }

    info!("Found {} image(s) to process", files.len());

    let model_name = args
        .model
        .clone()
        .or_else(|| config.defaults.model.clone())
        .ok_or_else(|| Error::ConfigValidation {
            message: "no model specified (use -m or set defaults.model in config)".to_string(),
        })?;

    let model_config = config::get_model(config, &model_name)?;
    config::validate_model_config(&model_name, model_config)?;

    let threshold = args
        .threshold
        .unwrap_or(config.defaults.top_guess_threshold);
    config::validate_threshold(threshold)?;
    let policy = FormatPolicy::with_threshold(threshold);

    let format = args.format.unwrap_or(config.defaults.format);
    let bold = output::bold_enabled(
        config.output.bold && !args.no_bold,
        args.output.is_some(),
        std::io::stdout().is_terminal(),
    );
    let fail_fast = args.fail_fast;

    info!("Loading model: {}", model_name);
    let model = OnnxSpeciesModel::from_config(model_config)?;
    info!("Model knows {} species", model.labels().len());
    let adapter = ClassifierAdapter::with_max_results(model, config.defaults.max_results);

    let sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(std::io::BufWriter::new(std::fs::File::create(path)?)),
        None => Box::new(std::io::stdout()),
    };
    let mut writer = output::create_writer(format, sink, bold, &model_name);
    writer.write_header()?;

    let runtime = tokio::runtime::Runtime::new().map_err(|e| Error::Internal {
        message: format!("Failed to create async runtime: {e}"),
    })?;

    let progress_enabled = !quiet && !args.no_progress;
    let image_progress = progress::create_image_progress(files.len(), progress_enabled);

    let mut processed = 0;
    let mut errors = 0;

    for file in &files {
        match runtime.block_on(process_image(file, &adapter, &policy)) {
            Ok(report) => {
                writer.write_report(&report)?;
                processed += 1;
            }
            Err(e) => {
                error!("Failed to process {}: {}", file.display(), e);
                errors += 1;
                if fail_fast {
                    progress::finish_progress(image_progress, "Failed");
                    writer.finalize()?;
                    return Err(e);
                }
            }
        }
        progress::inc_progress(image_progress.as_ref());
    }

    progress::finish_progress(image_progress, "Complete");
    writer.finalize()?;

    let total_duration = total_start.elapsed().as_secs_f64();
    info!(
        "Complete: {} processed, {} errors in {:.2}s",
        processed, errors, total_duration
    );

    if errors > 0 {
        warn!("{} image(s) had errors", errors);
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    // ORT is silenced unless asked for; -vvv drops every filter.
    let filter_str = if quiet {
        "warn,ort=off".to_string()
    } else {
        match verbose {
            0 => "info,ort=off".to_string(),
            1 => "debug,ort=warn".to_string(),
            2 => "trace,ort=info".to_string(),
            _ => "trace".to_string(),
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_command(command: Command, config: &Config, config_path: &Path) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action, config, config_path),
        Command::Models { action } => handle_models_command(action, config, config_path),
        Command::About => {
            cli::help::print_about();
            Ok(())
        }
        Command::Instructions => {
            cli::help::print_instructions();
            Ok(())
        }
    }
}

fn handle_config_command(
    action: cli::ConfigAction,
    config: &Config,
    config_path: &Path,
) -> Result<()> {
    use cli::ConfigAction;

    match action {
        ConfigAction::Init => {
            if config_path.exists() {
                println!("Configuration file already exists: {}", config_path.display());
                println!("Use 'specid models add' to add models.");
            } else {
                save_config(&Config::default(), config_path)?;
                println!("Created configuration file: {}", config_path.display());
                println!("\nNext steps:");
                println!(
                    "  specid models add <name> --path <model.onnx> --labels <labels.txt> --default"
                );
            }
            Ok(())
        }
        ConfigAction::Show => {
            let contents =
                toml::to_string_pretty(config).map_err(|e| Error::ConfigSerialize { source: e })?;
            println!("# {}", config_path.display());
            print!("{contents}");
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", config_path.display());
            Ok(())
        }
    }
}

fn handle_models_command(
    action: cli::ModelsAction,
    config: &Config,
    config_path: &Path,
) -> Result<()> {
    use cli::ModelsAction;

    match action {
        ModelsAction::List => {
            if config.models.is_empty() {
                println!("No models configured.");
            } else {
                println!("Configured models:");
                for (name, model) in &config.models {
                    let default_marker = config.defaults.model.as_ref().is_some_and(|d| d == name);
                    println!(
                        "  {} ({}px, {}){}",
                        name,
                        model.input_size,
                        model.path.display(),
                        if default_marker { " [default]" } else { "" }
                    );
                }
            }
            Ok(())
        }
        ModelsAction::Add {
            name,
            path,
            labels,
            input_size,
            no_softmax,
            default,
        } => {
            let mut model = ModelConfig {
                path,
                labels,
                softmax: !no_softmax,
                ..ModelConfig::default()
            };
            if let Some(size) = input_size {
                model.input_size = size;
            }
            handle_models_add(config.clone(), config_path, name, model, default)
        }
        ModelsAction::Check => {
            if config.models.is_empty() {
                println!("No models configured.");
            }
            for (name, model) in &config.models {
                config::validate_model_config(name, model)?;
                let labels = inference::labels::read_labels(&model.labels)?;
                println!("  {name}: OK ({} labels)", labels.len());
            }
            Ok(())
        }
    }
}

/// Handle the `models add` command.
fn handle_models_add(
    mut config: Config,
    config_path: &Path,
    name: String,
    model: ModelConfig,
    set_default: bool,
) -> Result<()> {
    if !model.path.exists() {
        return Err(Error::ModelFileNotFound { path: model.path });
    }
    if !model.labels.exists() {
        return Err(Error::LabelsFileNotFound { path: model.labels });
    }

    if config.models.contains_key(&name) {
        return Err(Error::ModelAlreadyExists { name });
    }

    let summary = format!(
        "Added model '{name}' ({}px input)\n  Model: {}\n  Labels: {}\n  Default: {}",
        model.input_size,
        model.path.display(),
        model.labels.display(),
        if set_default { "yes" } else { "no" }
    );

    config.models.insert(name.clone(), model);
    if set_default {
        config.defaults.model = Some(name);
    }

    save_config(&config, config_path)?;

    println!("{summary}");
    println!("\nConfiguration saved to: {}", config_path.display());

    Ok(())
}
