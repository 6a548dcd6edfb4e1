//! The command line interface for the generator.
use crate::generator::{Instance, generate};
use crate::log;
use crate::options::{GeneratorOptions, OPTIONS_FILE_NAME};
use crate::output::{write_instance, write_instance_to_path};
use crate::settings::Settings;
use crate::solver_params::{SolverParameters, Toggle};
use ::log::info;
use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};

pub mod settings;
use settings::SettingsSubcommands;

/// The command line interface for the generator.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The available commands.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Options for the `generate` command
#[derive(Args)]
pub struct GenerateOpts {
    /// Options file (defaults to `generator.toml` in the data directory)
    #[arg(long)]
    pub options: Option<PathBuf>,
    /// File to write the instance to (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Random seed, overriding the one in the options file
    #[arg(long)]
    pub seed: Option<u64>,
    /// Whether to overwrite the output file if it already exists
    #[arg(long)]
    pub overwrite: bool,
}

/// Options for the `solver-params` command
#[derive(Args)]
pub struct SolverParamsOpts {
    /// Heuristics to disable
    #[arg(long, value_enum)]
    pub disable: Vec<Toggle>,
    /// File to write the parameters to (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Whether to overwrite the output file if it already exists
    #[arg(long)]
    pub overwrite: bool,
}

/// The available commands.
#[derive(Subcommand)]
enum Commands {
    /// Generate an instance.
    Generate {
        /// Directory containing the reference tables.
        data_dir: PathBuf,
        /// Other generate options
        #[command(flatten)]
        opts: GenerateOpts,
    },
    /// Check that an instance can be generated, without writing it.
    Validate {
        /// Directory containing the reference tables.
        data_dir: PathBuf,
        /// Options file (defaults to `generator.toml` in the data directory)
        #[arg(long)]
        options: Option<PathBuf>,
    },
    /// Write a parameter file for the solver.
    SolverParams {
        /// Other options
        #[command(flatten)]
        opts: SolverParamsOpts,
    },
    /// Manage settings file.
    Settings {
        /// The subcommands for managing the settings file.
        #[command(subcommand)]
        subcommand: SettingsSubcommands,
    },
}

impl Commands {
    /// Execute the supplied CLI command
    fn execute(self) -> Result<()> {
        match self {
            Self::Generate { data_dir, opts } => handle_generate_command(&data_dir, &opts, None),
            Self::Validate { data_dir, options } => {
                handle_validate_command(&data_dir, options.as_deref(), None)
            }
            Self::SolverParams { opts } => handle_solver_params_command(&opts, None),
            Self::Settings { subcommand } => subcommand.execute(),
        }
    }
}

/// Parse CLI arguments and start the generator
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    if let Some(command) = cli.command {
        command.execute()?;
    } else {
        // No command provided. Show help.
        Cli::command().print_long_help()?;
    }

    Ok(())
}

/// Load program settings, if not provided, and initialise the logger
fn init(settings: Option<Settings>) -> Result<Settings> {
    let settings = if let Some(settings) = settings {
        settings
    } else {
        Settings::load().context("Failed to load settings.")?
    };

    log::init(&settings.log_level).context("Failed to initialise logging.")?;

    Ok(settings)
}

/// Read the options file, defaulting to the one in the data directory
fn load_options(data_dir: &Path, options_path: Option<&Path>) -> Result<GeneratorOptions> {
    let options_path =
        options_path.map_or_else(|| data_dir.join(OPTIONS_FILE_NAME), Path::to_path_buf);
    let options =
        GeneratorOptions::from_path(&options_path).context("Failed to load generator options.")?;
    info!("Loaded options from {}", options_path.display());

    Ok(options)
}

/// Load options and generate an instance from the tables in `data_dir`
fn load_and_generate(
    data_dir: &Path,
    options_path: Option<&Path>,
    seed: Option<u64>,
) -> Result<Instance> {
    let mut options = load_options(data_dir, options_path)?;
    if seed.is_some() {
        options.seed = seed;
    }

    generate(data_dir, &options).context("Failed to generate instance.")
}

/// Handle the `generate` command.
pub fn handle_generate_command(
    data_dir: &Path,
    opts: &GenerateOpts,
    settings: Option<Settings>,
) -> Result<()> {
    let mut settings = init(settings)?;
    if opts.overwrite {
        settings.overwrite = true;
    }

    info!("Starting linergen v{}", env!("CARGO_PKG_VERSION"));
    let instance = load_and_generate(data_dir, opts.options.as_deref(), opts.seed)?;

    if let Some(output_path) = opts.output.as_deref() {
        write_instance_to_path(output_path, &instance, settings.overwrite)?;
        info!("Instance written to {}", output_path.display());
    } else {
        write_instance(io::stdout().lock(), &instance)?;
    }

    Ok(())
}

/// Handle the `validate` command.
pub fn handle_validate_command(
    data_dir: &Path,
    options_path: Option<&Path>,
    settings: Option<Settings>,
) -> Result<()> {
    init(settings)?;

    let instance = load_and_generate(data_dir, options_path, None)?;
    info!(
        "Validation successful: {} ports and {} vessel classes",
        instance.ports.len(),
        instance.vessel_classes.len()
    );

    Ok(())
}

/// Handle the `solver-params` command.
pub fn handle_solver_params_command(
    opts: &SolverParamsOpts,
    settings: Option<Settings>,
) -> Result<()> {
    let mut settings = init(settings)?;
    if opts.overwrite {
        settings.overwrite = true;
    }

    let params = SolverParameters::with_disabled(&opts.disable);
    if let Some(output_path) = opts.output.as_deref() {
        params.write_to_path(output_path, settings.overwrite)?;
        info!("Solver parameters written to {}", output_path.display());
    } else {
        params.write(io::stdout().lock())?;
    }

    Ok(())
}
