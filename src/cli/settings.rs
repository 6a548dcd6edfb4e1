//! The CLI commands for managing the program settings file.
use crate::settings::{Settings, get_settings_file_path};
use anyhow::Result;
use clap::Subcommand;
use std::fs;

/// The available subcommands for managing the settings file.
#[derive(Subcommand)]
pub enum SettingsSubcommands {
    /// Print the path to the settings file.
    Path,
    /// Print the contents of the settings file, if any.
    Show,
    /// Print the default settings file contents.
    ShowDefault,
}

impl SettingsSubcommands {
    /// Execute the supplied settings subcommand
    pub fn execute(self) -> Result<()> {
        match self {
            Self::Path => handle_path_command(),
            Self::Show => handle_show_command()?,
            Self::ShowDefault => handle_show_default_command()?,
        }

        Ok(())
    }
}

/// Handle the `settings path` command.
fn handle_path_command() {
    println!("{}", get_settings_file_path().display());
}

/// Handle the `settings show` command.
fn handle_show_command() -> Result<()> {
    let file_path = get_settings_file_path();
    if file_path.is_file() {
        print!("{}", fs::read_to_string(&file_path)?);
    } else {
        eprintln!(
            "No settings file found at {}; default settings are in use.",
            file_path.display()
        );
    }

    Ok(())
}

/// Handle the `settings show-default` command.
fn handle_show_default_command() -> Result<()> {
    print!("{}", Settings::default_file_contents()?);

    Ok(())
}
