//! File-backed configuration.
//!
//! Settings live in `~/.config/plainwm/config.toml` (or wherever
//! `XDG_CONFIG_HOME` points). The file is written out with the defaults on
//! first run so there is always something to edit.

use std::fs;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use anyhow::Result;
use plainwm_core::config::{
    FocusMode, DEFAULT_BORDER, DEFAULT_EDGE_RESISTANCE, DEFAULT_POPUP_FONT, DEFAULT_TERMINAL,
    DEFAULT_TITLE_FONT,
};
use serde::{Deserialize, Serialize};
use xdg::BaseDirectories;

/// General configuration.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    pub border_width: i32,
    /// Font set for frame titles, as an X logical font description.
    pub title_font: String,
    /// Font set for the menu and the size popup.
    pub popup_font: String,
    pub focus_mode: FocusMode,
    /// Shell command spawned by button 1 on the root window.
    pub button1_command: Option<String>,
    /// Shell command spawned by button 2 on the root window.
    pub button2_command: Option<String>,
    /// How close a dragged edge must come to a reserved-area boundary
    /// before it snaps onto it, in pixels.
    pub edge_resistance: i32,
    pub placement_start: (i32, i32),
    pub placement_step: i32,
    pub placement_reset_offset: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            border_width: DEFAULT_BORDER,
            title_font: DEFAULT_TITLE_FONT.to_owned(),
            popup_font: DEFAULT_POPUP_FONT.to_owned(),
            focus_mode: FocusMode::default(),
            button1_command: None,
            button2_command: Some(DEFAULT_TERMINAL.to_owned()),
            edge_resistance: DEFAULT_EDGE_RESISTANCE,
            placement_start: (100, 100),
            placement_step: 10,
            placement_reset_offset: 20,
        }
    }
}

#[must_use]
pub fn load() -> Config {
    load_from_file()
        .map_err(|err| eprintln!("ERROR LOADING CONFIG: {err:?}"))
        .unwrap_or_default()
}

/// # Errors
///
/// Errors if `BaseDirectories` cannot be resolved, if the user does not
/// have permission to place or read config.toml, or if config.toml is
/// malformed.
fn load_from_file() -> Result<Config> {
    let dirs = BaseDirectories::with_prefix("plainwm")?;
    let config_filename = dirs.place_config_file("config.toml")?;
    if Path::new(&config_filename).exists() {
        read_from_path(&config_filename)
    } else {
        let config = Config::default();
        write_to_path(&config_filename, &config)?;
        Ok(config)
    }
}

fn read_from_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

fn write_to_path(path: &Path, config: &Config) -> Result<()> {
    let toml = toml::to_string(config)?;
    let mut file = File::create(path)?;
    file.write_all(toml.as_bytes())?;
    Ok(())
}

impl plainwm_core::Config for Config {
    fn border_width(&self) -> i32 {
        self.border_width
    }

    fn title_font(&self) -> String {
        self.title_font.clone()
    }

    fn popup_font(&self) -> String {
        self.popup_font.clone()
    }

    fn focus_mode(&self) -> FocusMode {
        self.focus_mode
    }

    fn button1_command(&self) -> Option<String> {
        self.button1_command.clone()
    }

    fn button2_command(&self) -> Option<String> {
        self.button2_command.clone()
    }

    fn edge_resistance(&self) -> i32 {
        self.edge_resistance
    }

    fn placement_start(&self) -> (i32, i32) {
        self.placement_start
    }

    fn placement_step(&self) -> i32 {
        self.placement_step
    }

    fn placement_reset_offset(&self) -> i32 {
        self.placement_reset_offset
    }
}
