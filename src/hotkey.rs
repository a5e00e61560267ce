//! Hotkey and shelf command builder.
//!
//! A command either references the script on disk, so later edits are picked
//! up, or embeds a copy of its text taken at creation time.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Local};
use scriptpanel_core::{script_basename, script_extension, Error, Result};

/// Category every panel hotkey is registered under.
pub const HOTKEY_CATEGORY: &str = "ScriptPanelCommands";

/// Prefix of every panel hotkey name.
pub const HOTKEY_PREFIX: &str = "SPC_";

/// How the generated command reaches the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandKind {
    /// Calls back into the panel with the script path.
    #[default]
    Reference,
    /// Embeds the script text.
    Copy,
}

/// A command ready to hand to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotkeyCommand {
    /// Script file name without its extension.
    pub name: String,
    pub kind: CommandKind,
    pub text: String,
    /// Extension of the source script, e.g. `.py`.
    pub extension: String,
}

impl HotkeyCommand {
    /// Name the hotkey is registered under.
    pub fn hotkey_name(&self) -> String {
        hotkey_name(&self.name)
    }
}

/// File name without the extension.
pub fn script_stem(path: &str) -> &str {
    let name = script_basename(path);
    match name.rfind('.') {
        Some(dot) if dot > 0 => &name[..dot],
        _ => name,
    }
}

pub fn hotkey_name(stem: &str) -> String {
    format!("{}{}", HOTKEY_PREFIX, stem)
}

/// Line comment token for a script extension.
pub fn comment_token(extension: &str) -> &'static str {
    match extension {
        ".mel" => "//",
        _ => "#",
    }
}

pub fn reference_command(path: &str) -> String {
    format!(
        "import script_panel\nscript_panel.trigger_file(r\"{}\")",
        path
    )
}

/// Header naming the source and the copy time, then the script text.
pub fn copy_command(path: &str, source: &str, copied_at: DateTime<Local>) -> String {
    let token = comment_token(&script_extension(path).unwrap_or_default());
    format!(
        "{token} ScriptPanel Source Script: {path}\n{token} ScriptPanel Copy Time: {time}\n\n{source}",
        time = copied_at.to_rfc3339(),
    )
}

/// Builds the command for `path`. Copies read the script now.
pub fn build_command(path: &str, kind: CommandKind) -> Result<HotkeyCommand> {
    if !Path::new(path).is_file() {
        return Err(Error::ScriptNotFound(path.to_string()));
    }
    let text = match kind {
        CommandKind::Reference => reference_command(path),
        CommandKind::Copy => copy_command(path, &fs::read_to_string(path)?, Local::now()),
    };
    Ok(HotkeyCommand {
        name: script_stem(path).to_string(),
        kind,
        text,
        extension: script_extension(path).unwrap_or_default(),
    })
}
