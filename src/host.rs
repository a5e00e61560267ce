//! Host application bindings.
//!
//! The panel runs inside a host (a content-creation application, or nothing at
//! all). Everything it asks of that host goes through [`HostInterface`].

use std::path::Path;
use std::process::Command;

use scriptpanel_core::{script_extension, Error, Result};
use scriptpanel_settings::PanelConfig;
use tracing::{debug, info, warn};

/// Extension every host can execute.
pub const PYTHON_EXTENSION: &str = ".py";

/// Operations the panel needs from its host application.
pub trait HostInterface {
    /// Host name shown in logs and errors.
    fn name(&self) -> &str;

    /// Opens a script in an editor.
    fn open_script(&self, path: &str) -> Result<()>;

    /// Executes a script.
    fn run_script(&self, path: &str) -> Result<()>;

    /// Extensions (lowercase, with dot) this host can execute.
    fn runnable_extensions(&self) -> Vec<&str> {
        vec![PYTHON_EXTENSION]
    }

    /// Registers a named hotkey that runs `command`.
    fn setup_hotkey(
        &self,
        name: &str,
        _shortcut: &str,
        _command: &str,
        _category: &str,
    ) -> Result<()> {
        Err(Error::unsupported(self.name(), format!("hotkey '{}'", name)))
    }

    /// Adds a shelf button that runs `command`.
    fn add_to_shelf(&self, name: &str, _command: &str, _extension: &str) -> Result<()> {
        Err(Error::unsupported(self.name(), format!("shelf button '{}'", name)))
    }
}

/// Runs a script through the host if its extension is runnable there.
///
/// Returns `Ok(false)` for extensions the host has no action for.
pub fn trigger_script(host: &dyn HostInterface, path: &str) -> Result<bool> {
    if !Path::new(path).exists() {
        return Err(Error::ScriptNotFound(path.to_string()));
    }
    let extension = script_extension(path).unwrap_or_default();
    if !host.runnable_extensions().contains(&extension.as_str()) {
        warn!("No action for extension '{}': {}", extension, path);
        return Ok(false);
    }
    host.run_script(path)?;
    Ok(true)
}

/// Host used outside any application: external editor and interpreter processes.
#[derive(Debug, Clone)]
pub struct StandaloneHost {
    name: String,
    editor: String,
    python: String,
}

impl StandaloneHost {
    pub fn new(editor: impl Into<String>, python: impl Into<String>) -> Self {
        Self {
            name: scriptpanel_settings::STANDALONE_HOST.to_string(),
            editor: editor.into(),
            python: python.into(),
        }
    }

    pub fn from_config(config: &PanelConfig) -> Self {
        Self {
            name: config.host_name.clone(),
            editor: config.editor_command(),
            python: config.python_command(),
        }
    }

    pub fn editor(&self) -> &str {
        &self.editor
    }

    pub fn python(&self) -> &str {
        &self.python
    }

    /// Starts `program` on `path` and reaps it on a background thread.
    fn spawn(program: &str, path: &str) -> Result<()> {
        let mut child = Command::new(program).arg(path).spawn()?;
        let pid = child.id();
        info!("Spawned '{}' for {} (pid {})", program, path, pid);
        std::thread::spawn(move || match child.wait() {
            Ok(status) => debug!("Process {} exited with {}", pid, status),
            Err(e) => warn!("Failed to wait for process {}: {}", pid, e),
        });
        Ok(())
    }
}

impl HostInterface for StandaloneHost {
    fn name(&self) -> &str {
        &self.name
    }

    fn open_script(&self, path: &str) -> Result<()> {
        Self::spawn(&self.editor, path)
    }

    fn run_script(&self, path: &str) -> Result<()> {
        Self::spawn(&self.python, path)
    }
}
