use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub prompt: String,
    pub tty_path: PathBuf,
    #[serde(default)]
    pub completion: CompletionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    pub enabled: bool,
    /// Extra words offered after the command name.
    #[serde(default)]
    pub words: Vec<String>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            words: Vec::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: String::from("(pline) "),
            tty_path: PathBuf::from("/dev/tty"),
            completion: CompletionConfig::default(),
        }
    }
}

impl Config {
    /// Load the config file, falling back to defaults.
    ///
    /// Defaults are written out when the file is missing, empty or broken.
    /// A broken file is first copied to `config.bak`.
    pub async fn load() -> Result<Self> {
        let Some(config_path) = Self::config_path() else {
            log::debug!("No config location available, using defaults");
            return Ok(Self::default());
        };

        if let Some(mut config) = Self::read_file(&config_path).await {
            config.validate();
            log::info!("Loaded config from: {}", config_path.display());
            return Ok(config);
        }

        let config = Self::default();
        if let Err(e) = config.save().await {
            log::warn!("Using default config without saving it: {:#}", e);
        }
        Ok(config)
    }

    async fn read_file(path: &Path) -> Option<Self> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("Config file does not exist, creating default");
                return None;
            }
            Err(e) => {
                log::error!("Failed to read config file {}: {}", path.display(), e);
                return None;
            }
        };

        if content.trim().is_empty() {
            log::warn!("Config file is empty, creating new one");
            return None;
        }

        match serde_json::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                log::error!("Failed to parse config file: {}", e);
                let backup_path = path.with_extension("bak");
                match tokio::fs::copy(path, &backup_path).await {
                    Ok(_) => log::info!("Backed up broken config to: {}", backup_path.display()),
                    Err(e) => log::warn!("Failed to backup broken config: {}", e),
                }
                None
            }
        }
    }

    pub async fn save(&self) -> Result<()> {
        let Some(config_path) = Self::config_path() else {
            return Ok(());
        };

        let mut config_to_save = self.clone();
        config_to_save.validate();

        if let Some(parent) = config_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                anyhow::anyhow!(
                    "failed to create config directory {}: {}",
                    parent.display(),
                    e
                )
            })?;
        }

        let content = serde_json::to_string_pretty(&config_to_save)
            .map_err(|e| anyhow::anyhow!("failed to serialize config: {}", e))?;
        tokio::fs::write(&config_path, content).await.map_err(|e| {
            anyhow::anyhow!(
                "failed to write config file {}: {}",
                config_path.display(),
                e
            )
        })?;
        log::debug!("Saved config to: {}", config_path.display());
        Ok(())
    }

    /// Replace unusable values with defaults.
    pub fn validate(&mut self) {
        let mut has_issues = false;

        if self.prompt.is_empty() {
            log::warn!("Empty prompt, using default");
            self.prompt = Self::default().prompt;
            has_issues = true;
        }

        // The editor only draws printable ASCII after the prompt
        if self.prompt.contains(['\n', '\r']) {
            log::warn!("Prompt contains a line break, using default");
            self.prompt = Self::default().prompt;
            has_issues = true;
        }

        if self.tty_path.as_os_str().is_empty() {
            log::warn!("Empty terminal device path, using default");
            self.tty_path = Self::default().tty_path;
            has_issues = true;
        }

        let before = self.completion.words.len();
        self.completion
            .words
            .retain(|w| !w.is_empty() && w.bytes().all(|b| (0x21..=0x7e).contains(&b)));
        if self.completion.words.len() != before {
            log::warn!(
                "Dropped {} completion words that were empty or not printable ASCII",
                before - self.completion.words.len()
            );
            has_issues = true;
        }

        if has_issues {
            log::info!("Configuration validation completed with corrections");
        }
    }

    fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("PLINE_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        if let Ok(dir) = std::env::var("PLINE_CONFIG_DIR") {
            return Some(PathBuf::from(dir).join("config.json"));
        }

        ProjectDirs::from("com", "pline", "pline")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }
}
