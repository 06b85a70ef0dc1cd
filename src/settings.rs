use crate::common::is_truthy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf, MAIN_SEPARATOR_STR};

/// Default number of matching folders listed below the two fixed entries.
pub const DEFAULT_LIMIT: usize = 10;

pub const PREF_HOME: &str = "home_input";
pub const PREF_SHOW_HIDDEN: &str = "show_hidden";
pub const PREF_KEYWORD: &str = "vs_kw";

/// Process-level options read from `settings.json`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    /// Editor command. Extra arguments are split with shell rules.
    #[serde(default = "default_editor")]
    pub editor: String,
    /// Maximum number of candidate folders per listing.
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// When enabled the logger is initialised at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    /// Keyword used for rewritten queries until the host sends `vs_kw`.
    #[serde(default = "default_keyword")]
    pub default_keyword: String,
}

fn default_editor() -> String {
    "code".into()
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

fn default_keyword() -> String {
    "vs".into()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            editor: default_editor(),
            limit: default_limit(),
            debug_logging: false,
            default_keyword: default_keyword(),
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Load `path`, writing the defaults there first when the file does not exist yet.
    pub fn load_or_create(path: &str) -> anyhow::Result<Self> {
        if Path::new(path).exists() {
            return Self::load(path);
        }
        let settings = Self::default();
        settings.save(path)?;
        Ok(settings)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Raw preference strings as delivered by the host.
pub type Preferences = HashMap<String, String>;

/// Immutable view of everything the navigator needs for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorConfig {
    pub root: PathBuf,
    pub home: PathBuf,
    pub show_hidden: bool,
    pub keyword: String,
    pub limit: usize,
}

impl NavigatorConfig {
    /// Config rooted at `home` with every other option at its default.
    pub fn new(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        Self {
            root: home.clone(),
            home,
            show_hidden: false,
            keyword: default_keyword(),
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Home directory of the current user, or the filesystem root if unknown.
pub fn home_dir() -> PathBuf {
    dirs_next::home_dir().unwrap_or_else(|| PathBuf::from(MAIN_SEPARATOR_STR))
}

/// Validate a configured root. Blank, relative or missing directories fall back to `home`.
pub fn resolve_root(value: Option<&str>, home: &Path) -> PathBuf {
    let value = value.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return home.to_path_buf();
    }
    let path = Path::new(value);
    if path.is_absolute() && path.is_dir() {
        path.to_path_buf()
    } else {
        tracing::warn!(root = %value, "configured root is not an existing directory; using home");
        home.to_path_buf()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsState {
    Uninitialized,
    Loaded,
}

/// Owns the preference lifecycle and hands out config snapshots.
pub struct SettingsStore {
    state: SettingsState,
    config: NavigatorConfig,
}

impl SettingsStore {
    pub fn new(settings: &Settings) -> Self {
        Self::with_home(home_dir(), settings)
    }

    pub fn with_home(home: impl Into<PathBuf>, settings: &Settings) -> Self {
        let mut config = NavigatorConfig::new(home);
        config.keyword = settings.default_keyword.clone();
        config.limit = settings.limit;
        Self {
            state: SettingsState::Uninitialized,
            config,
        }
    }

    pub fn state(&self) -> SettingsState {
        self.state
    }

    /// Apply the full preference set delivered at startup.
    pub fn load(&mut self, prefs: &Preferences) {
        let home_input = prefs.get(PREF_HOME).map(String::as_str);
        tracing::debug!(home = ?home_input, "loading preferences");
        self.config.root = resolve_root(home_input, &self.config.home);
        self.config.show_hidden = prefs
            .get(PREF_SHOW_HIDDEN)
            .map(|v| is_truthy(v))
            .unwrap_or(false);
        if let Some(kw) = prefs.get(PREF_KEYWORD) {
            self.config.keyword = kw.trim().to_string();
        }
        self.state = SettingsState::Loaded;
    }

    /// Overwrite the single setting named by `id`.
    pub fn update(&mut self, id: &str, new_value: &str) {
        match id {
            PREF_HOME => {
                self.config.root = resolve_root(Some(new_value), &self.config.home);
                tracing::info!("Updated home to: {}", self.config.root.display());
            }
            PREF_SHOW_HIDDEN => {
                self.config.show_hidden = is_truthy(new_value);
            }
            PREF_KEYWORD => {
                self.config.keyword = new_value.trim().to_string();
            }
            other => {
                tracing::debug!(id = other, "ignoring unknown preference");
                return;
            }
        }
        self.state = SettingsState::Loaded;
    }

    pub fn snapshot(&self) -> NavigatorConfig {
        self.config.clone()
    }
}
