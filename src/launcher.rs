use crate::actions::exec::EditorLauncher;
use crate::actions::{ItemAction, ResultItem};
use crate::plugin::Plugin;
use crate::plugins::folders::{render_folder, FolderPlugin};
use crate::settings::{Preferences, SettingsStore};
use serde::{Deserialize, Serialize};

/// Events delivered by the launcher host, one per line on stdin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    Preferences {
        preferences: Preferences,
    },
    PreferenceUpdate {
        id: String,
        #[serde(default)]
        old_value: Option<String>,
        new_value: String,
    },
    Query {
        #[serde(default)]
        argument: Option<String>,
    },
    ItemEnter {
        data: ItemAction,
    },
}

/// What the host should do after an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Render { items: Vec<ResultItem> },
    /// Replace the visible query, then show `items`.
    Navigate { query: String, items: Vec<ResultItem> },
    Hide,
    Ack,
    Error { message: String },
}

/// Glue between host events and the folder navigator.
pub struct FolderExtension<L: EditorLauncher> {
    settings: SettingsStore,
    launcher: L,
}

impl<L: EditorLauncher> FolderExtension<L> {
    pub fn new(settings: SettingsStore, launcher: L) -> Self {
        Self { settings, launcher }
    }

    /// Current preference state.
    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// Editor launcher used for `Open` selections.
    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    pub fn handle(&mut self, event: HostEvent) -> Response {
        match event {
            HostEvent::Preferences { preferences } => {
                self.settings.load(&preferences);
                Response::Ack
            }
            HostEvent::PreferenceUpdate { id, new_value, .. } => {
                self.settings.update(&id, &new_value);
                Response::Ack
            }
            HostEvent::Query { argument } => {
                let plugin = FolderPlugin::new(self.settings.snapshot());
                let items = plugin.search(argument.as_deref().unwrap_or_default());
                tracing::debug!(plugin = plugin.name(), results = items.len(), "query handled");
                Response::Render { items }
            }
            HostEvent::ItemEnter { data } => self.select(data),
        }
    }

    fn select(&mut self, action: ItemAction) -> Response {
        match action {
            ItemAction::Open { folder } => {
                if let Err(e) = self.launcher.launch(&folder) {
                    tracing::error!(folder = %folder.display(), error = %e, "failed to launch editor");
                }
                Response::Hide
            }
            ItemAction::Descend { query, folder } => {
                let config = self.settings.snapshot();
                Response::Navigate {
                    query,
                    items: render_folder(&config, &folder),
                }
            }
        }
    }

    /// Decode one protocol line, handle it and encode the response.
    pub fn handle_line(&mut self, line: &str) -> anyhow::Result<String> {
        let response = match serde_json::from_str::<HostEvent>(line) {
            Ok(event) => self.handle(event),
            Err(e) => {
                tracing::warn!(error = %e, "malformed host event");
                Response::Error {
                    message: e.to_string(),
                }
            }
        };
        Ok(serde_json::to_string(&response)?)
    }
}
