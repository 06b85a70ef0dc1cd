use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Icon class shown next to a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Current,
    Parent,
    Child,
}

impl Icon {
    /// Image shipped with the extension for this icon class.
    pub fn image(&self) -> &'static str {
        match self {
            Icon::Current => "images/open-folder.png",
            Icon::Parent | Icon::Child => "images/inner-folder.png",
        }
    }
}

/// What happens when the user confirms a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemAction {
    /// Rewrite the visible query and list `folder` without closing the launcher.
    Descend { query: String, folder: PathBuf },
    /// Launch the editor on `folder` and close the launcher.
    Open { folder: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    pub icon: Icon,
    /// Image path for `icon`, sent so the host can draw it directly.
    pub image: String,
    pub label: String,
    pub desc: String,
    pub on_enter: ItemAction,
}

impl ResultItem {
    pub fn new(icon: Icon, label: impl Into<String>, desc: impl Into<String>, on_enter: ItemAction) -> Self {
        Self {
            icon,
            image: icon.image().to_string(),
            label: label.into(),
            desc: desc.into(),
            on_enter,
        }
    }
}

pub mod exec;
