use std::path::{Path, MAIN_SEPARATOR};

/// Side-effect boundary for opening a folder in the editor.
pub trait EditorLauncher {
    fn launch(&mut self, folder: &Path) -> anyhow::Result<()>;
}

/// The single argument handed to the editor: the folder with a trailing separator.
pub fn editor_argument(folder: &Path) -> String {
    format!("{}{}", folder.display(), MAIN_SEPARATOR)
}

/// Spawns the configured editor command without waiting for it.
pub struct CommandLauncher {
    editor: String,
}

impl CommandLauncher {
    pub fn new(editor: impl Into<String>) -> Self {
        Self {
            editor: editor.into(),
        }
    }
}

impl EditorLauncher for CommandLauncher {
    fn launch(&mut self, folder: &Path) -> anyhow::Result<()> {
        let target = editor_argument(folder);
        let editor = self.editor.trim();
        let parts = shlex::split(editor)
            .unwrap_or_else(|| editor.split_whitespace().map(str::to_string).collect());
        let Some((program, args)) = parts.split_first() else {
            anyhow::bail!("no editor command configured");
        };

        tracing::info!(editor = %program, target = %target, "launching editor");
        if args.is_empty() {
            open::with_detached(&target, program.as_str()).map_err(|e| e.into())
        } else {
            let mut command = std::process::Command::new(program);
            command.args(args).arg(&target);
            command.spawn().map(|_| ()).map_err(|e| e.into())
        }
    }
}
