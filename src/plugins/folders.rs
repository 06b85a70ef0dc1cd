use crate::actions::{Icon, ItemAction, ResultItem};
use crate::common::strip_root_prefix;
use crate::plugin::Plugin;
use crate::settings::NavigatorConfig;
use std::path::{Path, PathBuf, MAIN_SEPARATOR, MAIN_SEPARATOR_STR};
use std::time::SystemTime;

/// Marker that anchors a fragment at the user's home directory.
pub const HOME_MARKER: &str = "~/";

pub const OPEN_CURRENT_LABEL: &str = "Open current folder";
pub const GO_TO_PARENT_LABEL: &str = "Go to parent";

/// Directory a fragment points at plus the trailing text used as a name filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub base: PathBuf,
    pub filter: String,
}

/// Lexical cleanup only: drops repeated and trailing separators, never resolves `..`.
fn clean(path: &str) -> PathBuf {
    Path::new(path).components().collect()
}

pub fn resolve_fragment(config: &NavigatorConfig, fragment: &str) -> Resolved {
    let (mut base, residual): (PathBuf, &str) = if fragment.is_empty() {
        (config.root.clone(), "")
    } else if fragment.starts_with(MAIN_SEPARATOR) {
        match fragment.rsplit_once(MAIN_SEPARATOR) {
            Some((head, tail)) if !head.is_empty() => (clean(head), tail),
            _ => (
                PathBuf::from(MAIN_SEPARATOR_STR),
                &fragment[MAIN_SEPARATOR.len_utf8()..],
            ),
        }
    } else if let Some(idx) = fragment.find(HOME_MARKER) {
        (config.home.clone(), &fragment[idx + HOME_MARKER.len()..])
    } else {
        (config.root.clone(), fragment)
    };

    // several levels typed at once: descend through all but the last segment
    let filter = match residual.rsplit_once(MAIN_SEPARATOR) {
        Some((dirs, last)) => {
            for segment in dirs
                .split(MAIN_SEPARATOR)
                .filter(|s| !s.is_empty() && *s != ".")
            {
                base.push(segment);
            }
            last
        }
        None => residual,
    };

    Resolved {
        base,
        filter: filter.to_string(),
    }
}

/// Hidden means the name starts with a dot. Nothing else is consulted.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Subdirectories of `base` whose name contains `filter` (ignoring case),
/// newest modification time first, at most `limit` of them.
pub fn list_candidates(base: &Path, filter: &str, show_hidden: bool, limit: usize) -> Vec<PathBuf> {
    if !base.exists() {
        return Vec::new();
    }
    let entries = match std::fs::read_dir(base) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(folder = %base.display(), error = %e, "cannot list folder");
            return Vec::new();
        }
    };

    let needle = filter.to_lowercase();
    let mut found: Vec<(SystemTime, PathBuf)> = entries
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !show_hidden && is_hidden(&name) {
                return None;
            }
            if !name.to_lowercase().contains(&needle) {
                return None;
            }
            let path = entry.path();
            // follows symlinks; entries removed since read_dir fail here and are skipped
            let meta = std::fs::metadata(&path).ok()?;
            if !meta.is_dir() {
                return None;
            }
            let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            Some((modified, path))
        })
        .collect();

    found.sort_by(|a, b| b.0.cmp(&a.0));
    found.into_iter().take(limit).map(|(_, p)| p).collect()
}

/// Result list for the text typed after the keyword.
pub fn render_listing(config: &NavigatorConfig, fragment: &str) -> Vec<ResultItem> {
    let Resolved { base, filter } = resolve_fragment(config, fragment);
    tracing::debug!(folder = %base.display(), filter = %filter, "listing folders");
    let candidates = list_candidates(&base, &filter, config.show_hidden, config.limit);
    build_items(config, &base, &candidates)
}

/// Result list for an explicit folder with no filter applied.
pub fn render_folder(config: &NavigatorConfig, folder: &Path) -> Vec<ResultItem> {
    let candidates = list_candidates(folder, "", config.show_hidden, config.limit);
    build_items(config, folder, &candidates)
}

/// Path as shown to the user: relative to the root when below it.
pub fn display_path(config: &NavigatorConfig, path: &Path) -> String {
    strip_root_prefix(&path.to_string_lossy(), &config.root)
}

fn rewrite_query(keyword: &str, rest: &str) -> String {
    if keyword.is_empty() {
        rest.to_string()
    } else {
        format!("{keyword} {rest}")
    }
}

fn build_items(config: &NavigatorConfig, base: &Path, candidates: &[PathBuf]) -> Vec<ResultItem> {
    let parent = base.parent().unwrap_or(base).to_path_buf();
    let relative_base = display_path(config, base);

    let mut items = Vec::with_capacity(candidates.len() + 2);
    items.push(ResultItem::new(
        Icon::Current,
        OPEN_CURRENT_LABEL,
        base.display().to_string(),
        ItemAction::Open {
            folder: base.to_path_buf(),
        },
    ));
    items.push(ResultItem::new(
        Icon::Parent,
        GO_TO_PARENT_LABEL,
        parent.display().to_string(),
        ItemAction::Descend {
            query: rewrite_query(
                &config.keyword,
                &format!("{relative_base}{MAIN_SEPARATOR}..{MAIN_SEPARATOR}"),
            ),
            folder: parent,
        },
    ));

    for folder in candidates {
        let relative = display_path(config, folder);
        let query = rewrite_query(&config.keyword, &format!("{relative}{MAIN_SEPARATOR}"));
        items.push(ResultItem::new(
            Icon::Child,
            relative,
            folder.display().to_string(),
            ItemAction::Descend {
                query,
                folder: folder.clone(),
            },
        ));
    }
    items
}

/// Navigator bound to one settings snapshot.
pub struct FolderPlugin {
    config: NavigatorConfig,
}

impl FolderPlugin {
    pub fn new(config: NavigatorConfig) -> Self {
        Self { config }
    }
}

impl Plugin for FolderPlugin {
    fn search(&self, query: &str) -> Vec<ResultItem> {
        render_listing(&self.config, query)
    }

    fn name(&self) -> &str {
        "vs_folder"
    }

    fn description(&self) -> &str {
        "Browse folders and open them in the editor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(root: &str) -> NavigatorConfig {
        let mut cfg = NavigatorConfig::new("/home/me");
        cfg.root = PathBuf::from(root);
        cfg
    }

    fn resolved(base: &str, filter: &str) -> Resolved {
        Resolved {
            base: PathBuf::from(base),
            filter: filter.into(),
        }
    }

    #[test]
    fn plain_fragment_stays_at_root() {
        let cfg = config("/srv/work");
        for frag in ["", "proj", "My Docs", "a~b"] {
            assert_eq!(resolve_fragment(&cfg, frag), resolved("/srv/work", frag));
        }
    }

    #[test]
    fn single_leading_separator_is_filesystem_root() {
        let cfg = config("/srv/work");
        assert_eq!(resolve_fragment(&cfg, "/etc"), resolved("/", "etc"));
        assert_eq!(resolve_fragment(&cfg, "/"), resolved("/", ""));
    }

    #[test]
    fn absolute_fragment_splits_on_last_separator() {
        let cfg = config("/srv/work");
        assert_eq!(resolve_fragment(&cfg, "/usr/loc"), resolved("/usr", "loc"));
        assert_eq!(resolve_fragment(&cfg, "/usr/local/"), resolved("/usr/local", ""));
        assert_eq!(resolve_fragment(&cfg, "/usr//lib/x"), resolved("/usr/lib", "x"));
    }

    #[test]
    fn home_marker_anchors_at_home() {
        let cfg = config("/srv/work");
        assert_eq!(resolve_fragment(&cfg, "~/Doc"), resolved("/home/me", "Doc"));
        assert_eq!(resolve_fragment(&cfg, "~/"), resolved("/home/me", ""));
        assert_eq!(
            resolve_fragment(&cfg, "~/code/rust/ser"),
            resolved("/home/me/code/rust", "ser")
        );
    }

    #[test]
    fn relative_segments_descend_from_root() {
        let cfg = config("/srv/work");
        assert_eq!(resolve_fragment(&cfg, "a/b/c"), resolved("/srv/work/a/b", "c"));
        assert_eq!(resolve_fragment(&cfg, "a//b/"), resolved("/srv/work/a/b", ""));
        // parent segments are kept literally
        assert_eq!(resolve_fragment(&cfg, "a/../"), resolved("/srv/work/a/..", ""));
    }

    #[test]
    fn hidden_is_first_character_only() {
        assert!(is_hidden(".git"));
        assert!(is_hidden("."));
        assert!(!is_hidden("x.hidden"));
        assert!(!is_hidden(""));
    }

    fn mkdir_at(parent: &Path, name: &str, secs: u64) -> PathBuf {
        let path = parent.join(name);
        std::fs::create_dir(&path).expect("mkdir");
        let f = std::fs::File::open(&path).expect("open dir");
        f.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
            .expect("set mtime");
        path
    }

    #[test]
    fn candidates_skip_files_and_respect_limit() {
        let dir = tempfile::tempdir().expect("tempdir");
        for i in 0..5u64 {
            mkdir_at(dir.path(), &format!("d{i}"), 1_000 + i);
        }
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let all = list_candidates(dir.path(), "", false, 10);
        let names: Vec<_> = all
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["d4", "d3", "d2", "d1", "d0"]);

        assert_eq!(list_candidates(dir.path(), "", false, 2).len(), 2);
        assert!(list_candidates(dir.path(), "", false, 0).is_empty());
    }

    #[test]
    fn missing_base_lists_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let gone = dir.path().join("gone");
        assert!(list_candidates(&gone, "", true, 10).is_empty());
        let file = dir.path().join("f");
        std::fs::write(&file, "x").unwrap();
        assert!(list_candidates(&file, "", true, 10).is_empty());
    }

    #[test]
    fn listing_shape_is_current_parent_then_matches() {
        let dir = tempfile::tempdir().expect("tempdir");
        mkdir_at(dir.path(), "alpha", 10);
        mkdir_at(dir.path(), "beta", 20);
        let mut cfg = NavigatorConfig::new(dir.path());
        cfg.keyword = "vs".into();

        let items = render_listing(&cfg, "");
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].icon, Icon::Current);
        assert_eq!(
            items[0].on_enter,
            ItemAction::Open {
                folder: dir.path().to_path_buf()
            }
        );
        assert_eq!(items[1].label, GO_TO_PARENT_LABEL);
        assert_eq!(items[2].label, "beta");
        assert_eq!(
            items[2].on_enter,
            ItemAction::Descend {
                query: "vs beta/".into(),
                folder: dir.path().join("beta"),
            }
        );
    }

    #[test]
    fn parent_query_uses_relative_or_absolute_base() {
        let dir = tempfile::tempdir().expect("tempdir");
        let sub = mkdir_at(dir.path(), "proj", 10);
        let cfg = NavigatorConfig::new(dir.path());

        let items = render_listing(&cfg, "proj/");
        assert_eq!(
            items[1].on_enter,
            ItemAction::Descend {
                query: "vs proj/../".into(),
                folder: dir.path().to_path_buf(),
            }
        );
        assert_eq!(items[1].desc, dir.path().display().to_string());

        let abs = format!("{}/", sub.display());
        let items = render_listing(&config("/nowhere"), &abs);
        match &items[1].on_enter {
            ItemAction::Descend { query, .. } => {
                assert_eq!(query, &format!("vs {}/../", sub.display()));
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn empty_keyword_has_no_leading_space() {
        let dir = tempfile::tempdir().expect("tempdir");
        mkdir_at(dir.path(), "x", 10);
        let mut cfg = NavigatorConfig::new(dir.path());
        cfg.keyword.clear();
        let items = render_folder(&cfg, dir.path());
        assert_eq!(
            items[2].on_enter,
            ItemAction::Descend {
                query: "x/".into(),
                folder: dir.path().join("x"),
            }
        );
    }

    #[test]
    fn plugin_searches_with_its_snapshot() {
        let dir = tempfile::tempdir().expect("tempdir");
        mkdir_at(dir.path(), "one", 10);
        let plugin = FolderPlugin::new(NavigatorConfig::new(dir.path()));
        assert_eq!(plugin.name(), "vs_folder");
        assert_eq!(plugin.search("on").len(), 3);
        assert_eq!(plugin.search("zzz").len(), 2);
    }
}
