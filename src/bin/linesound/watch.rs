//! Config file watching for hot reload.

use std::{
    path::{Path, PathBuf},
    sync::mpsc::Sender,
};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::AppEvent;

/// Watch the directory holding `path` and post [`AppEvent::ConfigChanged`]
/// whenever that file is written or recreated.
///
/// Editors often save by writing a temp file and renaming it over the
/// config file, which removes a watch placed on the file itself, so the parent
/// directory is watched instead. Drop the returned watcher to stop.
pub fn watch(path: &Path, events: Sender<AppEvent>) -> EyreResult<RecommendedWatcher> {
    let file_name = path
        .file_name()
        .ok_or_else(|| eyre!("config path {} has no file name", path.display()))?
        .to_owned();
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) => {
            let relevant = matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
                && event
                    .paths
                    .iter()
                    .any(|p| p.file_name() == Some(file_name.as_os_str()));
            if relevant {
                // Receiver gone means we're shutting down
                let _ = events.send(AppEvent::ConfigChanged);
            }
        }
        Err(err) => tracing::warn!("config watch error: {err}"),
    })
    .wrap_err("can't create config watcher")?;

    watcher
        .watch(&dir, RecursiveMode::NonRecursive)
        .wrap_err_with(|| format!("can't watch {}", dir.display()))?;

    tracing::info!(dir = %dir.display(), "watching config for changes");
    Ok(watcher)
}
