//! File watcher for hot reload of configuration and content.

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::observability::metrics;

/// Watches a set of paths and reruns a loader whenever one of them changes.
///
/// Each successful load is sent on the update channel. Failed loads are
/// logged and dropped so the running state stays in place.
pub struct ConfigWatcher<T, F> {
    paths: Vec<PathBuf>,
    load: F,
    update_tx: mpsc::UnboundedSender<T>,
}

impl<T, E, F> ConfigWatcher<T, F>
where
    T: Send + 'static,
    E: Display,
    F: Fn() -> Result<T, E> + Send + 'static,
{
    /// Create a new watcher.
    ///
    /// Returns the watcher and a receiver for reloaded values.
    pub fn new(paths: Vec<PathBuf>, load: F) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                paths,
                load,
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching in a background thread.
    ///
    /// The returned handle must be kept alive for as long as events are wanted.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx;
        let load = self.load;

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!(paths = ?event.paths, "Change detected, reloading");
                        match load() {
                            Ok(value) => {
                                metrics::record_reload("ok");
                                let _ = tx.send(value);
                            }
                            Err(e) => {
                                metrics::record_reload("error");
                                tracing::error!(
                                    error = %e,
                                    "Reload failed, keeping current state"
                                );
                            }
                        }
                    }
                }
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        for path in &self.paths {
            watcher.watch(path, watch_mode(path))?;
        }

        tracing::info!(paths = ?self.paths, "File watcher started");
        Ok(watcher)
    }
}

fn watch_mode(path: &Path) -> RecursiveMode {
    if path.is_dir() {
        RecursiveMode::Recursive
    } else {
        RecursiveMode::NonRecursive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directories_watched_recursively() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(watch_mode(dir.path()), RecursiveMode::Recursive);

        let file = dir.path().join("site.toml");
        std::fs::write(&file, "").unwrap();
        assert_eq!(watch_mode(&file), RecursiveMode::NonRecursive);
    }

    #[tokio::test]
    async fn test_reload_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("value.txt");
        std::fs::write(&file, "one").unwrap();

        let read_path = file.clone();
        let (watcher, mut updates) = ConfigWatcher::new(vec![dir.path().to_path_buf()], move || {
            std::fs::read_to_string(&read_path)
        });
        let _handle = watcher.run().unwrap();

        tokio::time::sleep(Duration::from_millis(200)).await;
        std::fs::write(&file, "two").unwrap();

        let value = tokio::time::timeout(Duration::from_secs(10), async {
            loop {
                match updates.recv().await {
                    Some(v) if v == "two" => break v,
                    Some(_) => continue,
                    None => panic!("watcher channel closed"),
                }
            }
        })
        .await
        .expect("no reload observed");
        assert_eq!(value, "two");
    }
}
