//! Scene file change monitor: watches the TOML and signals re-renders.

use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError, TryRecvError};
use std::thread::JoinHandle;
use std::time::Duration;

use log::{debug, info, warn};
use notify::{RecursiveMode, Watcher};

/// How often the watcher thread checks for shutdown between events.
const POLL: Duration = Duration::from_millis(200);

/// Watches the scene file's parent directory and sends `()` on `reload`
/// each time the scene file is modified. Dropping the monitor stops the
/// watcher thread.
pub struct SceneMonitor {
    shutdown_tx: mpsc::Sender<()>,
    thread: Option<JoinHandle<()>>,
}

impl SceneMonitor {
    /// Start watching `scene`. Returns `None` if the parent directory
    /// doesn't exist or the watcher cannot be created.
    pub fn new(scene: &Path, reload: mpsc::Sender<()>) -> Option<Self> {
        let scene = scene.canonicalize().ok()?;
        let parent = scene.parent()?.to_path_buf();

        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();
        let (notify_tx, notify_rx) = mpsc::channel();

        let mut watcher = match notify::recommended_watcher(notify_tx) {
            Ok(w) => w,
            Err(e) => {
                warn!("scene_monitor: failed to create watcher: {e}");
                return None;
            }
        };

        if let Err(e) = watcher.watch(&parent, RecursiveMode::NonRecursive) {
            warn!("scene_monitor: failed to watch {}: {e}", parent.display());
            return None;
        }

        info!("scene_monitor: watching {}", scene.display());

        let thread = std::thread::Builder::new()
            .name("scene-watcher".into())
            .spawn(move || {
                // Keep the watcher alive for the lifetime of this thread.
                let _watcher = watcher;
                Self::watch_loop(&scene, &reload, &notify_rx, &shutdown_rx);
            })
            .ok()?;

        Some(Self {
            shutdown_tx,
            thread: Some(thread),
        })
    }

    fn watch_loop(
        scene: &Path,
        reload: &mpsc::Sender<()>,
        notify_rx: &mpsc::Receiver<Result<notify::Event, notify::Error>>,
        shutdown_rx: &mpsc::Receiver<()>,
    ) {
        loop {
            if !matches!(shutdown_rx.try_recv(), Err(TryRecvError::Empty)) {
                return;
            }
            let event = match notify_rx.recv_timeout(POLL) {
                Ok(event) => event,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => return,
            };

            let is_scene_event = match &event {
                Ok(ev) => ev.paths.iter().any(|p| p == scene),
                Err(_) => false,
            };
            if !is_scene_event {
                continue;
            }

            // Editors write in bursts; coalesce them into one reload.
            while notify_rx.recv_timeout(POLL).is_ok() {}

            if !matches!(shutdown_rx.try_recv(), Err(TryRecvError::Empty)) {
                return;
            }

            debug!("scene_monitor: scene changed, requesting re-render");
            if reload.send(()).is_err() {
                // Receiver gone.
                return;
            }
        }
    }
}

impl Drop for SceneMonitor {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(());
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}
