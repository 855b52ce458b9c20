use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use crate::config::SessionConfig;
use crate::session::Session;

/// Spawn a watcher on `path`; the receiver gets one `()` per change event.
pub fn spawn_session_watcher(path: &Path) -> Receiver<()> {
    let (tx, rx) = std::sync::mpsc::channel::<()>();
    let path = path.to_path_buf();
    std::thread::spawn(move || {
        use notify::{EventKind, RecursiveMode, Watcher};
        match notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
            if let Ok(event) = res {
                match event.kind {
                    EventKind::Modify(_)
                    | EventKind::Create(_)
                    | EventKind::Remove(_)
                    | EventKind::Any => {
                        let _ = tx.send(());
                    }
                    _ => {}
                }
            }
        }) {
            Ok(mut watcher) => {
                if let Err(e) = watcher.watch(path.as_path(), RecursiveMode::NonRecursive) {
                    log::warn!("cannot watch {}: {}", path.display(), e);
                    return;
                }
                loop {
                    std::thread::sleep(Duration::from_secs(3600));
                }
            }
            Err(e) => log::warn!("file watcher unavailable: {}", e),
        }
    });
    rx
}

/// Reloads the session file whenever the watcher fires.
pub struct SessionReloader {
    path: PathBuf,
    rx: Receiver<()>,
}

impl SessionReloader {
    pub fn new(path: PathBuf) -> Self {
        let rx = spawn_session_watcher(&path);
        log::info!("watching {} for changes", path.display());
        Self { path, rx }
    }

    /// Drain pending events; reload if any arrived. Returns true when the
    /// session was replaced.
    #[cfg_attr(not(feature = "window"), allow(dead_code))]
    pub fn poll(&self, session: &mut Session) -> bool {
        let mut changed = false;
        for _ in self.rx.try_iter() {
            changed = true;
        }
        changed && self.reload(session)
    }

    /// Block until the next change (or `timeout`), then reload.
    /// Returns `None` once the watcher thread is gone.
    pub fn wait(&self, session: &mut Session, timeout: Duration) -> Option<bool> {
        match self.rx.recv_timeout(timeout) {
            Ok(()) => {
                // Editors tend to emit a burst of events per save.
                std::thread::sleep(Duration::from_millis(50));
                for _ in self.rx.try_iter() {}
                Some(self.reload(session))
            }
            Err(RecvTimeoutError::Timeout) => Some(false),
            Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    fn reload(&self, session: &mut Session) -> bool {
        reload_session(&self.path, session)
    }
}

/// Replace `session` from the file at `path`, keeping its seed and roll.
/// On a missing or malformed file the previous state is kept.
pub fn reload_session(path: &Path, session: &mut Session) -> bool {
    if !path.exists() {
        log::warn!("session file missing: {}", path.display());
        return false;
    }
    match SessionConfig::load(path) {
        Ok(cfg) => {
            session.reload(cfg);
            log::info!("session reloaded from {}", path.display());
            true
        }
        Err(e) => {
            log::warn!("session reload failed ({}): {}", path.display(), e);
            false
        }
    }
}
