use std::sync::mpsc;

/// Host side of a visibility signal: pushes "is the host hidden" whenever it changes.
///
/// Cloneable so several host hooks (window focus, page visibility, ...) can feed one player.
#[derive(Clone, Debug)]
pub struct VisibilityPublisher {
    tx: mpsc::Sender<bool>,
}

impl VisibilityPublisher {
    /// Push a new hidden flag. Returns `false` once the subscriber is gone.
    pub fn publish(&self, hidden: bool) -> bool {
        self.tx.send(hidden).is_ok()
    }
}

/// Player side of a visibility signal. Owned by exactly one player.
#[derive(Debug)]
pub struct VisibilitySubscription {
    rx: mpsc::Receiver<bool>,
}

impl VisibilitySubscription {
    /// Pending signals, oldest first, without blocking.
    pub fn drain(&self) -> Vec<bool> {
        self.rx.try_iter().collect()
    }
}

/// Create a connected publisher/subscription pair.
pub fn channel() -> (VisibilityPublisher, VisibilitySubscription) {
    let (tx, rx) = mpsc::channel();
    (VisibilityPublisher { tx }, VisibilitySubscription { rx })
}
