//! In-process notice bus for user-facing failure messages.

use tokio::sync::broadcast;

use autopanel_domain::id::AutomationId;

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A transient message shown to the user, e.g. as a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    /// The automation the message is about, if any.
    pub automation_id: Option<AutomationId>,
    pub text: String,
}

impl Notice {
    #[must_use]
    pub fn error(automation_id: Option<AutomationId>, text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            automation_id,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn info(automation_id: Option<AutomationId>, text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            automation_id,
            text: text.into(),
        }
    }
}

/// Notice bus using a tokio [`broadcast`] channel.
///
/// Pushing succeeds even when nobody listens (the notice is simply dropped).
#[derive(Clone)]
pub struct Notifier {
    sender: broadcast::Sender<Notice>,
}

impl Notifier {
    /// Create a new bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to notices pushed *after* this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.sender.subscribe()
    }

    pub fn push(&self, notice: Notice) {
        // send only fails when there are no receivers
        let _ = self.sender.send(notice);
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(64)
    }
}
