//! Single-slot toast notifications
//!
//! At most one notification is alive at a time. Showing a new one evicts the
//! old one immediately. Timed removal is two-phase: start the exit transition,
//! then detach once it has played. Timers are never cancelled; every timed
//! step carries the id it was armed for and is ignored if that notification
//! is no longer the live one.

use crate::platform::NotificationView;

/// Identifies one shown notification; ids are never reused within a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(pub u32);

/// A notification instance
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub message: String,
    /// Page clock (ms) when shown
    pub created_at_ms: f64,
}

/// Lifecycle of the notification slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotifierPhase {
    /// Nothing on screen
    #[default]
    Idle,
    /// Notification on screen, waiting for auto-dismiss or close
    Visible,
    /// Exit transition running, detach pending
    AnimatingOut,
}

/// Owner of the notification slot
#[derive(Debug, Default)]
pub struct Notifier {
    current: Option<Notification>,
    phase: NotifierPhase,
    next_id: u32,
    keyframes_installed: bool,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> NotifierPhase {
        self.phase
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    fn is_live(&self, id: NotificationId) -> bool {
        self.current.as_ref().is_some_and(|n| n.id == id)
    }

    /// Show a notification, replacing any current one
    ///
    /// The caller is responsible for arming the auto-dismiss timer for the
    /// returned id.
    pub fn show<V: NotificationView + ?Sized>(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        now_ms: f64,
        view: &mut V,
    ) -> NotificationId {
        if let Some(old) = self.current.take() {
            log::debug!("Replacing notification {:?}", old.id);
            view.unmount_notification(old.id);
        }

        if !self.keyframes_installed {
            view.install_keyframes();
            self.keyframes_installed = true;
        }

        let id = NotificationId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        let notification = Notification {
            id,
            title: title.into(),
            message: message.into(),
            created_at_ms: now_ms,
        };
        view.mount_notification(&notification);
        log::info!("Notification shown: {}", notification.title);

        self.current = Some(notification);
        self.phase = NotifierPhase::Visible;
        id
    }

    /// Start the exit transition for `id`
    ///
    /// Returns true if the transition started and a detach should be armed.
    pub fn begin_dismiss<V: NotificationView + ?Sized>(
        &mut self,
        id: NotificationId,
        view: &mut V,
    ) -> bool {
        if !self.is_live(id) || self.phase != NotifierPhase::Visible {
            return false;
        }
        view.start_notification_exit(id);
        self.phase = NotifierPhase::AnimatingOut;
        true
    }

    /// Remove `id` from the document; no-op unless it is the live notification
    pub fn detach<V: NotificationView + ?Sized>(&mut self, id: NotificationId, view: &mut V) -> bool {
        if !self.is_live(id) {
            return false;
        }
        view.unmount_notification(id);
        self.current = None;
        self.phase = NotifierPhase::Idle;
        log::debug!("Notification {:?} removed", id);
        true
    }

    /// Close button: immediate removal without the exit transition
    pub fn close<V: NotificationView + ?Sized>(&mut self, id: NotificationId, view: &mut V) -> bool {
        self.detach(id, view)
    }
}
