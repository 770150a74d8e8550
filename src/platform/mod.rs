//! Platform abstraction layer
//!
//! The page logic talks to the document only through these traits:
//! - `NotificationView`: mounting and tearing down the toast node
//! - `PageView`: class/style mutations, scrolling, clock, visibility, prompt
//!
//! `DomView` implements them over `web-sys` in the browser; `RecordingView`
//! keeps an in-memory picture of the document for tests and native runs.

pub mod recording;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use recording::RecordingView;
#[cfg(target_arch = "wasm32")]
pub use web::DomView;

use crate::navigation::SectionBounds;
use crate::notifier::{Notification, NotificationId};

/// Index of a card or animated element in the list collected at wiring time
pub type ElementKey = usize;

/// Window property holding the public functions, as in `MayorVilla.showNotification(..)`
pub const GLOBAL_NAMESPACE: &str = "MayorVilla";
pub const SHOW_DAILY_CHALLENGE: &str = "showDailyChallenge";
pub const SHOW_NOTIFICATION: &str = "showNotification";
pub const INIT_MEMBER_SPOTLIGHT: &str = "initMemberSpotlight";

/// Delay argument for `setTimeout`/`setInterval`
///
/// Browsers take a signed 32-bit delay; larger values saturate instead of
/// wrapping negative and firing immediately.
pub fn timer_delay(ms: u32) -> i32 {
    i32::try_from(ms).unwrap_or(i32::MAX)
}

/// Rendering of the notification slot
pub trait NotificationView {
    /// Add the slide-in/slide-out keyframes to the document (called once)
    fn install_keyframes(&mut self);
    /// Insert a styled notification node with a close control
    fn mount_notification(&mut self, notification: &Notification);
    /// Play the exit transition on a mounted notification
    fn start_notification_exit(&mut self, id: NotificationId);
    /// Detach a notification node; must tolerate ids that are already gone
    fn unmount_notification(&mut self, id: NotificationId);
}

/// Everything else the page controller needs from the document
pub trait PageView: NotificationView {
    /// Page clock in milliseconds
    fn now_ms(&self) -> f64;
    /// Whether the document is hidden (background tab, minimized)
    fn is_hidden(&self) -> bool;

    fn set_card_transform(&mut self, card: ElementKey, transform: &str);
    /// Add the `visible` class to an animated element
    fn mark_revealed(&mut self, element: ElementKey);

    /// Scroll `target_id` to the top of the viewport; false if no such element
    fn scroll_to(&mut self, target_id: &str, smooth: bool) -> bool;
    /// Current `section[id]` offsets in document order
    fn section_bounds(&self) -> Vec<SectionBounds>;
    /// Move the `active` class to the navigation link for `current`
    fn set_active_link(&mut self, current: Option<&str>);

    /// Ask the visitor for free text; `None` if dismissed
    fn prompt(&mut self, text: &str) -> Option<String>;
    /// Write the year into the footer; false if the element is absent
    fn set_footer_year(&mut self, year: i32) -> bool;
}
