//! Mayor Villa - interactive behaviour for the residence landing page
//!
//! Core modules:
//! - `catalog`: Static feature, challenge and spotlight content
//! - `notifier`: Single-slot toast notifications
//! - `reveal`: Scroll-triggered reveal marking
//! - `interaction`: Card hover lift and feature card clicks
//! - `navigation`: Anchor scrolling and active section highlighting
//! - `rotation`: Daily challenge and member spotlight
//! - `page`: Event-driven controller tying the above together
//! - `platform`: Rendering/query interface plus browser and in-memory views

pub mod catalog;
pub mod error;
pub mod interaction;
pub mod navigation;
pub mod notifier;
pub mod page;
pub mod platform;
pub mod reveal;
pub mod rotation;
pub mod settings;

pub use error::{PageError, PageResult};
pub use page::{Page, PageEvent, Schedule, Timer};
pub use settings::{MotionPreference, Settings};

/// Page behaviour constants
pub mod consts {
    /// How long a notification stays up before it starts to leave (ms)
    pub const NOTIFICATION_DURATION_MS: u32 = 5000;
    /// Length of the slide-out transition before the node is detached (ms)
    pub const EXIT_TRANSITION_MS: u32 = 300;
    /// Member spotlight rotation period (ms)
    pub const SPOTLIGHT_INTERVAL_MS: u32 = 30_000;

    /// A section becomes current this many pixels before its top reaches the viewport top
    pub const NAV_LOOKAHEAD_PX: f64 = 200.0;

    /// Visible fraction required before an animated element is revealed
    pub const REVEAL_THRESHOLD: f64 = 0.1;
    /// Observer root margin; shrinks the viewport bottom so elements reveal slightly late
    pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

    /// Hover lift for cards (px)
    pub const CARD_LIFT_PX: f64 = 8.0;

    /// CSS class marking a revealed element
    pub const VISIBLE_CLASS: &str = "visible";
    /// CSS class marking the current navigation link
    pub const ACTIVE_CLASS: &str = "active";
}
