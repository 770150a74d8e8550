//! Page behaviour settings
//!
//! Read once at startup from an optional inline JSON block; never written back.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Motion preference levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MotionPreference {
    #[default]
    Full,
    Reduced,
}

impl MotionPreference {
    /// Whether anchor clicks scroll smoothly
    pub fn smooth_scroll(&self) -> bool {
        matches!(self, MotionPreference::Full)
    }

    /// Whether cards lift on hover
    pub fn card_lift(&self) -> bool {
        matches!(self, MotionPreference::Full)
    }
}

/// Page settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Notifications ===
    /// Time a notification stays up before leaving (ms)
    pub notification_duration_ms: u32,
    /// Slide-out length before the node is removed (ms)
    pub exit_transition_ms: u32,

    // === Rotation ===
    /// Member spotlight period (ms)
    pub spotlight_interval_ms: u32,
    /// Start the spotlight rotation on load instead of waiting for `initMemberSpotlight`
    pub spotlight_autostart: bool,

    // === Navigation ===
    /// Lookahead applied to section tops when picking the active link (px)
    pub nav_lookahead_px: f64,

    // === Reveal ===
    /// Visible fraction that triggers a reveal
    pub reveal_threshold: f64,
    /// IntersectionObserver root margin
    pub reveal_root_margin: String,

    // === Cards ===
    /// Hover lift distance (px)
    pub card_lift_px: f64,

    // === Accessibility ===
    pub motion: MotionPreference,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notification_duration_ms: NOTIFICATION_DURATION_MS,
            exit_transition_ms: EXIT_TRANSITION_MS,

            spotlight_interval_ms: SPOTLIGHT_INTERVAL_MS,
            spotlight_autostart: false,

            nav_lookahead_px: NAV_LOOKAHEAD_PX,

            reveal_threshold: REVEAL_THRESHOLD,
            reveal_root_margin: REVEAL_ROOT_MARGIN.to_string(),

            card_lift_px: CARD_LIFT_PX,

            motion: MotionPreference::Full,
        }
    }
}

impl Settings {
    /// Id of the `<script type="application/json">` element holding overrides
    pub const CONFIG_ELEMENT_ID: &'static str = "mayor-villa-config";

    /// Parse settings from JSON, falling back to defaults for missing fields
    /// and to full defaults if the JSON is malformed
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring malformed page config: {}", e);
                Self::default()
            }
        }
    }

    /// Apply an OS-level motion preference; reduced always wins
    pub fn apply_motion_preference(&mut self, preference: MotionPreference) {
        if preference == MotionPreference::Reduced {
            self.motion = MotionPreference::Reduced;
        }
    }

    /// Effective hover lift (respects reduced motion)
    pub fn effective_card_lift_px(&self) -> f64 {
        if self.motion.card_lift() {
            self.card_lift_px
        } else {
            0.0
        }
    }

    /// Load settings from the inline config block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let document = web_sys::window().and_then(|w| w.document());

        let mut settings = match document
            .as_ref()
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content())
        {
            Some(json) => {
                log::info!("Loaded page config");
                Self::from_json(&json)
            }
            None => {
                log::info!("Using default page config");
                Self::default()
            }
        };

        let reduced = web_sys::window()
            .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok())
            .flatten()
            .map(|mq| mq.matches())
            .unwrap_or(false);
        if reduced {
            settings.apply_motion_preference(MotionPreference::Reduced);
            log::info!("Reduced motion requested by the browser");
        }

        settings
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
