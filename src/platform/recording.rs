//! In-memory document used by tests and the native walkthrough

use std::collections::{HashMap, HashSet, VecDeque};

use super::{ElementKey, NotificationView, PageView};
use crate::navigation::{self, SectionBounds};
use crate::notifier::{Notification, NotificationId};

/// A fake document that records every mutation the page makes
#[derive(Debug, Default)]
pub struct RecordingView {
    pub now_ms: f64,
    pub hidden: bool,

    /// Notification nodes currently in the document
    pub notifications: Vec<Notification>,
    /// Notifications playing their exit transition
    pub exiting: HashSet<NotificationId>,
    pub keyframe_installs: usize,
    pub unmounts: usize,

    pub card_transforms: HashMap<ElementKey, String>,
    /// Elements carrying the `visible` class
    pub revealed: HashSet<ElementKey>,
    /// Number of `mark_revealed` calls, including repeats
    pub reveal_writes: usize,

    /// Ids of elements that exist as anchor targets
    pub anchors: HashSet<String>,
    /// Successful scroll requests as (target, smooth)
    pub scrolls: Vec<(String, bool)>,
    pub sections: Vec<SectionBounds>,
    /// Hrefs of `.main-nav a` links
    pub nav_links: Vec<String>,
    /// Hrefs currently carrying `active`
    pub active_links: Vec<String>,

    /// Scripted prompt responses, consumed front to back
    pub prompt_answers: VecDeque<Option<String>>,
    pub prompts: Vec<String>,

    pub has_footer_year: bool,
    pub footer_year: Option<String>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// A view shaped like the residence page: three sections and matching nav links
    pub fn residence_page() -> Self {
        let sections = vec![
            SectionBounds::new("home", 0.0),
            SectionBounds::new("about", 500.0),
            SectionBounds::new("members", 1200.0),
        ];
        Self {
            anchors: sections.iter().map(|s| s.id.clone()).collect(),
            nav_links: sections.iter().map(|s| format!("#{}", s.id)).collect(),
            sections,
            has_footer_year: true,
            ..Self::default()
        }
    }

    pub fn notification_count(&self) -> usize {
        self.notifications.len()
    }

    pub fn last_notification(&self) -> Option<&Notification> {
        self.notifications.last()
    }
}

impl NotificationView for RecordingView {
    fn install_keyframes(&mut self) {
        self.keyframe_installs += 1;
    }

    fn mount_notification(&mut self, notification: &Notification) {
        self.notifications.push(notification.clone());
    }

    fn start_notification_exit(&mut self, id: NotificationId) {
        if self.notifications.iter().any(|n| n.id == id) {
            self.exiting.insert(id);
        }
    }

    fn unmount_notification(&mut self, id: NotificationId) {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.id != id);
        if self.notifications.len() != before {
            self.unmounts += 1;
        }
        self.exiting.remove(&id);
    }
}

impl PageView for RecordingView {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn set_card_transform(&mut self, card: ElementKey, transform: &str) {
        self.card_transforms.insert(card, transform.to_string());
    }

    fn mark_revealed(&mut self, element: ElementKey) {
        self.reveal_writes += 1;
        self.revealed.insert(element);
    }

    fn scroll_to(&mut self, target_id: &str, smooth: bool) -> bool {
        if !self.anchors.contains(target_id) {
            return false;
        }
        self.scrolls.push((target_id.to_string(), smooth));
        true
    }

    fn section_bounds(&self) -> Vec<SectionBounds> {
        self.sections.clone()
    }

    fn set_active_link(&mut self, current: Option<&str>) {
        self.active_links = self
            .nav_links
            .iter()
            .filter(|href| navigation::link_is_active(href, current))
            .cloned()
            .collect();
    }

    fn prompt(&mut self, text: &str) -> Option<String> {
        self.prompts.push(text.to_string());
        self.prompt_answers.pop_front().flatten()
    }

    fn set_footer_year(&mut self, year: i32) -> bool {
        if !self.has_footer_year {
            return false;
        }
        self.footer_year = Some(year.to_string());
        true
    }
}
