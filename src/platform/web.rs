//! Browser view over `web-sys`
//!
//! Collects the page's interactive elements once at startup and applies the
//! controller's mutations to them. Per-call DOM failures are logged and
//! otherwise ignored; only construction can fail.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
    VisibilityState, Window,
};

use super::{ElementKey, NotificationView, PageView};
use crate::consts::{ACTIVE_CLASS, VISIBLE_CLASS};
use crate::error::{PageError, PageResult};
use crate::navigation::{self, SectionBounds};
use crate::notifier::{Notification, NotificationId};
use crate::settings::Settings;

/// Attribute mapping an observed element back to its `ElementKey`
pub const REVEAL_KEY_ATTR: &str = "data-reveal-key";
/// Attribute carrying the notification id on the notification root
pub const NOTIFICATION_ID_ATTR: &str = "data-notification-id";

const KEYFRAMES_ID: &str = "mayor-villa-keyframes";
const KEYFRAMES: &str = "
@keyframes slideIn {
    from { transform: translateX(100%); opacity: 0; }
    to { transform: translateX(0); opacity: 1; }
}";

const NOTIFICATION_STYLE: &str = "position: fixed; top: 20px; right: 20px; background: white; \
     border-radius: 12px; box-shadow: 0 8px 32px rgba(0,0,0,0.15); z-index: 10000; \
     max-width: 400px; animation: slideIn 0.3s ease;";
const CONTENT_STYLE: &str = "padding: 1.5rem; position: relative;";
const MESSAGE_STYLE: &str = "white-space: pre-line;";
const CLOSE_STYLE: &str = "position: absolute; top: 10px; right: 10px; background: none; \
     border: none; font-size: 1.2rem; cursor: pointer; color: #666; padding: 5px;";

/// Convert a JS exception into a `PageError`
pub fn js_error(context: &str, err: JsValue) -> PageError {
    let message = err
        .as_string()
        .or_else(|| {
            err.dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", err));
    PageError::dom(context, message)
}

/// Every element matching `selector`, in document order
pub fn query_all<T: JsCast>(document: &Document, selector: &str) -> PageResult<Vec<T>> {
    let list = document
        .query_selector_all(selector)
        .map_err(|e| js_error(selector, e))?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect())
}

/// The live page document
pub struct DomView {
    window: Window,
    document: Document,
    cards: Vec<HtmlElement>,
    features: Vec<Element>,
    animated: Vec<Element>,
    anchors: Vec<Element>,
    sections: Vec<HtmlElement>,
    nav_links: Vec<Element>,
    exit_animation: String,
}

impl DomView {
    pub fn new(settings: &Settings) -> PageResult<Self> {
        let window = web_sys::window().ok_or(PageError::MissingWindow)?;
        let document = window.document().ok_or(PageError::MissingDocument)?;

        let animated: Vec<Element> = query_all(&document, ".animate")?;
        for (key, element) in animated.iter().enumerate() {
            element
                .set_attribute(REVEAL_KEY_ATTR, &key.to_string())
                .map_err(|e| js_error("tagging animated element", e))?;
        }

        let view = Self {
            cards: query_all(&document, ".card")?,
            features: query_all(&document, ".feature")?,
            anchors: query_all(&document, "a[href^=\"#\"]")?,
            sections: query_all(&document, "section[id]")?,
            nav_links: query_all(&document, ".main-nav a")?,
            animated,
            exit_animation: format!(
                "slideIn {}s ease reverse",
                settings.exit_transition_ms as f64 / 1000.0
            ),
            window,
            document,
        };

        log::info!(
            "Page wired: {} cards, {} features, {} animated, {} sections",
            view.cards.len(),
            view.features.len(),
            view.animated.len(),
            view.sections.len()
        );
        Ok(view)
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn cards(&self) -> &[HtmlElement] {
        &self.cards
    }

    pub fn features(&self) -> &[Element] {
        &self.features
    }

    pub fn animated(&self) -> &[Element] {
        &self.animated
    }

    pub fn anchors(&self) -> &[Element] {
        &self.anchors
    }

    fn find_notification(&self, id: NotificationId) -> Option<Element> {
        let selector = format!(".notification[{}=\"{}\"]", NOTIFICATION_ID_ATTR, id.0);
        self.document.query_selector(&selector).ok().flatten()
    }

    fn build_notification(&self, notification: &Notification) -> Result<Element, JsValue> {
        let root = self.document.create_element("div")?;
        root.set_class_name("notification");
        root.set_attribute(NOTIFICATION_ID_ATTR, &notification.id.0.to_string())?;
        root.set_attribute("style", NOTIFICATION_STYLE)?;

        let content = self.document.create_element("div")?;
        content.set_class_name("notification-content");
        content.set_attribute("style", CONTENT_STYLE)?;

        let title = self.document.create_element("h4")?;
        title.set_text_content(Some(&notification.title));

        let message = self.document.create_element("p")?;
        message.set_text_content(Some(&notification.message));
        message.set_attribute("style", MESSAGE_STYLE)?;

        let close = self.document.create_element("button")?;
        close.set_class_name("notification-close");
        close.set_attribute("style", CLOSE_STYLE)?;
        close.set_attribute("aria-label", "Close")?;
        let icon = self.document.create_element("i")?;
        icon.set_class_name("fas fa-times");
        close.append_child(&icon)?;

        content.append_child(&title)?;
        content.append_child(&message)?;
        content.append_child(&close)?;
        root.append_child(&content)?;
        Ok(root)
    }
}

impl NotificationView for DomView {
    fn install_keyframes(&mut self) {
        if self.document.get_element_by_id(KEYFRAMES_ID).is_some() {
            return;
        }
        let result = self.document.create_element("style").and_then(|style| {
            style.set_id(KEYFRAMES_ID);
            style.set_text_content(Some(KEYFRAMES));
            match self.document.head() {
                Some(head) => head.append_child(&style),
                None => self.document.append_child(&style),
            }
        });
        if let Err(e) = result {
            log::warn!("{}", js_error("installing keyframes", e));
        }
    }

    fn mount_notification(&mut self, notification: &Notification) {
        let Some(body) = self.document.body() else {
            log::warn!("No body to attach notification to");
            return;
        };
        let result = self
            .build_notification(notification)
            .and_then(|node| body.append_child(&node));
        if let Err(e) = result {
            log::warn!("{}", js_error("mounting notification", e));
        }
    }

    fn start_notification_exit(&mut self, id: NotificationId) {
        let Some(element) = self.find_notification(id) else {
            return;
        };
        if let Some(html) = element.dyn_ref::<HtmlElement>() {
            let _ = html.style().set_property("animation", &self.exit_animation);
        }
    }

    fn unmount_notification(&mut self, id: NotificationId) {
        if let Some(element) = self.find_notification(id) {
            element.remove();
        }
    }
}

impl PageView for DomView {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    fn is_hidden(&self) -> bool {
        self.document.visibility_state() == VisibilityState::Hidden
    }

    fn set_card_transform(&mut self, card: ElementKey, transform: &str) {
        if let Some(card) = self.cards.get(card) {
            let _ = card.style().set_property("transform", transform);
        }
    }

    fn mark_revealed(&mut self, element: ElementKey) {
        if let Some(element) = self.animated.get(element) {
            let _ = element.class_list().add_1(VISIBLE_CLASS);
        }
    }

    fn scroll_to(&mut self, target_id: &str, smooth: bool) -> bool {
        let Some(target) = self.document.get_element_by_id(target_id) else {
            return false;
        };
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(if smooth {
            ScrollBehavior::Smooth
        } else {
            ScrollBehavior::Auto
        });
        options.set_block(ScrollLogicalPosition::Start);
        target.scroll_into_view_with_scroll_into_view_options(&options);
        true
    }

    fn section_bounds(&self) -> Vec<SectionBounds> {
        self.sections
            .iter()
            .map(|section| SectionBounds::new(section.id(), section.offset_top() as f64))
            .collect()
    }

    fn set_active_link(&mut self, current: Option<&str>) {
        for link in &self.nav_links {
            let classes = link.class_list();
            let _ = classes.remove_1(ACTIVE_CLASS);
            let href = link.get_attribute("href").unwrap_or_default();
            if navigation::link_is_active(&href, current) {
                let _ = classes.add_1(ACTIVE_CLASS);
            }
        }
    }

    fn prompt(&mut self, text: &str) -> Option<String> {
        self.window.prompt_with_message(text).ok().flatten()
    }

    fn set_footer_year(&mut self, year: i32) -> bool {
        match self.document.get_element_by_id("currentYear") {
            Some(element) => {
                element.set_text_content(Some(&year.to_string()));
                true
            }
            None => false,
        }
    }
}
