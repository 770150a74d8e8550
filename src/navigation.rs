//! In-page navigation
//!
//! Anchor links scroll to their target section; while scrolling, the last
//! section whose top (minus a lookahead) has been passed is current and its
//! navigation link is highlighted.

/// A `section[id]` and its document offset
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    /// Offset of the section top from the document top (px)
    pub top: f64,
}

impl SectionBounds {
    pub fn new(id: impl Into<String>, top: f64) -> Self {
        Self { id: id.into(), top }
    }
}

/// Element id referenced by a same-page anchor href
///
/// `"#about"` gives `Some("about")`; a bare `"#"` or a non-fragment href gives `None`.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Id of the current section at `scroll_y`
///
/// Sections are scanned in document order and the last one satisfying
/// `top - lookahead <= scroll_y` wins.
pub fn active_section(sections: &[SectionBounds], scroll_y: f64, lookahead: f64) -> Option<&str> {
    let mut current = None;
    for section in sections {
        if scroll_y >= section.top - lookahead {
            current = Some(section.id.as_str());
        }
    }
    current
}

/// Whether a navigation link with `href` should carry the active class
pub fn link_is_active(href: &str, current: Option<&str>) -> bool {
    match (anchor_target(href), current) {
        (Some(target), Some(current)) => target == current,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<SectionBounds> {
        vec![
            SectionBounds::new("home", 0.0),
            SectionBounds::new("about", 500.0),
            SectionBounds::new("members", 1200.0),
        ]
    }

    #[test]
    fn test_active_section_with_lookahead() {
        assert_eq!(active_section(&sections(), 650.0, 200.0), Some("about"));
    }

    #[test]
    fn test_lookahead_boundary() {
        // 1200 - 200 = 1000 is exactly reached
        assert_eq!(active_section(&sections(), 1000.0, 200.0), Some("members"));
        assert_eq!(active_section(&sections(), 999.0, 200.0), Some("about"));
    }

    #[test]
    fn test_later_section_wins_ties() {
        let overlapping = vec![
            SectionBounds::new("a", 100.0),
            SectionBounds::new("b", 100.0),
        ];
        assert_eq!(active_section(&overlapping, 0.0, 200.0), Some("b"));
    }

    #[test]
    fn test_no_section_passed() {
        let later = vec![SectionBounds::new("far", 900.0)];
        assert_eq!(active_section(&later, 100.0, 200.0), None);
        assert_eq!(active_section(&[], 100.0, 200.0), None);
    }

    #[test]
    fn test_anchor_target() {
        assert_eq!(anchor_target("#about"), Some("about"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("about.html"), None);
    }

    #[test]
    fn test_link_is_active() {
        assert!(link_is_active("#about", Some("about")));
        assert!(!link_is_active("#home", Some("about")));
        // Bare "#" links never light up, even with no current section
        assert!(!link_is_active("#", None));
        assert!(!link_is_active("#about", None));
    }
}
