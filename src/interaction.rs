//! Card hover and feature click behaviour

use crate::catalog;

/// Pointer crossing a card boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTransition {
    Enter,
    Leave,
}

/// Inline transform for a card after a pointer transition
pub fn card_transform(transition: PointerTransition, lift_px: f64) -> String {
    match transition {
        PointerTransition::Enter if lift_px > 0.0 => format!("translateY(-{}px)", lift_px),
        _ => "translateY(0)".to_string(),
    }
}

/// Title and message shown when a feature card is clicked
///
/// The heading is trimmed before lookup; unknown headings get the fallback text.
pub fn feature_notification(heading: &str) -> (String, &'static str) {
    let title = heading.trim();
    (title.to_string(), catalog::feature_message(title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FEATURE_FALLBACK;

    #[test]
    fn test_card_lift() {
        assert_eq!(card_transform(PointerTransition::Enter, 8.0), "translateY(-8px)");
        assert_eq!(card_transform(PointerTransition::Leave, 8.0), "translateY(0)");
    }

    #[test]
    fn test_no_lift_when_disabled() {
        assert_eq!(card_transform(PointerTransition::Enter, 0.0), "translateY(0)");
    }

    #[test]
    fn test_feature_click_known_and_unknown() {
        let (title, message) = feature_notification("  Academic Excellence\n");
        assert_eq!(title, "Academic Excellence");
        assert!(message.starts_with("Our residents maintain"));

        let (title, message) = feature_notification("Rooftop Garden");
        assert_eq!(title, "Rooftop Garden");
        assert_eq!(message, FEATURE_FALLBACK);
    }
}
