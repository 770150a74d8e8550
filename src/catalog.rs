//! Static page content
//!
//! Literal catalogs consulted by the feature cards, the daily challenge and
//! the member spotlight. Nothing here is mutated after definition.

/// A feature card description, keyed by the card heading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureEntry {
    pub title: &'static str,
    pub description: &'static str,
}

/// A trivia question for the daily challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChallengeEntry {
    pub question: &'static str,
    pub answer: &'static str,
    pub hint: &'static str,
}

/// A resident highlighted by the spotlight rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpotlightEntry {
    pub name: &'static str,
    pub achievement: &'static str,
    pub quote: &'static str,
}

/// Message shown for feature cards with no catalog entry
pub const FEATURE_FALLBACK: &str = "Learn more about this feature by contacting our team.";

pub const FEATURES: &[FeatureEntry] = &[
    FeatureEntry {
        title: "Academic Excellence",
        description: "Our residents maintain high academic standards while fostering a collaborative learning environment.",
    },
    FeatureEntry {
        title: "Community Living",
        description: "Experience the perfect balance of privacy and community in our thoughtfully designed spaces.",
    },
    FeatureEntry {
        title: "Professional Development",
        description: "Access to mentorship programs, workshops, and networking opportunities.",
    },
    FeatureEntry {
        title: "Modern Amenities",
        description: "State-of-the-art facilities including study areas, recreational spaces, and high-speed internet.",
    },
];

pub const CHALLENGES: &[ChallengeEntry] = &[
    ChallengeEntry {
        question: "What academic discipline studies the functions and mechanisms of living organisms?",
        answer: "Physiology",
        hint: "Perfect for Adeola's field of study!",
    },
    ChallengeEntry {
        question: "What field focuses on the study of mass media and its impact on society?",
        answer: "Mass Communication",
        hint: "Right up Ife's alley!",
    },
    ChallengeEntry {
        question: "What makes a hostel more than just accommodation?",
        answer: "Community",
        hint: "The Mayor Villa difference!",
    },
];

pub const SPOTLIGHTS: &[SpotlightEntry] = &[
    SpotlightEntry {
        name: "Adeola",
        achievement: "Dean's List for Academic Excellence in Physiology",
        quote: "Understanding life at the cellular level helps me appreciate our community even more.",
    },
    SpotlightEntry {
        name: "Ife",
        achievement: "Outstanding Media Project on Community Stories",
        quote: "Every housemate has a story worth telling and sharing with the world.",
    },
];

/// Find a feature by its exact heading text
pub fn find_feature(title: &str) -> Option<&'static FeatureEntry> {
    FEATURES.iter().find(|f| f.title == title)
}

/// Description for a feature heading, or the generic fallback
pub fn feature_message(title: &str) -> &'static str {
    find_feature(title)
        .map(|f| f.description)
        .unwrap_or(FEATURE_FALLBACK)
}
