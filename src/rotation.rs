//! Content rotation: the daily challenge and the member spotlight

use rand::Rng;

use crate::catalog::{self, ChallengeEntry, SpotlightEntry};

/// Pick a challenge uniformly at random
pub fn pick_challenge<R: Rng>(rng: &mut R) -> &'static ChallengeEntry {
    &catalog::CHALLENGES[rng.random_range(0..catalog::CHALLENGES.len())]
}

/// Text shown in the answer prompt
pub fn challenge_prompt(challenge: &ChallengeEntry) -> String {
    format!(
        "Daily Challenge:\n\n{}\n\nHint: {}",
        challenge.question, challenge.hint
    )
}

/// Whether `input` answers `challenge`
///
/// Case-insensitive substring match, so "it's physiology!" counts.
pub fn is_correct(challenge: &ChallengeEntry, input: &str) -> bool {
    input
        .to_lowercase()
        .contains(&challenge.answer.to_lowercase())
}

/// Notification produced by grading an answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeOutcome {
    pub correct: bool,
    pub title: String,
    pub message: String,
}

/// Grade a prompt response; a dismissed prompt (`None`) counts as wrong
pub fn grade(challenge: &ChallengeEntry, input: Option<&str>) -> ChallengeOutcome {
    if input.is_some_and(|answer| is_correct(challenge, answer)) {
        ChallengeOutcome {
            correct: true,
            title: "Correct!".to_string(),
            message: format!(
                "Excellent! {} is the right answer. You're Mayor Villa material!",
                challenge.answer
            ),
        }
    } else {
        ChallengeOutcome {
            correct: false,
            title: "Good Try!".to_string(),
            message: format!(
                "The answer was \"{}\". Keep learning and growing!",
                challenge.answer
            ),
        }
    }
}

/// Round-robin over the spotlight catalog
#[derive(Debug, Clone)]
pub struct SpotlightRotation {
    entries: &'static [SpotlightEntry],
    index: usize,
    running: bool,
}

impl Default for SpotlightRotation {
    fn default() -> Self {
        Self::new(catalog::SPOTLIGHTS)
    }
}

impl SpotlightRotation {
    pub fn new(entries: &'static [SpotlightEntry]) -> Self {
        Self {
            entries,
            index: 0,
            running: false,
        }
    }

    /// Mark the rotation as started; false if it already was
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Index of the entry the next tick will show
    pub fn index(&self) -> usize {
        self.index
    }

    /// Return the current entry and advance the cyclic index
    pub fn advance(&mut self) -> Option<&'static SpotlightEntry> {
        let entry = self.entries.get(self.index)?;
        self.index = (self.index + 1) % self.entries.len();
        Some(entry)
    }

    /// Interval tick; hidden pages neither show nor advance
    pub fn tick(&mut self, page_hidden: bool) -> Option<(String, String)> {
        if page_hidden {
            return None;
        }
        self.advance().map(spotlight_notification)
    }
}

/// Title and message for a spotlight entry
pub fn spotlight_notification(entry: &SpotlightEntry) -> (String, String) {
    (
        format!("Member Spotlight: {}", entry.name),
        format!("{}\n\n\"{}\"", entry.achievement, entry.quote),
    )
}
