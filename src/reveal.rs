//! Scroll-triggered reveal tracking
//!
//! Elements start hidden and are marked visible the first time they are
//! reported intersecting the (bottom-shrunk) viewport. Marks are permanent.

use crate::platform::ElementKey;

/// One intersection observation for an observed element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionSample {
    pub element: ElementKey,
    pub is_intersecting: bool,
}

/// Per-element reveal state
#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    revealed: Vec<bool>,
}

impl RevealTracker {
    /// Track `count` elements, all unrevealed
    pub fn new(count: usize) -> Self {
        Self {
            revealed: vec![false; count],
        }
    }

    pub fn is_revealed(&self, element: ElementKey) -> bool {
        self.revealed.get(element).copied().unwrap_or(false)
    }

    /// Apply a batch of samples, returning elements revealed by this batch
    ///
    /// Unknown keys and non-intersecting samples are ignored.
    pub fn observe(&mut self, samples: &[IntersectionSample]) -> Vec<ElementKey> {
        let mut newly = Vec::new();
        for sample in samples {
            if !sample.is_intersecting {
                continue;
            }
            if let Some(slot) = self.revealed.get_mut(sample.element) {
                if !*slot {
                    *slot = true;
                    newly.push(sample.element);
                }
            }
        }
        newly
    }
}
