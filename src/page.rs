//! Page controller
//!
//! Owns every piece of mutable page state and turns `PageEvent`s into view
//! mutations. Timers are never armed here: each call returns the `Schedule`s
//! the host should arm, and the host feeds the resulting `Timer` back in as
//! `PageEvent::Timer` when it fires.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::catalog::ChallengeEntry;
use crate::interaction::{self, PointerTransition};
use crate::navigation;
use crate::notifier::{NotificationId, Notifier};
use crate::platform::{ElementKey, PageView};
use crate::reveal::{IntersectionSample, RevealTracker};
use crate::rotation::{self, SpotlightRotation};
use crate::settings::Settings;

/// Deferred work the host must arm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    /// Start the exit transition of a notification
    AutoDismiss(NotificationId),
    /// Remove a notification after its exit transition
    DetachNotification(NotificationId),
    /// Show the next member spotlight
    SpotlightTick,
}

/// How a timer should be armed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    Once { delay_ms: u32, timer: Timer },
    Every { period_ms: u32, timer: Timer },
}

/// Input to the page controller
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// Pointer entered or left a `.card`
    CardPointer {
        card: ElementKey,
        transition: PointerTransition,
    },
    /// A `.feature` card was clicked; carries its heading text
    FeatureClicked { heading: String },
    /// A same-page anchor was clicked
    AnchorClicked { href: String },
    /// Window scrolled
    Scrolled { scroll_y: f64 },
    /// IntersectionObserver batch for `.animate` elements
    Intersections(Vec<IntersectionSample>),
    /// Close control on a notification was clicked
    NotificationClosed(NotificationId),
    Timer(Timer),
}

/// Interactive state of one page load
#[derive(Debug)]
pub struct Page {
    settings: Settings,
    notifier: Notifier,
    reveal: RevealTracker,
    spotlight: SpotlightRotation,
    rng: Pcg32,
}

impl Page {
    /// Create the page state for `animated_count` observed elements
    pub fn new(settings: Settings, animated_count: usize, seed: u64) -> Self {
        Self {
            settings,
            notifier: Notifier::new(),
            reveal: RevealTracker::new(animated_count),
            spotlight: SpotlightRotation::default(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn reveal(&self) -> &RevealTracker {
        &self.reveal
    }

    pub fn spotlight(&self) -> &SpotlightRotation {
        &self.spotlight
    }

    /// One-time setup once the document is ready
    pub fn ready<V: PageView>(&mut self, view: &mut V, year: i32) -> Vec<Schedule> {
        if !view.set_footer_year(year) {
            log::debug!("No footer year element");
        }

        if self.settings.spotlight_autostart {
            self.start_spotlight()
        } else {
            Vec::new()
        }
    }

    /// Dispatch one event
    pub fn handle<V: PageView>(&mut self, event: PageEvent, view: &mut V) -> Vec<Schedule> {
        match event {
            PageEvent::CardPointer { card, transition } => {
                let transform =
                    interaction::card_transform(transition, self.settings.effective_card_lift_px());
                view.set_card_transform(card, &transform);
                Vec::new()
            }
            PageEvent::FeatureClicked { heading } => {
                let (title, message) = interaction::feature_notification(&heading);
                self.show_notification(title, message, view)
            }
            PageEvent::AnchorClicked { href } => {
                if let Some(target) = navigation::anchor_target(&href) {
                    if !view.scroll_to(target, self.settings.motion.smooth_scroll()) {
                        log::debug!("Anchor target #{} not found", target);
                    }
                }
                Vec::new()
            }
            PageEvent::Scrolled { scroll_y } => {
                let sections = view.section_bounds();
                let current =
                    navigation::active_section(&sections, scroll_y, self.settings.nav_lookahead_px);
                view.set_active_link(current);
                Vec::new()
            }
            PageEvent::Intersections(samples) => {
                for element in self.reveal.observe(&samples) {
                    view.mark_revealed(element);
                }
                Vec::new()
            }
            PageEvent::NotificationClosed(id) => {
                self.notifier.close(id, view);
                Vec::new()
            }
            PageEvent::Timer(timer) => self.on_timer(timer, view),
        }
    }

    fn on_timer<V: PageView>(&mut self, timer: Timer, view: &mut V) -> Vec<Schedule> {
        match timer {
            Timer::AutoDismiss(id) => {
                if self.notifier.begin_dismiss(id, view) {
                    vec![Schedule::Once {
                        delay_ms: self.settings.exit_transition_ms,
                        timer: Timer::DetachNotification(id),
                    }]
                } else {
                    Vec::new()
                }
            }
            Timer::DetachNotification(id) => {
                self.notifier.detach(id, view);
                Vec::new()
            }
            Timer::SpotlightTick => match self.spotlight.tick(view.is_hidden()) {
                Some((title, message)) => self.show_notification(title, message, view),
                None => Vec::new(),
            },
        }
    }

    /// Show a notification and request its auto-dismiss timer
    pub fn show_notification<V: PageView>(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        view: &mut V,
    ) -> Vec<Schedule> {
        let now = view.now_ms();
        let id = self.notifier.show(title, message, now, view);
        vec![Schedule::Once {
            delay_ms: self.settings.notification_duration_ms,
            timer: Timer::AutoDismiss(id),
        }]
    }

    /// Ask a random trivia question and report the result
    pub fn daily_challenge<V: PageView>(&mut self, view: &mut V) -> Vec<Schedule> {
        let (challenge, prompt) = self.begin_daily_challenge();
        let answer = view.prompt(&prompt);
        self.finish_daily_challenge(challenge, answer.as_deref(), view)
    }

    /// Pick the question and build its prompt text
    ///
    /// Split from `finish_daily_challenge` so a host can run the blocking
    /// prompt without holding on to the page.
    pub fn begin_daily_challenge(&mut self) -> (&'static ChallengeEntry, String) {
        let challenge = rotation::pick_challenge(&mut self.rng);
        (challenge, rotation::challenge_prompt(challenge))
    }

    /// Grade the answer and show the result
    pub fn finish_daily_challenge<V: PageView>(
        &mut self,
        challenge: &ChallengeEntry,
        answer: Option<&str>,
        view: &mut V,
    ) -> Vec<Schedule> {
        let outcome = rotation::grade(challenge, answer);
        log::info!("Daily challenge answered, correct: {}", outcome.correct);
        self.show_notification(outcome.title, outcome.message, view)
    }

    /// Start the member spotlight rotation; repeated calls arm nothing
    pub fn start_spotlight(&mut self) -> Vec<Schedule> {
        if !self.spotlight.start() {
            log::debug!("Member spotlight already running");
            return Vec::new();
        }
        log::info!(
            "Member spotlight every {} ms",
            self.settings.spotlight_interval_ms
        );
        vec![Schedule::Every {
            period_ms: self.settings.spotlight_interval_ms,
            timer: Timer::SpotlightTick,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, FEATURE_FALLBACK};
    use crate::notifier::NotifierPhase;
    use crate::platform::RecordingView;
    use crate::settings::MotionPreference;

    fn page() -> Page {
        Page::new(Settings::default(), 4, 12345)
    }

    /// Timers from a list of one-shot schedules, in arming order
    fn once_timers(schedules: &[Schedule]) -> Vec<(u32, Timer)> {
        schedules
            .iter()
            .filter_map(|s| match s {
                Schedule::Once { delay_ms, timer } => Some((*delay_ms, *timer)),
                Schedule::Every { .. } => None,
            })
            .collect()
    }

    /// Fire a timer and keep firing whatever one-shot timers it arms
    fn fire_chain(page: &mut Page, view: &mut RecordingView, timer: Timer) {
        let mut pending = vec![timer];
        while let Some(t) = pending.pop() {
            let next = page.handle(PageEvent::Timer(t), view);
            pending.extend(once_timers(&next).into_iter().map(|(_, t)| t));
        }
    }

    #[test]
    fn test_feature_click_known_title() {
        let mut page = page();
        let mut view = RecordingView::new();
        let schedules = page.handle(
            PageEvent::FeatureClicked {
                heading: "Modern Amenities".into(),
            },
            &mut view,
        );

        let shown = view.last_notification().unwrap();
        assert_eq!(shown.title, "Modern Amenities");
        assert_eq!(shown.message, catalog::FEATURES[3].description);
        assert_eq!(
            once_timers(&schedules),
            vec![(5000, Timer::AutoDismiss(shown.id))]
        );
    }

    #[test]
    fn test_feature_click_fallback_verbatim() {
        let mut page = page();
        let mut view = RecordingView::new();
        for heading in ["Laundry", "academic excellence", ""] {
            page.handle(
                PageEvent::FeatureClicked {
                    heading: heading.into(),
                },
                &mut view,
            );
            assert_eq!(view.last_notification().unwrap().message, FEATURE_FALLBACK);
        }
    }

    #[test]
    fn test_notification_lifecycle() {
        let mut page = page();
        let mut view = RecordingView::new();
        view.now_ms = 1234.0;

        let schedules = page.show_notification("Hello", "world", &mut view);
        let id = view.last_notification().unwrap().id;
        assert_eq!(view.last_notification().unwrap().created_at_ms, 1234.0);

        let (_, dismiss) = once_timers(&schedules)[0];
        let next = page.handle(PageEvent::Timer(dismiss), &mut view);
        assert_eq!(page.notifier().phase(), NotifierPhase::AnimatingOut);
        assert_eq!(
            once_timers(&next),
            vec![(300, Timer::DetachNotification(id))]
        );

        page.handle(PageEvent::Timer(Timer::DetachNotification(id)), &mut view);
        assert_eq!(view.notification_count(), 0);
        assert_eq!(page.notifier().phase(), NotifierPhase::Idle);
    }

    #[test]
    fn test_replacement_with_stale_timers() {
        let mut page = page();
        let mut view = RecordingView::new();

        let first = once_timers(&page.show_notification("First", "a", &mut view))[0].1;
        let second = once_timers(&page.show_notification("Second", "b", &mut view))[0].1;
        assert_eq!(view.notification_count(), 1);

        // The first notification's timer fires after it was replaced
        fire_chain(&mut page, &mut view, first);
        assert_eq!(view.notification_count(), 1);
        assert_eq!(view.last_notification().unwrap().title, "Second");

        fire_chain(&mut page, &mut view, second);
        assert_eq!(view.notification_count(), 0);
    }

    #[test]
    fn test_close_then_timer_is_safe() {
        let mut page = page();
        let mut view = RecordingView::new();
        let dismiss = once_timers(&page.show_notification("Hi", "x", &mut view))[0].1;
        let id = view.last_notification().unwrap().id;

        page.handle(PageEvent::NotificationClosed(id), &mut view);
        assert_eq!(view.notification_count(), 0);

        fire_chain(&mut page, &mut view, dismiss);
        page.handle(PageEvent::NotificationClosed(id), &mut view);
        assert_eq!(view.unmounts, 1);
    }

    #[test]
    fn test_scroll_highlights_current_section() {
        let mut page = page();
        let mut view = RecordingView::residence_page();

        page.handle(PageEvent::Scrolled { scroll_y: 650.0 }, &mut view);
        assert_eq!(view.active_links, vec!["#about".to_string()]);

        page.handle(PageEvent::Scrolled { scroll_y: 1100.0 }, &mut view);
        assert_eq!(view.active_links, vec!["#members".to_string()]);
    }

    #[test]
    fn test_scroll_before_first_section_clears_active() {
        let mut page = page();
        let mut view = RecordingView::residence_page();
        view.sections = vec![navigation::SectionBounds::new("about", 800.0)];

        page.handle(PageEvent::Scrolled { scroll_y: 900.0 }, &mut view);
        assert_eq!(view.active_links, vec!["#about".to_string()]);
        page.handle(PageEvent::Scrolled { scroll_y: 0.0 }, &mut view);
        assert!(view.active_links.is_empty());
    }

    #[test]
    fn test_reveal_stays_marked() {
        let mut page = page();
        let mut view = RecordingView::new();
        let hit = |element, is_intersecting| IntersectionSample {
            element,
            is_intersecting,
        };

        page.handle(PageEvent::Intersections(vec![hit(1, true)]), &mut view);
        page.handle(PageEvent::Intersections(vec![hit(1, false)]), &mut view);
        page.handle(PageEvent::Intersections(vec![hit(1, true)]), &mut view);

        assert!(view.revealed.contains(&1));
        assert!(page.reveal().is_revealed(1));
        assert_eq!(view.reveal_writes, 1);
    }

    #[test]
    fn test_card_hover() {
        let mut page = page();
        let mut view = RecordingView::new();
        page.handle(
            PageEvent::CardPointer {
                card: 2,
                transition: PointerTransition::Enter,
            },
            &mut view,
        );
        assert_eq!(view.card_transforms[&2], "translateY(-8px)");
        page.handle(
            PageEvent::CardPointer {
                card: 2,
                transition: PointerTransition::Leave,
            },
            &mut view,
        );
        assert_eq!(view.card_transforms[&2], "translateY(0)");
    }

    #[test]
    fn test_reduced_motion() {
        let settings = Settings {
            motion: MotionPreference::Reduced,
            ..Settings::default()
        };
        let mut page = Page::new(settings, 0, 1);
        let mut view = RecordingView::residence_page();

        page.handle(
            PageEvent::CardPointer {
                card: 0,
                transition: PointerTransition::Enter,
            },
            &mut view,
        );
        assert_eq!(view.card_transforms[&0], "translateY(0)");

        page.handle(
            PageEvent::AnchorClicked {
                href: "#members".into(),
            },
            &mut view,
        );
        assert_eq!(view.scrolls, vec![("members".to_string(), false)]);
    }

    #[test]
    fn test_anchor_clicks() {
        let mut page = page();
        let mut view = RecordingView::residence_page();

        for href in ["#about", "#", "#missing"] {
            page.handle(PageEvent::AnchorClicked { href: href.into() }, &mut view);
        }
        assert_eq!(view.scrolls, vec![("about".to_string(), true)]);
    }

    #[test]
    fn test_spotlight_rotation() {
        let mut page = page();
        let mut view = RecordingView::new();

        assert_eq!(
            page.start_spotlight(),
            vec![Schedule::Every {
                period_ms: 30_000,
                timer: Timer::SpotlightTick,
            }]
        );
        assert!(page.start_spotlight().is_empty());

        let mut titles = Vec::new();
        for _ in 0..4 {
            page.handle(PageEvent::Timer(Timer::SpotlightTick), &mut view);
            titles.push(view.last_notification().unwrap().title.clone());
        }
        assert_eq!(
            titles,
            vec![
                "Member Spotlight: Adeola",
                "Member Spotlight: Ife",
                "Member Spotlight: Adeola",
                "Member Spotlight: Ife",
            ]
        );
    }

    #[test]
    fn test_spotlight_skips_hidden_page() {
        let mut page = page();
        let mut view = RecordingView::new();
        view.hidden = true;

        assert!(
            page.handle(PageEvent::Timer(Timer::SpotlightTick), &mut view)
                .is_empty()
        );
        assert_eq!(view.notification_count(), 0);

        view.hidden = false;
        page.handle(PageEvent::Timer(Timer::SpotlightTick), &mut view);
        assert_eq!(
            view.last_notification().unwrap().title,
            "Member Spotlight: Adeola"
        );
    }

    #[test]
    fn test_daily_challenge_any_case() {
        // First run with a dismissed prompt to learn which question the seed asks
        let mut first = page();
        let mut view = RecordingView::new();
        first.daily_challenge(&mut view);
        assert_eq!(view.last_notification().unwrap().title, "Good Try!");
        let challenge = catalog::CHALLENGES
            .iter()
            .find(|c| view.prompts[0].contains(c.question))
            .unwrap();

        // Same seed asks the same question; answer it in lower case
        let mut page = page();
        let mut view = RecordingView::new();
        view.prompt_answers
            .push_back(Some(challenge.answer.to_lowercase()));
        page.daily_challenge(&mut view);
        let shown = view.last_notification().unwrap();
        assert_eq!(shown.title, "Correct!");
        assert_eq!(
            shown.message,
            format!(
                "Excellent! {} is the right answer. You're Mayor Villa material!",
                challenge.answer
            )
        );
    }

    #[test]
    fn test_split_daily_challenge_matches_single_call() {
        let mut whole = page();
        let mut view = RecordingView::new();
        view.prompt_answers.push_back(Some("community".into()));
        whole.daily_challenge(&mut view);

        // Same seed, prompt answered outside the page
        let mut split = page();
        let (challenge, prompt) = split.begin_daily_challenge();
        assert_eq!(prompt, view.prompts[0]);
        assert_eq!(split.notifier().phase(), NotifierPhase::Idle);

        let mut split_view = RecordingView::new();
        let schedules = split.finish_daily_challenge(challenge, Some("community"), &mut split_view);
        assert_eq!(schedules.len(), 1);
        assert_eq!(
            split_view.last_notification().map(|n| (&n.title, &n.message)),
            view.last_notification().map(|n| (&n.title, &n.message))
        );
    }

    #[test]
    fn test_daily_challenge_correct_answer() {
        let mut page = page();
        let mut view = RecordingView::new();
        view.prompt_answers
            .push_back(Some("physiology, mass communication or community".into()));

        page.daily_challenge(&mut view);
        let shown = view.last_notification().unwrap();
        assert_eq!(shown.title, "Correct!");
        assert!(shown.message.ends_with("You're Mayor Villa material!"));
        assert!(view.prompts[0].starts_with("Daily Challenge:\n\n"));
    }

    #[test]
    fn test_ready_sets_year_and_autostart() {
        let mut view = RecordingView::residence_page();
        let mut page = page();
        assert!(page.ready(&mut view, 2026).is_empty());
        assert_eq!(view.footer_year.as_deref(), Some("2026"));

        let settings = Settings {
            spotlight_autostart: true,
            ..Settings::default()
        };
        let mut page = Page::new(settings, 0, 1);
        let mut view = RecordingView::new();
        assert_eq!(page.ready(&mut view, 2026).len(), 1);
        assert!(page.spotlight().is_running());
        assert_eq!(view.footer_year, None);
    }
}
