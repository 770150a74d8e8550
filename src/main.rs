//! Mayor Villa entry point
//!
//! In the browser this wires the page controller to the document and exposes
//! the public JS functions. Natively it runs a short scripted walkthrough
//! against the in-memory view.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

    use mayor_villa::interaction::PointerTransition;
    use mayor_villa::notifier::NotificationId;
    use mayor_villa::platform::web::{NOTIFICATION_ID_ATTR, REVEAL_KEY_ATTR, js_error};
    use mayor_villa::platform::{
        DomView, GLOBAL_NAMESPACE, INIT_MEMBER_SPOTLIGHT, SHOW_DAILY_CHALLENGE, SHOW_NOTIFICATION,
        timer_delay,
    };
    use mayor_villa::reveal::IntersectionSample;
    use mayor_villa::{Page, PageEvent, PageResult, Schedule, Settings};

    /// Page controller plus the document it drives
    struct App {
        page: Page,
        view: DomView,
    }

    impl App {
        fn handle(&mut self, event: PageEvent) -> Vec<Schedule> {
            self.page.handle(event, &mut self.view)
        }
    }

    thread_local! {
        static APP: RefCell<Option<Rc<RefCell<App>>>> = const { RefCell::new(None) };
    }

    fn current_app() -> Option<Rc<RefCell<App>>> {
        let app = APP.with(|slot| slot.borrow().clone());
        if app.is_none() {
            log::warn!("Page not initialised yet");
        }
        app
    }

    /// Feed one event to the page, then arm whatever it scheduled
    fn dispatch(app: &Rc<RefCell<App>>, event: PageEvent) {
        let schedules = app.borrow_mut().handle(event);
        arm(app, schedules);
    }

    fn arm(app: &Rc<RefCell<App>>, schedules: Vec<Schedule>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        for schedule in schedules {
            match schedule {
                Schedule::Once { delay_ms, timer } => {
                    let app = app.clone();
                    let closure = Closure::once(move || dispatch(&app, PageEvent::Timer(timer)));
                    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                        closure.as_ref().unchecked_ref(),
                        timer_delay(delay_ms),
                    );
                    closure.forget();
                }
                Schedule::Every { period_ms, timer } => {
                    let app = app.clone();
                    let closure = Closure::<dyn FnMut()>::new(move || {
                        dispatch(&app, PageEvent::Timer(timer))
                    });
                    let _ = window.set_interval_with_callback_and_timeout_and_arguments_0(
                        closure.as_ref().unchecked_ref(),
                        timer_delay(period_ms),
                    );
                    closure.forget();
                }
            }
        }
    }

    pub fn run() -> PageResult<()> {
        log::info!("Mayor Villa starting...");

        let settings = Settings::load();
        let view = DomView::new(&settings)?;
        let seed = js_sys::Date::now() as u64;
        let page = Page::new(settings, view.animated().len(), seed);
        let app = Rc::new(RefCell::new(App { page, view }));
        APP.with(|slot| *slot.borrow_mut() = Some(app.clone()));

        let year = js_sys::Date::new_0().get_full_year() as i32;
        let schedules = {
            let mut guard = app.borrow_mut();
            let App { page, view } = &mut *guard;
            page.ready(view, year)
        };
        arm(&app, schedules);

        setup_reveal_observer(&app)?;
        setup_card_handlers(&app);
        setup_feature_handlers(&app);
        setup_anchor_handlers(&app);
        setup_scroll_handler(&app)?;
        setup_notification_close(&app)?;
        install_globals(app.borrow().view.window())?;

        log::info!("Mayor Villa ready");
        Ok(())
    }

    fn setup_reveal_observer(app: &Rc<RefCell<App>>) -> PageResult<()> {
        let (animated, threshold, root_margin) = {
            let a = app.borrow();
            let settings = a.page.settings();
            (
                a.view.animated().to_vec(),
                settings.reveal_threshold,
                settings.reveal_root_margin.clone(),
            )
        };
        if animated.is_empty() {
            return Ok(());
        }

        let app = app.clone();
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                let samples: Vec<IntersectionSample> = entries
                    .iter()
                    .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
                    .filter_map(|entry| {
                        let key = entry.target().get_attribute(REVEAL_KEY_ATTR)?;
                        Some(IntersectionSample {
                            element: key.parse().ok()?,
                            is_intersecting: entry.is_intersecting(),
                        })
                    })
                    .collect();
                dispatch(&app, PageEvent::Intersections(samples));
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        options.set_root_margin(&root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
                .map_err(|e| js_error("creating IntersectionObserver", e))?;
        for element in &animated {
            observer.observe(element);
        }
        callback.forget();
        Ok(())
    }

    fn setup_card_handlers(app: &Rc<RefCell<App>>) {
        let cards = app.borrow().view.cards().to_vec();
        for (card_key, card) in cards.iter().enumerate() {
            for (event_name, transition) in [
                ("mouseenter", PointerTransition::Enter),
                ("mouseleave", PointerTransition::Leave),
            ] {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    dispatch(
                        &app,
                        PageEvent::CardPointer {
                            card: card_key,
                            transition,
                        },
                    );
                });
                let _ = card
                    .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_feature_handlers(app: &Rc<RefCell<App>>) {
        let features = app.borrow().view.features().to_vec();
        for feature in features {
            let app = app.clone();
            let card = feature.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let heading = card
                    .query_selector("h3")
                    .ok()
                    .flatten()
                    .and_then(|h| h.text_content());
                match heading {
                    Some(heading) => dispatch(&app, PageEvent::FeatureClicked { heading }),
                    None => log::warn!("Feature card has no heading"),
                }
            });
            let _ = feature.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_anchor_handlers(app: &Rc<RefCell<App>>) {
        let anchors = app.borrow().view.anchors().to_vec();
        for anchor in anchors {
            let app = app.clone();
            let link = anchor.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
                event.prevent_default();
                if let Some(href) = link.get_attribute("href") {
                    dispatch(&app, PageEvent::AnchorClicked { href });
                }
            });
            let _ = anchor.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_scroll_handler(app: &Rc<RefCell<App>>) -> PageResult<()> {
        let window = app.borrow().view.window().clone();
        let app = app.clone();
        let scroll_window = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let scroll_y = scroll_window.scroll_y().unwrap_or(0.0);
            dispatch(&app, PageEvent::Scrolled { scroll_y });
        });
        window
            .add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())
            .map_err(|e| js_error("listening for scroll", e))?;
        closure.forget();
        Ok(())
    }

    /// Close buttons are created per notification, so listen once on the document
    fn setup_notification_close(app: &Rc<RefCell<App>>) -> PageResult<()> {
        let document = app.borrow().view.document().clone();
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::MouseEvent| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            if target.closest(".notification-close").ok().flatten().is_none() {
                return;
            }
            let id = target
                .closest(".notification")
                .ok()
                .flatten()
                .and_then(|n| n.get_attribute(NOTIFICATION_ID_ATTR))
                .and_then(|id| id.parse().ok());
            if let Some(id) = id {
                dispatch(&app, PageEvent::NotificationClosed(NotificationId(id)));
            }
        });
        document
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .map_err(|e| js_error("listening for notification close", e))?;
        closure.forget();
        Ok(())
    }

    /// Make the public functions reachable from markup handlers and the console
    fn install_globals(window: &web_sys::Window) -> PageResult<()> {
        let functions = [
            (
                SHOW_DAILY_CHALLENGE,
                Closure::<dyn FnMut()>::new(show_daily_challenge).into_js_value(),
            ),
            (
                SHOW_NOTIFICATION,
                Closure::<dyn FnMut(String, String)>::new(show_notification).into_js_value(),
            ),
            (
                INIT_MEMBER_SPOTLIGHT,
                Closure::<dyn FnMut()>::new(init_member_spotlight).into_js_value(),
            ),
        ];

        let namespace = js_sys::Object::new();
        for (name, function) in &functions {
            let key = JsValue::from_str(name);
            js_sys::Reflect::set(&namespace, &key, function)
                .and_then(|_| js_sys::Reflect::set(window, &key, function))
                .map_err(|e| js_error("exporting page functions", e))?;
        }
        js_sys::Reflect::set(window, &JsValue::from_str(GLOBAL_NAMESPACE), &namespace)
            .map_err(|e| js_error("exporting page functions", e))?;

        log::info!("Page functions available as window.{}", GLOBAL_NAMESPACE);
        Ok(())
    }

    /// The prompt blocks, so it runs with the page released
    pub fn show_daily_challenge() {
        let Some(app) = current_app() else {
            return;
        };
        let (challenge, prompt, window) = {
            let mut guard = app.borrow_mut();
            let (challenge, prompt) = guard.page.begin_daily_challenge();
            (challenge, prompt, guard.view.window().clone())
        };

        let answer = window.prompt_with_message(&prompt).ok().flatten();

        let schedules = {
            let mut guard = app.borrow_mut();
            let App { page, view } = &mut *guard;
            page.finish_daily_challenge(challenge, answer.as_deref(), view)
        };
        arm(&app, schedules);
    }

    pub fn show_notification(title: String, message: String) {
        if let Some(app) = current_app() {
            let schedules = {
                let mut guard = app.borrow_mut();
                let App { page, view } = &mut *guard;
                page.show_notification(title, message, view)
            };
            arm(&app, schedules);
        }
    }

    pub fn init_member_spotlight() {
        if let Some(app) = current_app() {
            let schedules = app.borrow_mut().page.start_spotlight();
            arm(&app, schedules);
        }
    }

    /// Run once the DOM is parsed
    pub fn start() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document; page behaviour disabled");
            return;
        };

        if document.ready_state() == "loading" {
            let closure = Closure::once(move |_event: web_sys::Event| report(run()));
            let _ = document.add_event_listener_with_callback(
                "DOMContentLoaded",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        } else {
            report(run());
        }
    }

    fn report(result: PageResult<()>) {
        if let Err(e) = result {
            log::error!("Failed to wire page: {}", e);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_page::start();
}

/// Ask the visitor a random trivia question
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = showDailyChallenge)]
pub fn show_daily_challenge() {
    wasm_page::show_daily_challenge();
}

/// Show a notification with the given title and message
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = showNotification)]
pub fn show_notification(title: String, message: String) {
    wasm_page::show_notification(title, message);
}

/// Start the member spotlight rotation
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = initMemberSpotlight)]
pub fn init_member_spotlight() {
    wasm_page::init_member_spotlight();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Mayor Villa (native) starting...");
    log::info!("The page runs in the browser - build with `trunk serve`; running a headless walkthrough");

    walkthrough();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive the page controller through a visit against the in-memory view
#[cfg(not(target_arch = "wasm32"))]
fn walkthrough() {
    use mayor_villa::platform::RecordingView;
    use mayor_villa::reveal::IntersectionSample;
    use mayor_villa::{Page, PageEvent, Schedule, Settings};

    let mut view = RecordingView::residence_page();
    let mut page = Page::new(Settings::load(), 3, 2026);
    page.ready(&mut view, 2026);

    page.handle(
        PageEvent::Intersections(vec![IntersectionSample {
            element: 0,
            is_intersecting: true,
        }]),
        &mut view,
    );
    page.handle(PageEvent::Scrolled { scroll_y: 650.0 }, &mut view);
    println!("Active links after scrolling: {:?}", view.active_links);

    let mut pending = page.handle(
        PageEvent::FeatureClicked {
            heading: "Community Living".into(),
        },
        &mut view,
    );
    if let Some(n) = view.last_notification() {
        println!("Notification: {} - {}", n.title, n.message);
    }

    // Fire timers in order until the notification has gone
    while let Some(Schedule::Once { delay_ms, timer }) = pending.pop() {
        view.now_ms += delay_ms as f64;
        pending = page.handle(PageEvent::Timer(timer), &mut view);
    }
    println!(
        "Notifications on screen at {} ms: {}",
        view.now_ms,
        view.notification_count()
    );
}
