//! Valentine Invite entry point
//!
//! On the web this mounts the landing or invite view into `#app` and wires up
//! the click handlers. The native binary just logs a sample layout.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, MouseEvent, Window};

    use valentine_invite::audio::BackgroundMusic;
    use valentine_invite::scene::{ClickOutcome, EvasiveButton, LayoutProvider, place_decorations};
    use valentine_invite::{Route, Settings};

    /// Element the views are mounted into
    const ROOT_ID: &str = "app";

    type Listener = Closure<dyn FnMut(MouseEvent)>;

    /// The card around the buttons, measured on every click
    struct CardLayout<'a>(&'a HtmlElement);

    impl LayoutProvider for CardLayout<'_> {
        fn container_size(&self) -> Option<Vec2> {
            if !self.0.is_connected() {
                return None;
            }
            Some(Vec2::new(
                self.0.offset_width() as f32,
                self.0.offset_height() as f32,
            ))
        }
    }

    /// DOM handles and button state of a mounted landing view
    struct LandingView {
        button: EvasiveButton,
        card: HtmlElement,
        no_btn: HtmlElement,
        message: HtmlElement,
    }

    impl LandingView {
        /// Reflect a click outcome in the DOM
        fn apply(&self, outcome: ClickOutcome) -> Result<(), JsValue> {
            match outcome {
                ClickOutcome::Moved(pos) => {
                    // Offsets are relative to the card, the element `CardLayout` measures
                    let style = self.no_btn.style();
                    style.set_property("position", "absolute")?;
                    style.set_property("left", &format!("{}px", pos.x))?;
                    style.set_property("top", &format!("{}px", pos.y))?;
                    style.set_property("transition", "all 0.1s ease-in-out")?;
                }
                ClickOutcome::Surrendered => self.no_btn.remove(),
                ClickOutcome::Taunted | ClickOutcome::Ignored => {}
            }
            let message = self.button.message();
            self.message.set_text_content(Some(message));
            self.message.set_hidden(message.is_empty());
            Ok(())
        }
    }

    /// Page-lifetime state
    struct App {
        settings: Settings,
        rng: Pcg32,
        music: BackgroundMusic,
        landing: Option<LandingView>,
        /// Handlers of the mounted view
        listeners: Vec<Listener>,
        /// Handlers of the previous view; one of them may be running the navigation
        retired: Vec<Listener>,
    }

    impl App {
        fn new(settings: Settings, seed: u64) -> Self {
            let music = match &settings.music_src {
                Some(src) => BackgroundMusic::new(src, settings.effective_music_volume()),
                None => BackgroundMusic::disabled(),
            };
            Self {
                settings,
                rng: Pcg32::seed_from_u64(seed),
                music,
                landing: None,
                listeners: Vec::new(),
                retired: Vec::new(),
            }
        }
    }

    fn window() -> Result<Window, JsValue> {
        web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
    }

    /// Browser entropy, or the clock if that is unavailable
    fn entropy_seed() -> u64 {
        let mut buf = [0u8; 8];
        match getrandom::fill(&mut buf) {
            Ok(()) => u64::from_le_bytes(buf),
            Err(e) => {
                log::warn!("getrandom failed ({}), seeding from clock", e);
                js_sys::Date::now() as u64
            }
        }
    }

    fn viewport_size(window: &Window) -> Result<Vec2, JsValue> {
        let width = window.inner_width()?.as_f64().unwrap_or(0.0);
        let height = window.inner_height()?.as_f64().unwrap_or(0.0);
        Ok(Vec2::new(width as f32, height as f32))
    }

    fn element(document: &Document, tag: &str, class: &str, text: &str) -> Result<HtmlElement, JsValue> {
        let el: HtmlElement = document.create_element(tag)?.dyn_into()?;
        el.set_class_name(class);
        if !text.is_empty() {
            el.set_text_content(Some(text));
        }
        Ok(el)
    }

    fn listen(
        target: &HtmlElement,
        listeners: &mut Vec<Listener>,
        handler: impl FnMut(MouseEvent) + 'static,
    ) -> Result<(), JsValue> {
        let listener = Listener::new(handler);
        target.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())?;
        listeners.push(listener);
        Ok(())
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Valentine Invite starting...");

        let settings = Settings::load();
        let seed = entropy_seed();
        let app = Rc::new(RefCell::new(App::new(settings, seed)));
        log::debug!("Layout seed: {}", seed);

        // Try right away; most browsers wait for the first click
        app.borrow().music.resume();

        // Back/forward re-mounts from the current path
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if let Err(e) = mount(&app, current_route()) {
                    log::error!("Failed to mount view: {:?}", e);
                }
            });
            window()?.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        mount(&app, current_route())?;
        log::info!("Valentine Invite running!");
        Ok(())
    }

    fn current_route() -> Route {
        let path = web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_default();
        Route::from_path(&path)
    }

    fn navigate(app: &Rc<RefCell<App>>, route: Route) -> Result<(), JsValue> {
        window()?
            .history()?
            .push_state_with_url(&JsValue::NULL, "", Some(route.path()))?;
        log::info!("Navigating to {}", route.path());
        mount(app, route)
    }

    /// Replace whatever is in `#app` with a fresh view for `route`
    fn mount(app: &Rc<RefCell<App>>, route: Route) -> Result<(), JsValue> {
        let window = window()?;
        let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
        let root = document
            .get_element_by_id(ROOT_ID)
            .ok_or_else(|| JsValue::from_str("missing #app element"))?;

        let mut guard = app.borrow_mut();
        let state = &mut *guard;
        state.retired = std::mem::take(&mut state.listeners);
        state.landing = None;
        root.set_inner_html("");

        let page = element(&document, "div", "page-container", "")?;
        root.append_child(&page)?;

        let decorations = element(&document, "div", "decorations", "")?;
        page.append_child(&decorations)?;
        let viewport = viewport_size(&window)?;
        let placed = place_decorations(
            viewport.x,
            viewport.y,
            &state.settings.decorations,
            &mut state.rng,
        );
        for deco in &placed {
            let span = element(&document, "span", &deco.category, &deco.glyph)?;
            span.set_attribute("data-key", &deco.id)?;
            let style = span.style();
            style.set_property("position", "absolute")?;
            style.set_property("left", &format!("{}px", deco.pos.x))?;
            style.set_property("top", &format!("{}px", deco.pos.y))?;
            style.set_property("font-size", &format!("{}px", deco.size))?;
            decorations.append_child(&span)?;
        }

        let card = element(&document, "div", "card", "")?;
        page.append_child(&card)?;

        match route {
            Route::Landing => mount_landing(app, state, &document, card)?,
            Route::Invite => mount_invite(state, &window, &document, &card)?,
        }

        log::info!(
            "Mounted {:?} view ({} decorations in {}x{})",
            route,
            placed.len(),
            viewport.x,
            viewport.y
        );
        Ok(())
    }

    fn mount_landing(
        app: &Rc<RefCell<App>>,
        state: &mut App,
        document: &Document,
        card: HtmlElement,
    ) -> Result<(), JsValue> {
        let settings = &state.settings;
        card.append_child(&element(document, "h1", "title", &settings.title)?)?;
        card.append_child(&element(document, "h2", "subtitle", &settings.subtitle)?)?;

        let buttons = element(document, "div", "button-container", "")?;
        card.append_child(&buttons)?;

        let yes_btn = element(document, "button", "btn yes-btn", &settings.yes_label)?;
        buttons.append_child(&yes_btn)?;

        // Sits in the row until the first dodge pins it to the card
        let no_btn = element(document, "button", "btn no-btn", &settings.no_label)?;
        buttons.append_child(&no_btn)?;

        let message = element(document, "div", "message", "")?;
        message.set_hidden(true);
        card.append_child(&message)?;

        {
            let app = app.clone();
            listen(&yes_btn, &mut state.listeners, move |_event| {
                app.borrow().music.resume();
                if let Err(e) = navigate(&app, Route::Invite) {
                    log::error!("Navigation failed: {:?}", e);
                }
            })?;
        }

        {
            let app = app.clone();
            listen(&no_btn, &mut state.listeners, move |_event| {
                let mut guard = app.borrow_mut();
                let state = &mut *guard;
                state.music.resume();
                let Some(view) = state.landing.as_mut() else { return };
                let outcome = view.button.on_click(&CardLayout(&view.card), &mut state.rng);
                if let Err(e) = view.apply(outcome) {
                    log::error!("Failed to update No button: {:?}", e);
                }
            })?;
        }

        state.landing = Some(LandingView {
            button: state.settings.evasive_button(),
            card,
            no_btn,
            message,
        });
        Ok(())
    }

    fn mount_invite(
        state: &mut App,
        window: &Window,
        document: &Document,
        card: &HtmlElement,
    ) -> Result<(), JsValue> {
        let settings = &state.settings;
        card.append_child(&element(document, "h1", "title", &settings.invite_title)?)?;
        card.append_child(&element(
            document,
            "p",
            "description",
            &settings.invite_description,
        )?)?;

        let accept_btn = element(document, "button", "btn accept-btn", &settings.accept_label)?;
        card.append_child(&accept_btn)?;

        let url = settings.event.url();
        let window = window.clone();
        listen(&accept_btn, &mut state.listeners, move |_event| {
            log::info!("Opening calendar invite");
            if let Err(e) = window.open_with_url_and_target(&url, "_blank") {
                log::error!("Failed to open calendar link: {:?}", e);
            }
        })?;
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = web_app::run() {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Valentine Invite (native) starting...");
    log::info!("Native mode only previews the layout - run with `trunk serve` for the web version");

    preview_layout(1280.0, 800.0);
    preview_no_button();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn preview_layout(width: f32, height: f32) {
    use valentine_invite::Settings;
    use valentine_invite::scene::place_decorations;

    let settings = Settings::load();
    let placed = place_decorations(width, height, &settings.decorations, &mut rand::rng());
    let fallbacks = placed.iter().filter(|d| d.fallback).count();
    log::info!(
        "{} decorations in {}x{} ({} fallback)",
        placed.len(),
        width,
        height,
        fallbacks
    );
    for deco in &placed {
        log::info!(
            "  {:?} {} {} at ({:.0}, {:.0})",
            deco.quadrant,
            deco.id,
            deco.glyph,
            deco.pos.x,
            deco.pos.y
        );
    }
    log::info!("Calendar link: {}", settings.event.url());
}

#[cfg(not(target_arch = "wasm32"))]
fn preview_no_button() {
    use valentine_invite::Settings;
    use valentine_invite::scene::{ClickOutcome, FixedLayout};

    let settings = Settings::load();
    let mut button = settings.evasive_button();
    let card = FixedLayout::new(480.0, 320.0);
    let mut rng = rand::rng();

    while button.is_visible() {
        match button.on_click(&card, &mut rng) {
            ClickOutcome::Moved(pos) => log::info!(
                "click {}: \"{}\" -> ({:.0}, {:.0})",
                button.clicks(),
                button.message(),
                pos.x,
                pos.y
            ),
            outcome => log::info!("click {}: \"{}\" ({:?})", button.clicks(), button.message(), outcome),
        }
    }
}
