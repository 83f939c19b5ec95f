//! Arcade Kit entry point
//!
//! On the web this mounts Orb Runner on `#canvas` and drives it from
//! `requestAnimationFrame`. Natively it plays a scripted headless round.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent, MouseEvent,
        TouchEvent,
    };

    use arcade_kit::audio::{AudioManager, SoundEffect};
    use arcade_kit::demo::OrbRunner;
    use arcade_kit::game::Key;
    use arcade_kit::storage::LocalStore;
    use arcade_kit::surface::CanvasSurface;
    use arcade_kit::{
        GameHost, GamePhase, KeyValueStore, LifecycleEvent, MemoryStore, Settings, ThemeManager,
    };

    /// Milestone step for the demo's score
    const MILESTONE_STEP: u64 = 100;

    /// Everything the page keeps alive between frames
    struct App {
        host: GameHost<OrbRunner>,
        surface: CanvasSurface,
        audio: AudioManager,
        settings: Settings,
        store: Rc<dyn KeyValueStore>,
        canvas: HtmlCanvasElement,
    }

    impl App {
        /// Size the backing store for the device pixel ratio; returns CSS size
        fn fit_canvas(canvas: &HtmlCanvasElement, ctx: &CanvasRenderingContext2d) -> Vec2 {
            let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
            let css_w = canvas.client_width().max(1);
            let css_h = canvas.client_height().max(1);
            canvas.set_width((css_w as f64 * dpr) as u32);
            canvas.set_height((css_h as f64 * dpr) as u32);
            let _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
            Vec2::new(css_w as f32, css_h as f32)
        }

        fn resize(&mut self, ctx: &CanvasRenderingContext2d) {
            let size = Self::fit_canvas(&self.canvas, ctx);
            self.surface.resize(size.x, size.y);
            self.host.resize(size.x, size.y);
        }

        /// Canvas-relative position of a client coordinate
        fn to_local(&self, client_x: i32, client_y: i32) -> Vec2 {
            let rect = self.canvas.get_bounding_client_rect();
            Vec2::new(
                client_x as f32 - rect.left() as f32,
                client_y as f32 - rect.top() as f32,
            )
        }

        fn toggle_mute(&mut self) {
            self.settings.muted = !self.settings.muted;
            self.settings.save(self.store.as_ref());
            self.audio.apply_settings(&self.settings);
            log::info!("Sound {}", if self.settings.muted { "muted" } else { "on" });
        }

        fn frame(&mut self, time: f64) {
            self.host.frame(time);
            for event in self.host.drain_events() {
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
                if let LifecycleEvent::Milestone { score } = event {
                    log::info!("Milestone reached: {}", score);
                }
            }

            let theme = &self.host.context().theme;
            self.surface.set_glow(theme.effects.glow, theme.palette.primary);
            self.host.draw(&mut self.surface);
            self.update_hud();
        }

        /// Mirror score state into the DOM HUD
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let score = self.host.score();
            set_text(&document, "#hud-score .hud-value", &score.value.to_string());
            set_text(&document, "#hud-best .hud-value", &score.best.to_string());
            set_text(&document, "#hud-fps .hud-value", &self.host.fps().to_string());

            if let Some(el) = document.get_element_by_id("share") {
                match self.host.share_message() {
                    Some(message) if self.host.phase() == GamePhase::GameOver => {
                        let _ = el.set_attribute("class", "");
                        set_text(&document, "#share-text", &message);
                    }
                    _ => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }
        }
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn open_store() -> Rc<dyn KeyValueStore> {
        match LocalStore::open() {
            Ok(store) => Rc::new(store),
            Err(e) => {
                log::warn!("{:#}; scores and settings will not persist", e);
                Rc::new(MemoryStore::new())
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Arcade Kit starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no #canvas element")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2d context unavailable")?
            .dyn_into()?;
        let size = App::fit_canvas(&canvas, &ctx);

        let store = open_store();
        let settings = Settings::load(store.as_ref());
        let themes = Rc::new(RefCell::new(ThemeManager::with_store(store.clone())));

        let mut game = OrbRunner::new();
        game.background_layers = settings.quality.background_layers();
        let seed = js_sys::Date::now() as u64;
        let theme = themes.borrow().current().clone();
        let mut host = GameHost::new(game, store.clone(), settings.clone(), theme, seed)
            .with_milestones(Some(MILESTONE_STEP));
        host.mount(size.x, size.y);
        log::info!("Orb Runner mounted with seed: {}", seed);

        let app = Rc::new(RefCell::new(App {
            host,
            surface: CanvasSurface::new(ctx.clone(), size.x, size.y),
            audio: AudioManager::new(&settings),
            settings,
            store,
            canvas: canvas.clone(),
        }));

        {
            let app = app.clone();
            themes.borrow_mut().subscribe(move |theme| {
                // Theme changes only come from input handlers, never mid-frame
                if let Ok(mut a) = app.try_borrow_mut() {
                    a.host.apply_theme(theme);
                }
            });
        }

        setup_keyboard(app.clone(), themes.clone())?;
        setup_pointer(&canvas, app.clone())?;
        setup_auto_pause(app.clone())?;
        setup_resize(app.clone(), ctx)?;

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(app);
        log::info!("Arcade Kit running!");
        Ok(())
    }

    fn setup_keyboard(
        app: Rc<RefCell<App>>,
        themes: Rc<RefCell<ThemeManager>>,
    ) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                match key.as_str() {
                    // Listeners borrow the app, so release it before cycling
                    "t" | "T" => {
                        let name = themes.borrow_mut().next_theme().name.clone();
                        log::info!("Theme: {}", name);
                        return;
                    }
                    "m" | "M" => {
                        app.borrow_mut().toggle_mute();
                        return;
                    }
                    _ => {}
                }
                if let Some(k) = Key::from_browser(&key) {
                    // Keep arrows and space from scrolling the page
                    event.prevent_default();
                    let mut a = app.borrow_mut();
                    a.audio.resume();
                    a.host.input_mut().key_down(k);
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(k) = Key::from_browser(&event.key()) {
                    app.borrow_mut().host.input_mut().key_up(k);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_pointer(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                let pos = a.to_local(event.client_x(), event.client_y());
                a.audio.resume();
                a.host.input_mut().pointer_press(pos);
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                let pos = a.to_local(event.client_x(), event.client_y());
                a.host.input_mut().pointer_move(pos);
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                let pos = a.to_local(event.client_x(), event.client_y());
                a.host.input_mut().pointer_release(pos);
            });
            canvas.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut a = app.borrow_mut();
                    let pos = a.to_local(touch.client_x(), touch.client_y());
                    a.audio.resume();
                    a.host.input_mut().pointer_press(pos);
                }
            });
            canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut a = app.borrow_mut();
                    let pos = a.to_local(touch.client_x(), touch.client_y());
                    a.host.input_mut().pointer_move(pos);
                }
            });
            canvas.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                // The lifted finger is only in changedTouches
                if let Some(touch) = event.changed_touches().get(0) {
                    let mut a = app.borrow_mut();
                    let pos = a.to_local(touch.client_x(), touch.client_y());
                    a.host.input_mut().pointer_release(pos);
                }
            });
            canvas.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_auto_pause(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    app.borrow_mut().host.on_visibility_hidden();
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut a = app.borrow_mut();
                if a.settings.mute_on_blur {
                    let silenced = Settings {
                        muted: true,
                        ..a.settings.clone()
                    };
                    a.audio.apply_settings(&silenced);
                }
                a.host.on_visibility_hidden();
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_resize(app: Rc<RefCell<App>>, ctx: CanvasRenderingContext2d) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        {
            let app = app.clone();
            let ctx = ctx.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().resize(&ctx);
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Restore audio when the window regains focus
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut a = app.borrow_mut();
                let settings = a.settings.clone();
                a.audio.apply_settings(&settings);
            });
            window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    web_app::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    log::info!("Arcade Kit (native) starting headless Orb Runner, seed {}", seed);
    headless::run(seed);
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::rc::Rc;

    use arcade_kit::demo::OrbRunner;
    use arcade_kit::game::Key;
    use arcade_kit::highscores::format_age;
    use arcade_kit::surface::RecordingSurface;
    use arcade_kit::{
        GameHost, GamePhase, KeyValueStore, LifecycleEvent, MemoryStore, Settings, ThemeManager,
    };

    const WIDTH: f32 = 800.0;
    const HEIGHT: f32 = 450.0;
    /// Frame spacing of a 60 Hz display
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after this much simulated play
    const MAX_SECONDS: f64 = 120.0;
    const ROUNDS: usize = 3;

    /// Scripted input: weave up and down on a fixed rhythm
    fn steer(host: &mut GameHost<OrbRunner>, t: f64) {
        let phase = (t / 1.3) as u64 % 3;
        let input = host.input_mut();
        input.key_up(Key::Up);
        input.key_up(Key::Down);
        match phase {
            0 => input.key_down(Key::Up),
            1 => input.key_down(Key::Down),
            _ => {}
        }
    }

    pub fn run(seed: u64) {
        let store: Rc<dyn KeyValueStore> = Rc::new(MemoryStore::new());
        let settings = Settings::default();
        let mut themes = ThemeManager::with_store(store.clone());
        let mut host = GameHost::new(
            OrbRunner::new(),
            store.clone(),
            settings,
            themes.current().clone(),
            seed,
        )
        .with_milestones(Some(100));
        let mut surface = RecordingSurface::new(WIDTH, HEIGHT);

        host.mount(WIDTH, HEIGHT);
        let mut time = 0.0;
        for round in 1..=ROUNDS {
            // Each round gets the next theme
            if round > 1 {
                let theme = themes.next_theme().clone();
                host.apply_theme(&theme);
            }
            host.start();

            let round_start = time;
            while host.phase() == GamePhase::Playing && time - round_start < MAX_SECONDS * 1000.0 {
                time += FRAME_MS;
                steer(&mut host, (time - round_start) / 1000.0);
                host.frame(time);
                surface.reset();
                host.draw(&mut surface);
            }

            for event in host.drain_events() {
                match event {
                    LifecycleEvent::Milestone { score } => log::info!("Milestone {}", score),
                    LifecycleEvent::NewBest { score } => log::info!("New best at {}", score),
                    _ => {}
                }
            }
            if host.phase() == GamePhase::Playing {
                log::info!("Round {} survived the time limit", round);
                host.game_over();
            }
            if let Some(message) = host.share_message() {
                println!("[{}] {}", themes.current().label, message);
            }
            println!("  last frame: {} draw commands", surface.commands.len());
        }
        host.unmount();

        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(0.0);
        println!("\nHigh scores:");
        for (i, entry) in host.high_scores().entries.iter().enumerate() {
            println!(
                "  {:>2}. {:>6}  {:>3}s  {}",
                i + 1,
                entry.score,
                entry.level,
                format_age(now, entry.timestamp)
            );
        }
    }
}
