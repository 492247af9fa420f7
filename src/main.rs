//! Sky Chase entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

    use glam::Vec2;
    use sky_chase::audio::{AudioManager, SoundEffect};
    use sky_chase::haptics;
    use sky_chase::renderer::{scene, RenderState};
    use sky_chase::sim::{tick, DirKey, GameEvent, GamePhase, GameState, InputCollector};
    use sky_chase::{HighScores, Settings};

    /// An installed DOM event listener, removed exactly once on drop.
    ///
    /// Restart never reinstalls listeners - it only replaces the session
    /// state - so duplicate handlers firing into stale state are impossible.
    struct ListenerGuard {
        target: web_sys::EventTarget,
        event: &'static str,
        function: js_sys::Function,
        /// Keeps the closure memory alive while the listener is attached
        _closure: Box<dyn std::any::Any>,
    }

    impl ListenerGuard {
        fn new<T>(target: &web_sys::EventTarget, event: &'static str, closure: T) -> Self
        where
            T: AsRef<JsValue> + 'static,
        {
            let function = closure.as_ref().unchecked_ref::<js_sys::Function>().clone();
            if target
                .add_event_listener_with_callback(event, &function)
                .is_err()
            {
                log::warn!("Failed to attach {event} listener");
            }
            Self {
                target: target.clone(),
                event,
                function,
                _closure: Box::new(closure),
            }
        }
    }

    impl Drop for ListenerGuard {
        fn drop(&mut self) {
            let _ = self
                .target
                .remove_event_listener_with_callback(self.event, &self.function);
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: InputCollector,
        render_state: Option<RenderState>,
        audio: AudioManager,
        settings: Settings,
        highscores: HighScores,
        listeners: Vec<ListenerGuard>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);
            audio.set_music_volume(settings.music_volume);

            Self {
                state: GameState::new(seed),
                input: InputCollector::new(),
                render_state: None,
                audio,
                settings,
                highscores: HighScores::load(),
                listeners: Vec::new(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run one frame: drain input, step the simulation, react to events
        fn update(&mut self, time: f64) {
            let input = self.input.snapshot();

            if input.restart {
                self.restart();
            }

            let was_started = self.state.is_started();
            let was_paused = self.state.is_paused();

            let events = tick(&mut self.state, &input);

            if !was_started && self.state.is_started() {
                self.audio.play(SoundEffect::Start);
                self.audio.ambient_play();
            }
            if was_started && self.state.is_paused() != was_paused {
                self.audio.play(SoundEffect::Pause);
                if self.state.is_paused() {
                    self.audio.ambient_pause();
                } else {
                    self.audio.ambient_play();
                }
            }

            for event in events {
                match event {
                    GameEvent::PreyCaptured { pos } => {
                        log::debug!("Catch #{} at ({:.2}, {:.2})", self.state.score, pos.x, pos.y);
                        self.audio.play(SoundEffect::Capture);
                        if self.settings.haptics {
                            haptics::buzz(30);
                        }
                    }
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = scene(&self.state, self.settings.effective_particles());
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.score.to_string()));
            }

            if let Some(el) = document.query_selector("#hud-best .hud-value").ok().flatten() {
                let best = self.highscores.top_score().unwrap_or(0);
                el.set_text_content(Some(&best.max(self.state.score).to_string()));
            }

            if let Some(el) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                if self.settings.show_fps {
                    el.set_text_content(Some(&self.fps.to_string()));
                }
            }

            // Show/hide the start prompt
            if let Some(el) = document.get_element_by_id("start-overlay") {
                if self.state.is_started() {
                    let _ = el.set_attribute("class", "hidden");
                } else {
                    let _ = el.set_attribute("class", "");
                }
            }

            // Show/hide the pause overlay
            if let Some(el) = document.get_element_by_id("pause-overlay") {
                if self.state.is_paused() {
                    let _ = el.set_attribute("class", "");
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }

        /// Tear down the current session and start a fresh one
        fn restart(&mut self) {
            // The finished session's result goes to the leaderboard first
            if self.highscores.qualifies(self.state.score) {
                let is_best = self
                    .highscores
                    .top_score()
                    .is_none_or(|top| self.state.score > top);
                self.highscores.add_score(self.state.score, js_sys::Date::now());
                self.highscores.save();
                if is_best {
                    self.audio.play(SoundEffect::HighScore);
                }
            }

            self.audio.ambient_stop();
            let seed = js_sys::Date::now() as u64;
            self.state = GameState::new(seed);
            self.input = InputCollector::new();
            log::info!("Session restarted with seed: {}", seed);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Sky Chase starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await;
        game.borrow_mut().render_state = Some(render_state);

        // Wire up input; the guards deregister their listeners if dropped
        let guards = install_listeners(&canvas, &game);
        game.borrow_mut().listeners = guards;

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Sky Chase running!");
    }

    fn mouse_pos(event: &MouseEvent) -> Vec2 {
        Vec2::new(event.offset_x() as f32, event.offset_y() as f32)
    }

    fn touch_pos(canvas: &HtmlCanvasElement, event: &TouchEvent) -> Option<Vec2> {
        let touch = event.touches().get(0)?;
        let rect = canvas.get_bounding_client_rect();
        Some(Vec2::new(
            touch.client_x() as f32 - rect.left() as f32,
            touch.client_y() as f32 - rect.top() as f32,
        ))
    }

    fn install_listeners(
        canvas: &HtmlCanvasElement,
        game: &Rc<RefCell<Game>>,
    ) -> Vec<ListenerGuard> {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let mut guards = Vec::new();

        // Keyboard down: steering, start, pause, restart
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                if let Some(key) = DirKey::from_key(&event.key()) {
                    g.input.key_down(key);
                    if !g.state.is_started() {
                        g.input.request_start();
                    }
                    return;
                }
                match event.key().as_str() {
                    " " | "Enter" => {
                        if !g.state.is_started() {
                            g.input.request_start();
                        }
                    }
                    "Escape" | "p" | "P" => g.input.request_pause(),
                    "r" | "R" => g.input.request_restart(),
                    _ => {}
                }
            });
            guards.push(ListenerGuard::new(&window, "keydown", closure));
        }

        // Keyboard up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if let Some(key) = DirKey::from_key(&event.key()) {
                    game.borrow_mut().input.key_up(key);
                }
            });
            guards.push(ListenerGuard::new(&window, "keyup", closure));
        }

        // Mouse drag
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.input.mouse_down(mouse_pos(&event));
                if !g.state.is_started() {
                    g.input.request_start();
                }
            });
            guards.push(ListenerGuard::new(canvas, "mousedown", closure));
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().input.mouse_move(mouse_pos(&event));
            });
            guards.push(ListenerGuard::new(canvas, "mousemove", closure));
        }
        {
            // On the window, so a release outside the canvas still ends the drag
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.mouse_up();
            });
            guards.push(ListenerGuard::new(&window, "mouseup", closure));
        }

        // Touch drag
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.audio.resume();
                if let Some(pos) = touch_pos(&canvas_clone, &event) {
                    g.input.touch_start(pos);
                }
                if !g.state.is_started() {
                    g.input.request_start();
                }
            });
            guards.push(ListenerGuard::new(canvas, "touchstart", closure));
        }
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(pos) = touch_pos(&canvas_clone, &event) {
                    game.borrow_mut().input.touch_move(pos);
                }
            });
            guards.push(ListenerGuard::new(canvas, "touchmove", closure));
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.touch_end();
            });
            guards.push(ListenerGuard::new(canvas, "touchend", closure));
        }

        // Auto-pause when the tab is hidden
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.state.phase == GamePhase::Playing {
                        g.input.request_pause();
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            guards.push(ListenerGuard::new(&document, "visibilitychange", closure));
        }

        // Auto-pause and optionally mute on window blur
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::Playing {
                    g.input.request_pause();
                    log::info!("Auto-paused (window blur)");
                }
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                }
            });
            guards.push(ListenerGuard::new(&window, "blur", closure));
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(false);
                }
            });
            guards.push(ListenerGuard::new(&window, "focus", closure));
        }

        // Restart button
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.request_restart();
            });
            guards.push(ListenerGuard::new(&btn, "click", closure));
        }

        guards
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sky Chase (native) starting...");
    log::info!("Native mode requires winit integration - run with `trunk serve` for web version");

    println!("\nRunning simulation smoke test...");
    smoke_test_capture();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_test_capture() {
    use glam::Vec2;
    use sky_chase::sim::{tick, GamePhase, GameState, TickInput};

    let mut state = GameState::new(42);
    state.phase = GamePhase::Playing;
    state.player.pos = Vec2::ZERO;
    state.prey.pos = Vec2::new(1.0, 0.0);

    let events = tick(&mut state, &TickInput::default());
    assert!(!events.is_empty(), "Capture should be detected");
    assert_eq!(state.score, 1);
    println!("✓ Capture smoke test passed!");
}
