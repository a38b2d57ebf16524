//! Brick Breaker entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use brick_breaker::audio::AudioManager;
    use brick_breaker::audio::web::WebAudioOutput;
    use brick_breaker::consts::SIM_DT;
    use brick_breaker::platform::{Key, Session, route_events};
    use brick_breaker::renderer::RenderState;
    use brick_breaker::sim::GamePhase;
    use brick_breaker::{Settings, default_field};

    /// Game instance holding all state
    struct Game {
        session: Session,
        render_state: Option<RenderState>,
        settings: Settings,
        audio: AudioManager<WebAudioOutput>,
        last_time: f64,
        /// Canvas pixels per CSS pixel
        dpr: f64,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            let mut session = Session::new(seed, default_field());
            session.apply_settings(&settings);
            let audio = AudioManager::new(WebAudioOutput::new(), &settings);
            Self {
                session,
                render_state: None,
                settings,
                audio,
                last_time: 0.0,
                dpr: 1.0,
            }
        }

        /// Run simulation ticks and route their events
        fn update(&mut self, dt: f32, time: f64) {
            let events = self.session.frame(dt, time);
            if route_events(&events, &mut self.audio, &mut self.settings) {
                // A tab cannot close itself; quitting goes back to the title
                log::info!("Quit requested, returning to main menu");
                self.session.state.reset_to_menu();
                let events = self.session.state.take_events();
                route_events(&events, &mut self.audio, &mut self.settings);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = self.session.scene(&self.settings);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// CSS-pixel offset within the canvas to field coordinates
        fn to_field(&self, x: i32, y: i32) -> Option<Vec2> {
            let viewport = self.render_state.as_ref()?.viewport;
            let screen = Vec2::new((x as f64 * self.dpr) as f32, (y as f64 * self.dpr) as f32);
            Some(viewport.screen_to_field(screen))
        }
    }

    /// Match the canvas backing store to its CSS size
    fn fit_canvas(canvas: &HtmlCanvasElement, dpr: f64) -> (u32, u32) {
        let width = ((canvas.client_width() as f64 * dpr) as u32).max(1);
        let height = ((canvas.client_height() as f64 * dpr) as u32).max(1);
        canvas.set_width(width);
        canvas.set_height(height);
        (width, height)
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Brick Breaker starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let dpr = window.device_pixel_ratio();
        let (width, height) = fit_canvas(&canvas, dpr);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));
        game.borrow_mut().dpr = dpr;

        // Initialize WebGPU (WebGL2 fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, default_field())
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to create device: {e}")))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());
        setup_resize(&canvas, game.clone());
        setup_auto_pause(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Brick Breaker running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Mouse move - steer the paddle and hover pause buttons
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                if let Some(pos) = g.to_field(event.offset_x(), event.offset_y()) {
                    g.session.input.pointer_moved(pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click - pause menu buttons; also unlocks audio
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.output().resume();
                if event.button() == 0 {
                    if let Some(pos) = g.to_field(event.offset_x(), event.offset_y()) {
                        g.session.input.clicked(pos);
                    }
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(key) = Key::from_web_key(&event.key()) else {
                    return;
                };
                // Keep arrows from scrolling the page
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.audio.output().resume();
                g.session.input.key_down(key, event.repeat());
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_web_key(&event.key()) {
                    game.borrow_mut().session.input.key_up(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let dpr = window.device_pixel_ratio();
            let (width, height) = fit_canvas(&canvas, dpr);
            let mut g = game.borrow_mut();
            g.dpr = dpr;
            if let Some(render_state) = g.render_state.as_mut() {
                render_state.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Pause when the window loses focus so held keys cannot stick
    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            let mut g = game.borrow_mut();
            g.session.input.release_all();
            if g.session.state.phase == GamePhase::Playing {
                g.session.input.key_down(Key::Pause, false);
                log::info!("Auto-paused (window blur)");
            }
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native_game {
    use std::sync::Arc;
    use std::time::{Instant, SystemTime, UNIX_EPOCH};

    use anyhow::{Context, Result};
    use glam::Vec2;
    use winit::application::ApplicationHandler;
    use winit::dpi::LogicalSize;
    use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
    use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
    use winit::keyboard::{KeyCode, PhysicalKey};
    use winit::window::{Fullscreen, Window, WindowId};

    use brick_breaker::audio::AudioManager;
    use brick_breaker::audio::native::NativeOutput;
    use brick_breaker::consts::{FIELD_HEIGHT, FIELD_WIDTH};
    use brick_breaker::platform::{Key, Session, route_events};
    use brick_breaker::renderer::RenderState;
    use brick_breaker::sim::GamePhase;
    use brick_breaker::{Settings, default_field};

    fn key_from_code(code: KeyCode) -> Option<Key> {
        match code {
            KeyCode::ArrowLeft => Some(Key::Left),
            KeyCode::ArrowRight => Some(Key::Right),
            KeyCode::KeyP => Some(Key::Pause),
            KeyCode::KeyM => Some(Key::Mute),
            KeyCode::Enter | KeyCode::NumpadEnter => Some(Key::Confirm),
            KeyCode::Escape => Some(Key::Quit),
            KeyCode::KeyI => Some(Key::IdleToggle),
            KeyCode::Equal | KeyCode::NumpadAdd => Some(Key::SkipLevel),
            _ => None,
        }
    }

    /// Window plus everything bound to its surface
    struct Graphics {
        window: Arc<Window>,
        render_state: RenderState,
    }

    struct App {
        instance: wgpu::Instance,
        graphics: Option<Graphics>,
        session: Session,
        settings: Settings,
        audio: AudioManager<NativeOutput>,
        started: Instant,
        last_frame: Option<Instant>,
        /// Last cursor position in window pixels
        cursor: Option<Vec2>,
        /// Fatal setup error, reported after the loop exits
        error: Option<anyhow::Error>,
    }

    impl App {
        fn new(settings: Settings) -> Self {
            let seed = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0);
            let mut session = Session::new(seed, default_field());
            session.apply_settings(&settings);
            let audio = AudioManager::new(NativeOutput::open(), &settings);

            Self {
                instance: wgpu::Instance::new(&wgpu::InstanceDescriptor {
                    backends: wgpu::Backends::PRIMARY,
                    ..Default::default()
                }),
                graphics: None,
                session,
                settings,
                audio,
                started: Instant::now(),
                last_frame: None,
                cursor: None,
                error: None,
            }
        }

        async fn create_graphics(&self, window: Arc<Window>) -> Result<Graphics> {
            let size = window.inner_size();
            let surface = self
                .instance
                .create_surface(window.clone())
                .context("Failed to create surface")?;

            let adapter = self
                .instance
                .request_adapter(&wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::HighPerformance,
                    compatible_surface: Some(&surface),
                    force_fallback_adapter: false,
                })
                .await
                .context("Failed to get adapter")?;
            log::info!("Using adapter: {:?}", adapter.get_info().name);

            let render_state =
                RenderState::new(surface, &adapter, size.width, size.height, default_field())
                    .await
                    .context("Failed to create renderer")?;

            Ok(Graphics {
                window,
                render_state,
            })
        }

        fn pointer_in_field(&self) -> Option<Vec2> {
            let graphics = self.graphics.as_ref()?;
            let cursor = self.cursor?;
            Some(graphics.render_state.viewport.screen_to_field(cursor))
        }

        /// Advance and draw one frame; false when the app should exit
        fn redraw(&mut self) -> bool {
            let now = Instant::now();
            let dt = self
                .last_frame
                .map(|last| now.duration_since(last).as_secs_f32())
                .unwrap_or(0.0);
            self.last_frame = Some(now);
            let now_ms = now.duration_since(self.started).as_secs_f64() * 1000.0;

            let events = self.session.frame(dt, now_ms);
            if route_events(&events, &mut self.audio, &mut self.settings) {
                log::info!("Quit requested");
                return false;
            }

            let vertices = self.session.scene(&self.settings);
            let Some(graphics) = self.graphics.as_mut() else {
                return true;
            };
            match graphics.render_state.render(&vertices) {
                Ok(()) => true,
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    log::warn!("Surface lost, reconfiguring");
                    graphics.render_state.reconfigure();
                    true
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                    false
                }
                Err(e) => {
                    log::warn!("Render error: {:?}", e);
                    true
                }
            }
        }
    }

    impl ApplicationHandler for App {
        fn resumed(&mut self, event_loop: &ActiveEventLoop) {
            if self.graphics.is_some() {
                return;
            }

            let mut attributes = Window::default_attributes()
                .with_title("Brick Breaker")
                .with_inner_size(LogicalSize::new(FIELD_WIDTH, FIELD_HEIGHT));
            if self.settings.fullscreen {
                attributes = attributes.with_fullscreen(Some(Fullscreen::Borderless(None)));
            }

            let window = match event_loop.create_window(attributes) {
                Ok(window) => Arc::new(window),
                Err(e) => {
                    self.error = Some(anyhow::Error::new(e).context("Failed to create window"));
                    event_loop.exit();
                    return;
                }
            };

            match pollster::block_on(self.create_graphics(window)) {
                Ok(graphics) => {
                    graphics.window.request_redraw();
                    self.graphics = Some(graphics);
                }
                Err(e) => {
                    self.error = Some(e);
                    event_loop.exit();
                }
            }
        }

        fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
            match event {
                WindowEvent::CloseRequested => {
                    log::info!("Window closed");
                    event_loop.exit();
                }

                WindowEvent::Resized(size) => {
                    if let Some(graphics) = self.graphics.as_mut() {
                        graphics.render_state.resize(size.width, size.height);
                    }
                }

                WindowEvent::Focused(false) => {
                    self.session.input.release_all();
                    if self.session.state.phase == GamePhase::Playing {
                        self.session.input.key_down(Key::Pause, false);
                        log::info!("Auto-paused (focus lost)");
                    }
                }

                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            physical_key: PhysicalKey::Code(code),
                            state,
                            repeat,
                            ..
                        },
                    ..
                } => {
                    if let Some(key) = key_from_code(code) {
                        match state {
                            ElementState::Pressed => self.session.input.key_down(key, repeat),
                            ElementState::Released => self.session.input.key_up(key),
                        }
                    }
                }

                WindowEvent::CursorMoved { position, .. } => {
                    self.cursor = Some(Vec2::new(position.x as f32, position.y as f32));
                    if let Some(pos) = self.pointer_in_field() {
                        self.session.input.pointer_moved(pos);
                    }
                }

                WindowEvent::MouseInput {
                    state: ElementState::Pressed,
                    button: MouseButton::Left,
                    ..
                } => {
                    if let Some(pos) = self.pointer_in_field() {
                        self.session.input.clicked(pos);
                    }
                }

                WindowEvent::RedrawRequested => {
                    if !self.redraw() {
                        event_loop.exit();
                    }
                }

                _ => {}
            }
        }

        fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
            if let Some(graphics) = &self.graphics {
                graphics.window.request_redraw();
            }
        }
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        log::info!("Brick Breaker (native) starting...");

        let settings = Settings::load();
        let event_loop = EventLoop::new().context("Failed to create event loop")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(settings);
        event_loop.run_app(&mut app).context("Event loop failed")?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
