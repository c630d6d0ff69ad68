//! Coin Magic entry point
//!
//! The web build wires DOM events, `devicemotion` and an `<audio>` element to
//! the controller. The native build runs a headless demo against a simulated
//! motion sensor.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    use glam::{Vec2, Vec3};
    use wasm_bindgen::prelude::*;
    use web_sys::{DeviceMotionEvent, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};

    use coin_magic::consts::SIM_DT;
    use coin_magic::feedback::{CollisionFeedback, DomAudioPlayer};
    use coin_magic::motion::{DeviceMotion, ShakeDetector, sample_to_event};
    use coin_magic::sim::{Dynamics, Rect};
    use coin_magic::{Controller, EventBus, EventPublisher, InputEvent, Settings};

    type AppController = Controller<Dynamics, CollisionFeedback<DomAudioPlayer>>;

    /// App instance holding all state
    struct App {
        controller: AppController,
        bus: EventBus,
        settings: Settings,
        coin: HtmlElement,
        last_time: f64,
    }

    impl App {
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            self.last_time = time;

            self.controller.drain(&self.bus);
            self.controller.update(dt);
            self.render();
        }

        /// Position the coin image to match the simulated frame
        fn render(&self) {
            let state = self.controller.state();
            let style = self.coin.style();
            if state.is_hidden() {
                let _ = style.set_property("display", "none");
                return;
            }

            let frame = state.coin.frame;
            let _ = style.set_property("display", "block");
            let _ = style.set_property("width", &format!("{}px", frame.size.x));
            let _ = style.set_property("height", &format!("{}px", frame.size.y));
            let _ = style.set_property(
                "transform",
                &format!(
                    "translate({}px, {}px) rotate({}rad)",
                    frame.origin.x, frame.origin.y, state.coin.angle
                ),
            );
        }
    }

    impl App {
        /// Flip the collision-sound mute and remember it across visits
        fn toggle_mute(&mut self) {
            self.settings.muted = !self.settings.muted;
            self.controller.feedback_mut().set_muted(self.settings.muted);
            self.settings.save();
            log::info!("Sound {}", if self.settings.muted { "muted" } else { "on" });
        }
    }

    fn window_bounds() -> Rect {
        let window = web_sys::window().expect("no window");
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Rect::new(0.0, 0.0, w as f32, h as f32)
    }

    fn now() -> Duration {
        Duration::from_secs_f64(js_sys::Date::now() / 1000.0)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Coin Magic starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let Some(coin) = document
            .get_element_by_id("coin")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            log::error!("No #coin element - nothing to do");
            return;
        };

        let settings = Settings::load();
        let feedback = CollisionFeedback::new(DomAudioPlayer::default(), &settings);
        let controller = Controller::new(&settings, window_bounds(), settings.dynamics(), feedback);
        let bus = EventBus::new();
        let publisher = bus.publisher();

        let app = Rc::new(RefCell::new(App {
            controller,
            bus,
            settings: settings.clone(),
            coin: coin.clone(),
            last_time: 0.0,
        }));
        app.borrow().render();

        setup_motion(publisher.clone(), settings.shake_detector());
        setup_motion_permission();
        setup_drag(&coin, publisher.clone());
        setup_keyboard(app.clone(), publisher.clone());
        setup_resize(publisher);

        request_animation_frame(app);

        log::info!("Coin Magic running! Shake (or press S) to show the coin, M toggles sound");
    }

    fn setup_motion(publisher: EventPublisher, mut shake: ShakeDetector) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |event: DeviceMotionEvent| {
            let including_gravity = event.acceleration_including_gravity().and_then(|a| {
                Some(Vec3::new(a.x()? as f32, a.y()? as f32, a.z()? as f32))
            });
            let acceleration = event.acceleration().and_then(|a| {
                Some(Vec3::new(a.x()? as f32, a.y()? as f32, a.z()? as f32))
            });

            let sample = DeviceMotion::from_web(including_gravity, acceleration);
            if let Ok(motion) = &sample {
                if let Some(user) = motion.user_acceleration {
                    if shake.update(user.length(), now()) {
                        publisher.publish(InputEvent::Shake);
                    }
                }
            }
            if let Some(event) = sample_to_event(sample) {
                publisher.publish(event);
            }
        });
        let _ = window
            .add_event_listener_with_callback("devicemotion", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Safari only delivers `devicemotion` after `DeviceMotionEvent.requestPermission()`
    /// succeeds, and only lets a user gesture ask. Other browsers lack the method.
    fn setup_motion_permission() {
        let window = web_sys::window().expect("no window");
        let asked = Rc::new(Cell::new(false));

        for name in ["touchend", "click"] {
            let asked = asked.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if !asked.replace(true) {
                    request_motion_permission();
                }
            });
            let _ = window.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_motion_permission() {
        let Ok(ctor) = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("DeviceMotionEvent"))
        else {
            return;
        };
        let Ok(request) = js_sys::Reflect::get(&ctor, &JsValue::from_str("requestPermission")) else {
            return;
        };
        let Some(request) = request.dyn_ref::<js_sys::Function>() else {
            return;
        };

        match request.call0(&ctor).map(js_sys::Promise::from) {
            Ok(promise) => {
                let granted = Closure::<dyn FnMut(_)>::new(|state: JsValue| {
                    log::info!("Motion permission: {}", state.as_string().unwrap_or_default());
                });
                let failed = Closure::<dyn FnMut(_)>::new(|err: JsValue| {
                    log::warn!("Motion permission request failed: {:?}", err);
                });
                let _ = promise.then2(&granted, &failed);
                granted.forget();
                failed.forget();
            }
            Err(e) => log::warn!("Motion permission request failed: {:?}", e),
        }
    }

    fn setup_drag(coin: &HtmlElement, publisher: EventPublisher) {
        let window = web_sys::window().expect("no window");
        // Last pointer position while a drag is in progress
        let last: Rc<Cell<Option<Vec2>>> = Rc::new(Cell::new(None));

        let begin = {
            let last = last.clone();
            move |pos: Vec2| last.set(Some(pos))
        };
        let moved = {
            let last = last.clone();
            let publisher = publisher.clone();
            move |pos: Vec2| {
                if let Some(prev) = last.get() {
                    publisher.publish(InputEvent::DragChanged { delta: pos - prev });
                    last.set(Some(pos));
                }
            }
        };
        let ended = {
            let last = last.clone();
            move || {
                if last.take().is_some() {
                    publisher.publish(InputEvent::DragEnded);
                }
            }
        };

        // Touch
        {
            let begin = begin.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    begin(Vec2::new(touch.client_x() as f32, touch.client_y() as f32));
                }
            });
            let _ = coin
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let moved = moved.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    moved(Vec2::new(touch.client_x() as f32, touch.client_y() as f32));
                }
            });
            let _ = window
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        for name in ["touchend", "touchcancel"] {
            let ended = ended.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| ended());
            let _ = window.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.prevent_default();
                begin(Vec2::new(event.client_x() as f32, event.client_y() as f32));
            });
            let _ = coin
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                moved(Vec2::new(event.client_x() as f32, event.client_y() as f32));
            });
            let _ = window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| ended());
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard(app: Rc<RefCell<App>>, publisher: EventPublisher) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            match event.key().as_str() {
                "s" | "S" => {
                    publisher.publish(InputEvent::Shake);
                }
                "m" | "M" => app.borrow_mut().toggle_mute(),
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(publisher: EventPublisher) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            publisher.publish(InputEvent::Resize(window_bounds()));
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            app.borrow_mut().frame(time);
            request_animation_frame(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::thread;
    use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

    use glam::Vec2;

    use coin_magic::feedback::{AssetPlayer, CollisionFeedback};
    use coin_magic::motion::{Sampler, SimulatedMotion};
    use coin_magic::sim::Rect;
    use coin_magic::{Controller, EventBus, InputEvent, Settings};

    env_logger::init();
    log::info!("Coin Magic (native) starting...");
    log::info!("No display on native builds - running a scripted headless session");

    let settings = Settings::load();
    let container = Rect::new(0.0, 0.0, 375.0, 667.0);
    let feedback = CollisionFeedback::new(AssetPlayer::new("assets"), &settings);
    let mut controller = Controller::new(&settings, container, settings.dynamics(), feedback);

    let bus = EventBus::new();
    let publisher = bus.publisher();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    log::info!("Simulated motion seed: {}", seed);

    // Shake the coin into view shortly after start
    let source = SimulatedMotion::new(seed)
        .with_error_rate(0.01)
        .with_shake_at(20);
    let sampler = match Sampler::spawn(
        source,
        settings.sample_interval(),
        Some(settings.shake_detector()),
        bus.publisher(),
    ) {
        Ok(sampler) => Some(sampler),
        Err(e) => {
            log::warn!("Device motion unavailable: {}", e);
            None
        }
    };

    // Finger drags at fixed frames: one drop inside, one flick off screen
    let script: Vec<(u32, InputEvent)> = vec![
        (240, InputEvent::DragChanged { delta: Vec2::new(0.0, -200.0) }),
        (250, InputEvent::DragChanged { delta: Vec2::new(0.0, -100.0) }),
        (260, InputEvent::DragEnded),
        (420, InputEvent::DragChanged { delta: Vec2::new(400.0, 0.0) }),
        (430, InputEvent::DragEnded),
    ];

    let frame = Duration::from_secs_f32(1.0 / 60.0);
    let mut last = Instant::now();
    let mut last_phase = controller.phase();
    for frame_index in 0..480u32 {
        thread::sleep(frame);

        for (_, event) in script.iter().filter(|(at, _)| *at == frame_index) {
            publisher.publish(*event);
        }

        let now = Instant::now();
        controller.drain(&bus);
        controller.update((now - last).as_secs_f32());
        last = now;

        if controller.phase() != last_phase {
            log::info!(
                "Frame {}: {:?} -> {:?}",
                frame_index,
                last_phase,
                controller.phase()
            );
            last_phase = controller.phase();
        }
    }

    match serde_json::to_string(controller.state()) {
        Ok(json) => log::info!("Final state: {}", json),
        Err(e) => log::warn!("Could not serialize final state: {}", e),
    }

    drop(publisher);
    drop(bus);
    if let Some(sampler) = sampler {
        sampler.join();
    }
}
