//! Mini Pinball entry point
//!
//! On the web: wires the DOM to the driver and runs it from
//! `requestAnimationFrame`. Natively: plays a headless game with a simple
//! autopilot and logs the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, KeyboardEvent,
        MouseEvent, TouchEvent,
    };

    use mini_pinball::renderer::{CanvasPainter, Frame};
    use mini_pinball::sim::{FlipperSide, GamePhase, Intent, intent_for_key, intent_for_zone};
    use mini_pinball::{Driver, FrameSink, Settings};

    /// Horizontal padding of the canvas container
    const CANVAS_PADDING: i32 = 40;

    /// DOM side of the loop: canvas, HUD readouts, start button, alerts
    struct DomSink {
        painter: CanvasPainter,
        document: Document,
    }

    impl DomSink {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn show_start_button(&self, visible: bool) {
            let display = if visible { "inline-block" } else { "none" };
            if let Ok(btn) = element(&self.document, "startBtn") {
                let _ = btn.style().set_property("display", display);
            }
        }
    }

    impl FrameSink for DomSink {
        fn draw(&mut self, frame: &Frame) {
            if let Err(e) = self.painter.paint(frame) {
                log::error!("Render error: {:?}", e);
            }
        }

        fn hud(&mut self, score: u64, balls: u8) {
            self.set_text("score", &score.to_string());
            self.set_text("balls", &balls.to_string());
        }

        fn game_over(&mut self, final_score: u64) {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(&format!("Game over! Score: {}", final_score));
            }
        }

        fn phase_changed(&mut self, phase: GamePhase) {
            match phase {
                GamePhase::Waiting => self.show_start_button(true),
                GamePhase::Playing => self.show_start_button(false),
                GamePhase::GameOver => {}
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        driver: Driver,
        sink: DomSink,
        canvas: HtmlCanvasElement,
    }

    impl Game {
        /// Fit the canvas to its container and rescale the table
        fn fit_canvas(&mut self) {
            let width = self
                .canvas
                .parent_element()
                .map(|p| p.client_width() - CANVAS_PADDING)
                .unwrap_or(self.canvas.client_width())
                .max(1);
            let height = self.canvas.offset_height().max(1);
            self.canvas.set_width(width as u32);
            self.canvas.set_height(height as u32);
            self.driver.resize(width as f32, height as f32);
        }
    }

    fn element(document: &Document, id: &str) -> Result<HtmlElement, JsValue> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing #{}", id)))?
            .dyn_into::<HtmlElement>()
            .map_err(JsValue::from)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Mini Pinball starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let settings = Settings::load(&canvas);
        let seed = js_sys::Date::now() as u64;
        let driver = Driver::new(
            canvas.width() as f32,
            canvas.height() as f32,
            seed,
            settings,
        );

        let game = Rc::new(RefCell::new(Game {
            driver,
            sink: DomSink {
                painter: CanvasPainter::new(ctx),
                document: document.clone(),
            },
            canvas,
        }));
        {
            let mut g = game.borrow_mut();
            g.fit_canvas();
            let (score, balls) = (g.driver.world().score, g.driver.world().balls);
            g.sink.hud(score, balls);
        }

        setup_resize(game.clone())?;
        setup_buttons(&document, game.clone())?;
        setup_keyboard(&document, game.clone())?;
        setup_flipper_zones(&document, game.clone())?;

        request_animation_frame(game);

        log::info!("Mini Pinball running!");
        Ok(())
    }

    fn setup_resize(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().fit_canvas();
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        for (id, intent) in [("startBtn", Intent::Start), ("resetBtn", Intent::Reset)] {
            let btn = element(document, id)?;
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().driver.push_intent(intent);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_keyboard(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        for (name, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(intent) = intent_for_key(&event.code(), pressed) {
                    game.borrow_mut().driver.push_intent(intent);
                }
            });
            document.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_flipper_zones(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        for (id, side) in [
            ("leftFlipper", FlipperSide::Left),
            ("rightFlipper", FlipperSide::Right),
        ] {
            let zone = element(document, id)?;

            for (name, pressed) in [("touchstart", true), ("touchend", false)] {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    game.borrow_mut()
                        .driver
                        .push_intent(intent_for_zone(side, pressed));
                });
                zone.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
                closure.forget();
            }

            for (name, pressed) in [("mousedown", true), ("mouseup", false)] {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    game.borrow_mut()
                        .driver
                        .push_intent(intent_for_zone(side, pressed));
                });
                zone.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
                closure.forget();
            }
        }
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("no window for animation frame");
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
            let Game { driver, sink, .. } = &mut *g;
            driver.frame(time, sink);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use mini_pinball::renderer::Frame;
    use mini_pinball::sim::{FlipperSide, GamePhase, Intent, World};
    use mini_pinball::{Driver, FrameSink, Settings};

    /// 60 Hz host clock
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after five minutes of play
    const MAX_FRAMES: u64 = 60 * 60 * 5;
    /// How close above a pivot the ball must be before the autopilot flips
    const FLIP_WINDOW_Y: f32 = 40.0;

    /// Logs what a browser would show
    #[derive(Default)]
    struct LogSink {
        commands: usize,
        final_score: Option<u64>,
    }

    impl FrameSink for LogSink {
        fn draw(&mut self, frame: &Frame) {
            self.commands += frame.commands.len();
        }

        fn hud(&mut self, score: u64, balls: u8) {
            log::debug!("Score {} | Balls {}", score, balls);
        }

        fn game_over(&mut self, final_score: u64) {
            log::info!("Game over! Score: {}", final_score);
            self.final_score = Some(final_score);
        }

        fn phase_changed(&mut self, phase: GamePhase) {
            log::debug!("Phase -> {:?}", phase);
        }
    }

    /// Hold a flipper while the falling ball is just above its pivot
    fn wants_flip(world: &World, side: FlipperSide) -> bool {
        let flipper = match side {
            FlipperSide::Left => &world.left,
            FlipperSide::Right => &world.right,
        };
        let ball = &world.ball;
        let above = flipper.pos.y - ball.pos.y;
        ball.vel.y > 0.0
            && (0.0..FLIP_WINDOW_Y).contains(&above)
            && (ball.pos.x - flipper.pos.x).abs() < flipper.width
    }

    pub fn run_headless(settings: Settings) {
        let mut driver = Driver::new(400.0, 600.0, 2024, settings);
        let mut sink = LogSink::default();

        driver.push_intent(Intent::Start);
        let mut held = [false, false];

        while sink.final_score.is_none() && driver.frames() < MAX_FRAMES {
            for (i, side) in [FlipperSide::Left, FlipperSide::Right].into_iter().enumerate() {
                let flip = wants_flip(driver.world(), side);
                if flip != held[i] {
                    driver.push_intent(Intent::flipper(side, flip));
                    held[i] = flip;
                }
            }
            let now = driver.frames() as f64 * FRAME_MS;
            driver.frame(now, &mut sink);
        }

        match sink.final_score {
            Some(score) => log::info!(
                "Headless game finished after {} frames with {} points",
                driver.frames(),
                score
            ),
            None => log::info!(
                "Stopped after {} frames, score {} with {} balls left",
                driver.frames(),
                driver.world().score,
                driver.world().balls
            ),
        }
        log::debug!("{} draw commands issued", sink.commands);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Mini Pinball (native) starting...");
    log::info!("Native mode runs a headless autopilot - run with `trunk serve` for the web version");

    let settings_path = std::env::args().nth(1).map(std::path::PathBuf::from);
    let settings = mini_pinball::Settings::load(settings_path.as_deref());
    native::run_headless(settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
