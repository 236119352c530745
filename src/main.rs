//! Block Breaker entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Shown when every block is destroyed
const CLEARED_MESSAGE: &str = "Congratulations! All blocks cleared!";
/// Shown when the ball is lost
const GAME_OVER_MESSAGE: &str = "Game over";

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent};

    use block_breaker::GameConfig;
    use block_breaker::renderer::{CanvasSurface, draw_frame};
    use block_breaker::sim::{GameEvent, GameState, tick};

    use super::{CLEARED_MESSAGE, GAME_OVER_MESSAGE};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        surface: CanvasSurface,
        canvas: HtmlCanvasElement,
    }

    impl Game {
        /// Draw, then advance one frame
        fn frame(&mut self) {
            draw_frame(&self.state, &mut self.surface);
            tick(&mut self.state);
            self.handle_events();
        }

        /// Apply queued simulation events to the DOM
        fn handle_events(&mut self) {
            for event in self.state.drain_events() {
                match event {
                    GameEvent::Started { restarted } => {
                        set_text("scoreValue", "0");
                        set_text("message", "");
                        if restarted {
                            log::info!("New round");
                        }
                    }
                    GameEvent::BlockDestroyed { score, .. } => {
                        set_text("scoreValue", &score.to_string());
                    }
                    GameEvent::Won { score } => {
                        log::info!("Won with score {}", score);
                        set_text("message", CLEARED_MESSAGE);
                    }
                    GameEvent::Lost { score } => {
                        log::info!("Lost with score {}", score);
                        set_text("message", GAME_OVER_MESSAGE);
                    }
                }
            }
        }
    }

    /// Set the text of an optional HUD element
    fn set_text(id: &str, text: &str) {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
        {
            el.set_text_content(Some(text));
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("logger init failed: {e}").into());
        }

        log::info!("Block Breaker starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()
            .map_err(|_| JsValue::from_str("gameCanvas is not a canvas"))?;

        let config = GameConfig::load();
        let surface = CanvasSurface::new(&canvas, &config)?;
        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(config),
            surface,
            canvas,
        }));

        set_text("scoreValue", "0");

        setup_input_handlers(&document, game.clone());
        setup_start_button(&document, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Block Breaker running!");
        Ok(())
    }

    fn setup_input_handlers(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        // Pointer position relative to the canvas's left edge
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let mut g = game.borrow_mut();
            let x = event.client_x() - g.canvas.offset_left();
            g.state.on_pointer_move(x as f32);
        });
        let _ = document
            .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_start_button(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        let Some(btn) = document.get_element_by_id("startButton") else {
            log::warn!("No start button found");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let mut g = game.borrow_mut();
            g.state.start();
            g.handle_events();
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Block Breaker (native) starting...");
    log::info!("Native mode has no canvas - build for wasm32 for the playable version");

    autoplay(MAX_DEMO_FRAMES);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Frame cap for the headless demo (about five minutes at 60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const MAX_DEMO_FRAMES: u64 = 60 * 60 * 5;

/// Headless game with the paddle following the ball
#[cfg(not(target_arch = "wasm32"))]
fn autoplay(max_frames: u64) {
    use block_breaker::GameConfig;
    use block_breaker::sim::{GameEvent, GameState, tick};

    let mut state = GameState::new(GameConfig::load());
    state.start();

    while state.is_running() && state.frame < max_frames {
        let target = state.ball.pos.x;
        state.on_pointer_move(target);
        tick(&mut state);

        for event in state.drain_events() {
            match event {
                GameEvent::BlockDestroyed { row, col, score } => {
                    log::debug!("frame {}: block ({row}, {col}) -> {score}", state.frame);
                }
                GameEvent::Won { .. } => println!("{CLEARED_MESSAGE}"),
                GameEvent::Lost { .. } => println!("{GAME_OVER_MESSAGE}"),
                GameEvent::Started { .. } => {}
            }
        }
    }

    println!(
        "Finished after {} frames: score {}/{} ({:?})",
        state.frame,
        state.score,
        state.winning_score(),
        state.outcome
    );
}
