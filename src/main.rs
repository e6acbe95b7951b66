//! Duel Pong entry point
//!
//! On the web this wires the canvas, keyboard and restart menu to a
//! [`MatchController`](duel_pong::MatchController) and drives it from
//! `requestAnimationFrame`. Natively it plays a headless match and prints the
//! final scene.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent};

    use duel_pong::consts::*;
    use duel_pong::platform::KeyboardInput;
    use duel_pong::renderer::{paint, scene_commands, winner_text};
    use duel_pong::sim::{GameEvent, MatchPhase};
    use duel_pong::{MatchController, Settings};

    /// Game instance holding all state
    struct Game {
        controller: MatchController,
        keys: KeyboardInput,
        settings: Settings,
        ctx: CanvasRenderingContext2d,
        /// Whether a frame is scheduled
        running: bool,
    }

    impl Game {
        fn draw(&self) {
            let cmds = scene_commands(&self.controller.scene(), &self.settings);
            paint(&self.ctx, &cmds);
        }

        /// Draw the current scene, then advance one tick
        fn frame(&mut self) -> MatchPhase {
            self.draw();
            let input = self.keys.snapshot();
            self.controller.tick(&input)
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Duel Pong starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);

        let mut controller = MatchController::new(seed);
        subscribe_menu(&mut controller, &document);

        let game = Rc::new(RefCell::new(Game {
            controller,
            keys: KeyboardInput::new(settings.key_bindings.clone()),
            settings,
            ctx,
            running: true,
        }));

        setup_input_handlers(game.clone());
        setup_restart_button(game.clone(), &document);

        request_animation_frame(game);

        log::info!("Duel Pong running!");
    }

    /// Show the winner menu when the match ends
    fn subscribe_menu(controller: &mut MatchController, document: &Document) {
        let menu = document.get_element_by_id("menu");
        let message = document.get_element_by_id("winnerMessage");
        if menu.is_none() || message.is_none() {
            log::warn!("Winner menu elements missing, match end will not be shown");
        }

        controller.subscribe(move |event| {
            if let GameEvent::MatchEnded { winner } = event {
                if let Some(message) = &message {
                    message.set_text_content(Some(&winner_text(*winner)));
                }
                if let Some(menu) = &menu {
                    let _ = menu.class_list().remove_1("hidden");
                }
            }
        });
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if g.keys.handle_key(&event.key(), pressed).is_some() {
                    // Keep arrow keys from scrolling the page
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keys released while unfocused never reach us
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().keys.release_all();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let phase = game.borrow_mut().frame();

        if phase == MatchPhase::Ended {
            // Show the final score; the restart button schedules the next frame
            let mut g = game.borrow_mut();
            g.draw();
            g.running = false;
            return;
        }

        request_animation_frame(game);
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>, document: &Document) {
        let Some(btn) = document.get_element_by_id("restartButton") else {
            log::warn!("No restart button found");
            return;
        };
        let menu = document.get_element_by_id("menu");

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let restart = {
                let mut g = game.borrow_mut();
                g.controller.reset();
                let was_running = g.running;
                g.running = true;
                !was_running
            };
            if let Some(menu) = &menu {
                let _ = menu.class_list().add_1("hidden");
            }
            if restart {
                request_animation_frame(game.clone());
            }
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use duel_pong::sim::{GameEvent, TickInput};
    use duel_pong::{MatchController, Settings, run_until_ended};

    env_logger::init();
    log::info!("Duel Pong (native) starting...");
    log::info!("Browser play requires the wasm build - run with `trunk serve`");

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(rand::random);

    let mut controller = MatchController::new(seed);
    controller.subscribe(|event| {
        if let GameEvent::PointScored { player, scores } = event {
            log::info!(
                "Point to {}: {}-{}",
                player.label(),
                scores.player1,
                scores.player2
            );
        }
    });

    // Nobody at the keys: paddles stay centered and rallies play out on their own
    match run_until_ended(
        &mut controller,
        |_| TickInput::default(),
        settings.demo_max_ticks,
    ) {
        Some(winner) => log::info!("{} wins the demo match", winner.label()),
        None => log::warn!(
            "No winner after {} ticks",
            controller.state().time_ticks
        ),
    }

    match serde_json::to_string_pretty(&controller.scene()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not serialize final scene: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
