//! Math Rain entry point
//!
//! Handles platform-specific initialization and session wiring.
//!
//! The web build expects the page to provide a `<main>` shell containing a
//! `<canvas>`, a text `<input>` for answers, a reset `<button>`, score
//! displays at `.js-score` and `.js-best-score`, and a `.js-container`
//! wrapper the end-of-game summary is appended to.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, HtmlInputElement, KeyboardEvent, MouseEvent};

    use math_rain::audio::{AudioManager, SoundEffect};
    use math_rain::platform::{FrameLoop, Interval};
    use math_rain::renderer::CanvasRenderer;
    use math_rain::scores::BestScore;
    use math_rain::sim::{self, GameState, Submission};
    use math_rain::tuning::Tuning;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        tuning: Tuning,
        best: BestScore,
        renderer: CanvasRenderer,
        audio: AudioManager,
        frame: FrameLoop,
        spawner: Interval,
    }

    fn document() -> web_sys::Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn set_text(selector: &str, text: &str) {
        if let Some(el) = document().query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Math Rain starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Reveal the page shell
        if let Some(main) = document.query_selector("main").ok().flatten() {
            if let Ok(main) = main.dyn_into::<HtmlElement>() {
                main.set_hidden(false);
            }
        }

        let canvas: HtmlCanvasElement = document
            .query_selector("canvas")
            .ok()
            .flatten()
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let input: HtmlInputElement = document
            .query_selector("input")
            .ok()
            .flatten()
            .expect("no answer input")
            .dyn_into()
            .expect("not an input");
        let button = document
            .query_selector("button")
            .ok()
            .flatten()
            .expect("no reset button");

        let renderer = CanvasRenderer::new(canvas)?;

        let seed = js_sys::Date::now() as u64;
        let mut game = Game {
            state: GameState::new(seed),
            tuning: Tuning::load(),
            best: BestScore::load(),
            renderer,
            audio: AudioManager::new(),
            frame: FrameLoop::new(),
            spawner: Interval::new(),
        };

        set_text(".js-best-score", &game.best.value.to_string());

        game.state.spawn_drop(&game.tuning);

        let game = Rc::new(RefCell::new(game));

        start_frame_loop(game.clone());
        start_spawner(game.clone());

        setup_answer_input(game.clone(), &input);
        setup_reset_button(game.clone(), &button);

        log::info!("Math Rain running (seed {})", seed);
        Ok(())
    }

    /// Arm the frame loop: advance, draw, then resolve what the sea swallowed
    fn start_frame_loop(game: Rc<RefCell<Game>>) {
        let game_ref = game.clone();
        game.borrow().frame.start(move |_timestamp| {
            let mut g = game_ref.borrow_mut();
            let g = &mut *g;

            g.renderer.clear();
            let missed = sim::advance(&mut g.state);
            g.renderer.draw_drops(&g.state);
            let outcome = sim::resolve_misses(&mut g.state, &missed);
            g.renderer.draw_sea(&g.state);

            if outcome.drowned > 0 && !outcome.ended {
                g.audio.play(SoundEffect::Splash);
            }

            if outcome.ended {
                end_game(g);
            }
        });
    }

    /// Arm the spawn timer at the cadence the current difficulty calls for
    fn start_spawner(game: Rc<RefCell<Game>>) {
        let delay = {
            let g = game.borrow();
            g.state.spawn_delay_ms(&g.tuning)
        };

        let game_ref = game.clone();
        game.borrow().spawner.start(
            move || {
                let mut g = game_ref.borrow_mut();
                let g = &mut *g;
                g.state.spawn_drop(&g.tuning);
            },
            delay as i32,
        );
    }

    fn setup_answer_input(game: Rc<RefCell<Game>>, input: &HtmlInputElement) {
        let input_el = input.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let value = input_el.value();
            let value = value.trim();

            if value.is_empty() {
                return;
            }

            let code = event.code();
            if code != "Enter" && code != "NumpadEnter" {
                return;
            }

            input_el.set_value("");

            {
                let mut g = game.borrow_mut();
                let g = &mut *g;

                match sim::submit(&mut g.state, &g.tuning, value) {
                    Submission::Ignored => return,
                    Submission::Hit { count } => {
                        log::info!("Popped {} drop(s)", count);
                        g.audio.play(SoundEffect::Pop);
                    }
                    Submission::Jackpot { count } => {
                        log::info!("Jackpot! Cleared {} drop(s)", count);
                        g.audio.play(SoundEffect::Jackpot);
                    }
                    Submission::Penalty => g.audio.play(SoundEffect::Penalty),
                }

                set_text(".js-score", &g.state.score.to_string());
            }

            // The cadence catches up with difficulty on every submission
            start_spawner(game.clone());
        });
        let _ = input.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_reset_button(game: Rc<RefCell<Game>>, button: &web_sys::Element) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let seed = js_sys::Date::now() as u64;

            {
                let mut g = game.borrow_mut();
                let g = &mut *g;

                g.frame.cancel();
                g.spawner.stop();

                g.state = GameState::new(seed);

                if let Some(table) = document().query_selector("table").ok().flatten() {
                    table.remove();
                }

                set_text(".js-score", "0");

                if let Some(input) = document().query_selector("input").ok().flatten() {
                    if let Ok(input) = input.dyn_into::<HtmlInputElement>() {
                        input.set_hidden(false);
                        input.set_value("");
                        let _ = input.focus();
                    }
                }

                g.state.spawn_drop(&g.tuning);
            }

            start_frame_loop(game.clone());
            start_spawner(game.clone());

            log::info!("Game reset with seed: {}", seed);
        });
        let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Terminal path: freeze the session and show the summary
    fn end_game(g: &mut Game) {
        log::info!("Game over - final score {}", g.state.score);

        g.frame.cancel();
        g.spawner.stop();

        if let Some(input) = document().query_selector("input").ok().flatten() {
            if let Ok(input) = input.dyn_into::<HtmlElement>() {
                input.set_hidden(true);
            }
        }

        if g.best.record(g.state.score) {
            g.best.save();
            set_text(".js-best-score", &g.best.value.to_string());
            g.audio.play(SoundEffect::BestScore);
        } else {
            g.audio.play(SoundEffect::GameOver);
        }

        show_summary(&g.state);
    }

    fn show_summary(state: &GameState) {
        let accuracy = state.accuracy();
        let accuracy_text = if accuracy > 0.0 {
            format!("{:.2}", accuracy)
        } else {
            "0".to_string()
        };

        let html = format!(
            "<table><tbody>\
             <tr><td>Score</td><td><strong>{}</strong></td></tr>\
             <tr><td>Correct</td><td><strong>{}</strong></td></tr>\
             <tr><td>Accuracy</td><td><strong>{}%</strong></td></tr>\
             </tbody></table>",
            state.score, state.hits, accuracy_text
        );

        if let Some(container) = document().query_selector(".js-container").ok().flatten() {
            let _ = container.insert_adjacent_html("beforeend", &html);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(err) = wasm_game::run() {
        log::error!("Failed to start: {:?}", err);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Math Rain (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    println!("\nRunning scripted session...");
    demo_session();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn demo_session() {
    use math_rain::sim::{self, GameState, Submission};
    use math_rain::tuning::Tuning;

    let tuning = Tuning::default();
    let mut state = GameState::new(0xC0FFEE);

    // Answer the first drop correctly
    state.spawn_drop(&tuning);
    let answer = state.drops[0].problem.result.to_string();
    let result = sim::submit(&mut state, &tuning, &answer);
    assert!(
        matches!(result, Submission::Hit { .. } | Submission::Jackpot { .. }),
        "first answer should pop its drop"
    );

    // Let the rest of the session play out unanswered
    let mut frames = 0u32;
    while !state.over && frames < 200_000 {
        if frames % 120 == 0 {
            state.spawn_drop(&tuning);
        }
        sim::step(&mut state);
        frames += 1;
    }
    assert!(state.over, "an unanswered session should drown");

    println!(
        "✓ Session drowned after {} frames: score {}, {} spawned, accuracy {:.2}%",
        frames,
        state.score,
        state.spawned,
        state.accuracy()
    );
}
