//! Grid Snake entry point
//!
//! On the web this wires the page (canvas, buttons, slider, touch and
//! keyboard) to a `Game`. Natively it plays a headless demo run.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use wasm_bindgen::JsCast;
    use wasm_bindgen::convert::FromWasmAbi;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, Document, Element, EventTarget, HtmlCanvasElement,
        HtmlInputElement, HtmlSelectElement, KeyboardEvent, MouseEvent, TouchEvent, Window,
    };

    use grid_snake::audio::AudioManager;
    use grid_snake::consts::GRID;
    use grid_snake::platform::{
        InputCommand, IntervalScheduler, SwipeTracker, direction_for_button, key_command,
    };
    use grid_snake::renderer::CanvasRenderer;
    use grid_snake::sim::{GameEvent, GameState};
    use grid_snake::{Difficulty, EventListener, Game, Settings, fresh_seed};

    type SharedGame = Rc<RefCell<Game>>;

    /// Score label, pause button label and the game-over alert
    struct Hud {
        score: Option<Element>,
        pause_btn: Option<Element>,
    }

    impl Hud {
        fn set_score(&self, score: u32) {
            if let Some(el) = &self.score {
                el.set_text_content(Some(&format!("Score: {}", score)));
            }
        }

        fn set_pause_label(&self, label: &str) {
            if let Some(el) = &self.pause_btn {
                el.set_text_content(Some(label));
            }
        }
    }

    impl EventListener for Hud {
        fn on_event(&mut self, event: &GameEvent) {
            match *event {
                GameEvent::Ate { score, .. } => self.set_score(score),
                GameEvent::PauseChanged { paused } => {
                    self.set_pause_label(if paused { "Resume" } else { "Pause" })
                }
                GameEvent::GameOver { score, .. } => {
                    self.set_pause_label("Paused");
                    show_game_over(score);
                }
                GameEvent::Restarted => {
                    self.set_score(0);
                    self.set_pause_label("Pause");
                }
                GameEvent::Turn { .. } | GameEvent::SpeedChanged { .. } => {}
            }
        }
    }

    /// Alert after a short delay so the final frame is painted first
    fn show_game_over(score: u32) {
        let Some(window) = web_sys::window() else { return };
        let alert = Closure::once_into_js(move || {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(&format!("Game Over — score: {}", score));
            }
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            alert.unchecked_ref(),
            50,
        );
    }

    /// Attach an event handler for the lifetime of the page
    fn listen<E>(target: &EventTarget, event: &str, passive: bool, handler: impl FnMut(E) + 'static)
    where
        E: FromWasmAbi + 'static,
    {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        let result = if passive {
            let options = AddEventListenerOptions::new();
            options.set_passive(true);
            target.add_event_listener_with_callback_and_add_event_listener_options(
                event,
                closure.as_ref().unchecked_ref(),
                &options,
            )
        } else {
            target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        };
        if let Err(e) = result {
            log::warn!("Failed to listen for {}: {:?}", event, e);
        }
        closure.forget();
    }

    fn viewport(window: &Window) -> (f64, f64) {
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(480.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(480.0);
        (w, h)
    }

    fn is_fullscreen(document: &Document) -> bool {
        document.fullscreen_element().is_some()
    }

    fn resize(game: &SharedGame) {
        let Some(window) = web_sys::window() else { return };
        let fullscreen = window.document().is_some_and(|d| is_fullscreen(&d));
        let (w, h) = viewport(&window);
        game.borrow_mut().resize(w, h, fullscreen);
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Grid Snake starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("game")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #game canvas");
            return;
        };

        let settings = Rc::new(RefCell::new(Settings::load()));
        let base_ms = settings.borrow().base_interval_ms();
        log::info!(
            "Difficulty {}, base {}ms",
            settings.borrow().difficulty.as_str(),
            base_ms
        );

        // The tick callback reaches the game through a weak handle, so the
        // timer never keeps the game alive on its own.
        let state = GameState::new(fresh_seed(), base_ms);
        let game: SharedGame = Rc::new_cyclic(|weak: &Weak<RefCell<Game>>| {
            let weak = weak.clone();
            let on_tick = Closure::<dyn FnMut()>::new(move || {
                let Some(game) = weak.upgrade() else { return };
                // Skip the tick if an input handler is mid-update
                if let Ok(mut game) = game.try_borrow_mut() {
                    game.on_tick();
                }
            });
            RefCell::new(Game::new(state, Box::new(IntervalScheduler::new(on_tick))))
        });

        match CanvasRenderer::new(canvas, GRID) {
            Ok(renderer) => game.borrow_mut().set_renderer(Box::new(renderer)),
            Err(e) => log::warn!("{}, running without a renderer", e),
        }

        let audio = AudioManager::new(settings.borrow().effective_volume());
        {
            let mut g = game.borrow_mut();
            g.add_listener(Box::new(audio.clone()));
            g.add_listener(Box::new(Hud {
                score: document.get_element_by_id("score"),
                pause_btn: document.get_element_by_id("pause"),
            }));
        }

        setup_keyboard(&window, game.clone(), audio.clone());
        setup_swipes(&window, game.clone(), audio.clone(), settings.borrow().swipe_threshold_px);
        setup_touch_buttons(&document, game.clone(), audio.clone());
        setup_buttons(&document, game.clone(), audio.clone());
        setup_speed_controls(&document, game.clone(), settings.clone());
        setup_fullscreen(&window, &document, game.clone(), audio.clone());
        setup_auto_pause(&document, game.clone());

        resize(&game);
        game.borrow_mut().start();

        log::info!("Grid Snake running!");
    }

    fn setup_keyboard(window: &Window, game: SharedGame, audio: AudioManager) {
        // Any click on the page counts as the gesture that unlocks audio
        {
            let audio = audio.clone();
            listen(window.as_ref(), "mousedown", true, move |_event: MouseEvent| {
                audio.unlock();
            });
        }

        listen(window.as_ref(), "keydown", false, move |event: KeyboardEvent| {
            audio.unlock();
            let Some(command) = key_command(&event.key(), &event.code()) else {
                return;
            };
            // Arrows and space would otherwise scroll the page
            event.prevent_default();
            game.borrow_mut().apply(command);
        });
    }

    fn setup_swipes(window: &Window, game: SharedGame, audio: AudioManager, threshold: f64) {
        let swipe = Rc::new(RefCell::new(SwipeTracker::new(threshold)));

        {
            let swipe = swipe.clone();
            listen(window.as_ref(), "touchstart", true, move |event: TouchEvent| {
                audio.unlock();
                let touches = event.touches();
                if let Some(touch) = touches.get(0) {
                    swipe.borrow_mut().touch_start(
                        touches.length(),
                        touch.client_x() as f64,
                        touch.client_y() as f64,
                    );
                }
            });
        }

        {
            let swipe = swipe.clone();
            listen(window.as_ref(), "touchcancel", true, move |_event: TouchEvent| {
                swipe.borrow_mut().cancel();
            });
        }

        listen(window.as_ref(), "touchend", true, move |event: TouchEvent| {
            let Some(touch) = event.changed_touches().get(0) else {
                return;
            };
            let turn = swipe
                .borrow_mut()
                .touch_end(touch.client_x() as f64, touch.client_y() as f64);
            if let Some(direction) = turn {
                game.borrow_mut().apply(InputCommand::Turn(direction));
            }
        });
    }

    fn setup_touch_buttons(document: &Document, game: SharedGame, audio: AudioManager) {
        let Ok(buttons) = document.query_selector_all("#touch-controls .dir") else {
            return;
        };

        for i in 0..buttons.length() {
            let Some(btn) = buttons.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let Some(direction) = direction_for_button(&btn.class_name()) else {
                continue;
            };

            {
                let game = game.clone();
                let audio = audio.clone();
                listen(btn.as_ref(), "touchstart", false, move |event: TouchEvent| {
                    event.prevent_default();
                    audio.unlock();
                    game.borrow_mut().apply(InputCommand::Turn(direction));
                });
            }
            {
                let game = game.clone();
                let audio = audio.clone();
                listen(btn.as_ref(), "mousedown", false, move |event: MouseEvent| {
                    event.prevent_default();
                    audio.unlock();
                    game.borrow_mut().apply(InputCommand::Turn(direction));
                });
            }
        }
    }

    fn setup_buttons(document: &Document, game: SharedGame, audio: AudioManager) {
        if let Some(btn) = document.get_element_by_id("restart") {
            let game = game.clone();
            let audio = audio.clone();
            listen(btn.as_ref(), "click", false, move |_event: MouseEvent| {
                audio.unlock();
                game.borrow_mut().apply(InputCommand::Restart);
            });
        }

        if let Some(btn) = document.get_element_by_id("pause") {
            let game = game.clone();
            listen(btn.as_ref(), "click", false, move |_event: MouseEvent| {
                audio.unlock();
                game.borrow_mut().apply(InputCommand::TogglePause);
            });
        }
    }

    fn setup_speed_controls(document: &Document, game: SharedGame, settings: Rc<RefCell<Settings>>) {
        let slider = document
            .get_element_by_id("sensitivity")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
        let label = document.get_element_by_id("sensitivityValue");

        let show = {
            let slider = slider.clone();
            move |ms: u32| {
                if let Some(slider) = &slider {
                    slider.set_value(&ms.to_string());
                }
                if let Some(label) = &label {
                    label.set_text_content(Some(&ms.to_string()));
                }
            }
        };
        show(settings.borrow().base_interval_ms());

        if let Some(slider) = slider.clone() {
            let game = game.clone();
            let settings = settings.clone();
            let show = show.clone();
            let target = slider.clone();
            listen(target.as_ref(), "input", false, move |_event: web_sys::Event| {
                let Ok(value) = slider.value().parse::<u32>() else {
                    return;
                };
                let ms = settings.borrow_mut().set_slider(value);
                show(ms);
                game.borrow_mut().set_base_interval(ms);
            });
        }

        if let Some(select) = document
            .get_element_by_id("difficulty")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            select.set_value(settings.borrow().difficulty.as_str());
            let target = select.clone();
            listen(target.as_ref(), "change", false, move |_event: web_sys::Event| {
                let Some(difficulty) = Difficulty::from_str(&select.value()) else {
                    log::warn!("Unknown difficulty '{}'", select.value());
                    return;
                };
                let ms = {
                    let mut settings = settings.borrow_mut();
                    settings.apply_difficulty(difficulty);
                    settings.base_interval_ms()
                };
                show(ms);
                log::info!("Difficulty {} ({}ms), restarting", difficulty.as_str(), ms);

                // A preset applies from the start of a run
                let mut g = game.borrow_mut();
                g.set_base_interval(ms);
                g.restart();
            });
        }
    }

    fn setup_fullscreen(window: &Window, document: &Document, game: SharedGame, audio: AudioManager) {
        {
            let game = game.clone();
            listen(window.as_ref(), "resize", false, move |_event: web_sys::Event| {
                resize(&game);
            });
        }

        let Some(btn) = document.get_element_by_id("fullscreenBtn") else {
            return;
        };

        {
            let document = document.clone();
            listen(btn.as_ref(), "click", false, move |event: MouseEvent| {
                event.prevent_default();
                event.stop_propagation();
                audio.unlock();

                if is_fullscreen(&document) {
                    document.exit_fullscreen();
                    return;
                }
                // Prefer the wrapper, fall back to the canvas
                let target = document
                    .query_selector(".canvas-wrapper")
                    .ok()
                    .flatten()
                    .or_else(|| document.get_element_by_id("game"));
                if let Some(target) = target {
                    if let Err(e) = target.request_fullscreen() {
                        log::warn!("Fullscreen toggle failed: {:?}", e);
                    }
                }
            });
        }

        let update = {
            let document = document.clone();
            move || {
                let fullscreen = is_fullscreen(&document);
                btn.set_text_content(Some(if fullscreen { "⤡" } else { "⤢" }));
                let _ = btn.set_attribute("aria-pressed", if fullscreen { "true" } else { "false" });
                resize(&game);
            }
        };
        update();

        for event in ["fullscreenchange", "webkitfullscreenchange"] {
            let update = update.clone();
            listen(document.as_ref(), event, false, move |_event: web_sys::Event| update());
        }
    }

    fn setup_auto_pause(document: &Document, game: SharedGame) {
        let document_clone = document.clone();
        listen(document.as_ref(), "visibilitychange", false, move |_event: web_sys::Event| {
            if document_clone.visibility_state() != web_sys::VisibilityState::Hidden {
                return;
            }
            let mut g = game.borrow_mut();
            if g.state().is_running() {
                g.toggle_pause();
                log::info!("Auto-paused (tab hidden)");
            }
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use grid_snake::{Difficulty, Settings};

    env_logger::init();
    log::info!("Grid Snake (native) starting...");
    log::info!("Native mode plays a headless demo - serve the wasm build for the real game");

    let difficulty = match std::env::args().nth(1) {
        Some(name) => Difficulty::from_str(&name).unwrap_or_else(|| {
            log::warn!("Unknown difficulty '{}', using normal", name);
            Difficulty::Normal
        }),
        None => Difficulty::Normal,
    };

    demo::run(&Settings::from_difficulty(difficulty), demo::MAX_TICKS);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use grid_snake::platform::ManualScheduler;
    use grid_snake::sim::{Cell, Direction, GameEvent, GameState};
    use grid_snake::{Game, Settings, fresh_seed};

    pub const MAX_TICKS: u32 = 5_000;

    /// Play until game over or `max_ticks`, steering greedily toward food
    pub fn run(settings: &Settings, max_ticks: u32) {
        let state = GameState::new(fresh_seed(), settings.base_interval_ms());
        let mut game = Game::new(state, Box::new(ManualScheduler::new()));
        game.add_listener(Box::new(|event: &GameEvent| match event {
            GameEvent::Ate { score, at } => {
                log::info!("Ate at ({}, {}), score {}", at.x, at.y, score)
            }
            GameEvent::SpeedChanged { interval_ms } => log::info!("Speed up: {}ms", interval_ms),
            other => log::debug!("{:?}", other),
        }));
        game.start();

        let mut elapsed_ms: u64 = 0;
        for _ in 0..max_ticks {
            let Some(interval) = game.scheduler().interval_ms() else {
                break;
            };
            elapsed_ms += interval as u64;

            if let Some(direction) = autopilot(game.state()) {
                game.set_direction(direction);
            }
            game.on_tick();
        }

        let state = game.state();
        log::info!(
            "Demo finished: score {}, length {}, {} steps, {:.1}s of play",
            state.score,
            state.snake.len(),
            state.time_ticks,
            elapsed_ms as f64 / 1000.0
        );
        match serde_json::to_string(&state.board()) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize board: {}", e),
        }
    }

    fn step(cell: Cell, direction: Direction, grid: i32) -> Cell {
        (cell + direction.delta()).rem_euclid(Cell::splat(grid))
    }

    /// Distance along one wrapped axis
    fn axis_distance(a: i32, b: i32, grid: i32) -> i32 {
        let d = (a - b).rem_euclid(grid);
        d.min(grid - d)
    }

    /// Safe move that gets closest to the food, if any move is safe
    fn autopilot(state: &GameState) -> Option<Direction> {
        let head = state.head();
        Direction::ALL
            .into_iter()
            .filter(|d| state.direction != Some(d.opposite()))
            .filter(|d| !state.occupies(step(head, *d, state.grid)))
            .min_by_key(|d| {
                let next = step(head, *d, state.grid);
                axis_distance(next.x, state.food.x, state.grid)
                    + axis_distance(next.y, state.food.y, state.grid)
            })
    }
}
