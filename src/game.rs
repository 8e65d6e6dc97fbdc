//! Game owner
//!
//! `Game` is the only thing that mutates a `GameState` at runtime. Ticks,
//! input and speed changes all go through it, one call at a time, and every
//! call ends by routing the state's events: speed changes re-arm the timer,
//! game over stops it, and listeners (sound, HUD) hear about everything.

use crate::platform::{InputCommand, Scheduler};
use crate::renderer::Renderer;
use crate::sim::{self, Direction, GameEvent, GamePhase, GameState, TickOutcome};

/// Observer for game events. Must not block; failures are its own business.
pub trait EventListener {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F: FnMut(&GameEvent)> EventListener for F {
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

pub struct Game {
    state: GameState,
    scheduler: Box<dyn Scheduler>,
    renderer: Option<Box<dyn Renderer>>,
    listeners: Vec<Box<dyn EventListener>>,
}

impl Game {
    pub fn new(state: GameState, scheduler: Box<dyn Scheduler>) -> Self {
        Self {
            state,
            scheduler,
            renderer: None,
            listeners: Vec::new(),
        }
    }

    pub fn set_renderer(&mut self, renderer: Box<dyn Renderer>) {
        self.renderer = Some(renderer);
    }

    pub fn add_listener(&mut self, listener: Box<dyn EventListener>) {
        self.listeners.push(listener);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scheduler(&self) -> &dyn Scheduler {
        self.scheduler.as_ref()
    }

    /// Arm the tick timer and draw the first frame
    pub fn start(&mut self) {
        log::info!(
            "Game started: seed {}, {}ms per step",
            self.state.seed,
            self.state.tick_interval_ms
        );
        self.scheduler.start(self.state.tick_interval_ms);
        self.redraw();
    }

    /// Timer callback: advance one step
    pub fn on_tick(&mut self) -> TickOutcome {
        let outcome = sim::tick(&mut self.state);
        self.dispatch_events();
        if outcome != TickOutcome::Skipped {
            self.redraw();
        }
        outcome
    }

    /// Apply a decoded input, whatever its source
    pub fn apply(&mut self, command: InputCommand) {
        match command {
            InputCommand::Turn(direction) => {
                self.set_direction(direction);
            }
            InputCommand::TogglePause => {
                self.toggle_pause();
            }
            InputCommand::Restart => self.restart(),
        }
    }

    pub fn set_direction(&mut self, direction: Direction) -> bool {
        let accepted = sim::set_direction(&mut self.state, direction);
        self.dispatch_events();
        accepted
    }

    pub fn toggle_pause(&mut self) -> GamePhase {
        let phase = sim::toggle_pause(&mut self.state);
        self.dispatch_events();
        phase
    }

    /// New run; replaces the tick timer
    pub fn restart(&mut self) {
        sim::restart(&mut self.state);
        self.dispatch_events();
        self.redraw();
    }

    /// Live base-speed change (slider or difficulty)
    pub fn set_base_interval(&mut self, base_ms: u32) {
        sim::set_base_interval(&mut self.state, base_ms);
        self.dispatch_events();
    }

    /// Viewport changed
    pub fn resize(&mut self, viewport_w: f64, viewport_h: f64, fullscreen: bool) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.resize(viewport_w, viewport_h, fullscreen);
        }
        self.redraw();
    }

    pub fn redraw(&mut self) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        if let Err(e) = renderer.draw(&self.state.board()) {
            log::warn!("{}", e);
        }
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::SpeedChanged { interval_ms } if self.scheduler.is_active() => {
                    self.scheduler.reschedule(interval_ms);
                }
                GameEvent::GameOver { .. } => self.scheduler.stop(),
                GameEvent::Restarted => self.scheduler.reschedule(self.state.tick_interval_ms),
                _ => {}
            }
            for listener in &mut self.listeners {
                listener.on_event(&event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ManualScheduler;
    use crate::renderer::RenderError;
    use crate::sim::{BoardView, Cell, GameOverReason};
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    #[derive(Default)]
    struct Frames {
        heads: Vec<Cell>,
    }

    struct RecordingRenderer(Rc<RefCell<Frames>>);

    impl Renderer for RecordingRenderer {
        fn draw(&mut self, board: &BoardView<'_>) -> Result<(), RenderError> {
            self.0.borrow_mut().heads.push(board.snake[0]);
            Ok(())
        }
    }

    struct BrokenRenderer;

    impl Renderer for BrokenRenderer {
        fn draw(&mut self, _board: &BoardView<'_>) -> Result<(), RenderError> {
            Err(RenderError("surface lost".into()))
        }
    }

    fn recorded_events(game: &mut Game) -> Rc<RefCell<Vec<GameEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        game.add_listener(Box::new(move |event: &GameEvent| {
            sink.borrow_mut().push(*event)
        }));
        events
    }

    fn started(state: GameState) -> Game {
        let mut game = Game::new(state, Box::new(ManualScheduler::new()));
        game.start();
        game
    }

    fn about_to_eat(score: u32) -> GameState {
        let mut state = GameState::new(77, 100);
        state.snake = VecDeque::from([Cell::new(10, 10)]);
        state.food = Cell::new(11, 10);
        state.score = score;
        state
    }

    #[test]
    fn test_runs_without_collaborators() {
        let mut game = started(GameState::new(1, 120));
        assert_eq!(game.scheduler().interval_ms(), Some(120));

        assert_eq!(game.on_tick(), TickOutcome::Waiting);
        game.apply(InputCommand::Turn(Direction::Up));
        let outcome = game.on_tick();
        assert!(matches!(outcome, TickOutcome::Moved | TickOutcome::Ate));
    }

    #[test]
    fn test_speed_change_reschedules() {
        let mut game = started(about_to_eat(4));
        let events = recorded_events(&mut game);

        game.set_direction(Direction::Right);
        assert_eq!(game.on_tick(), TickOutcome::Ate);
        assert_eq!(game.state().score, 5);
        assert_eq!(game.scheduler().interval_ms(), Some(92));

        let events = events.borrow();
        assert_eq!(
            events[0],
            GameEvent::Turn {
                direction: Direction::Right
            }
        );
        assert!(matches!(events[1], GameEvent::Ate { score: 5, .. }));
        assert_eq!(events[2], GameEvent::SpeedChanged { interval_ms: 92 });
    }

    #[test]
    fn test_game_over_stops_timer_and_restart_rearms() {
        let mut state = GameState::new(5, 100);
        state.snake = [(5, 5), (6, 5), (6, 6), (5, 6)]
            .iter()
            .map(|&(x, y)| Cell::new(x, y))
            .collect();
        state.food = Cell::new(0, 0);
        let mut game = started(state);
        let events = recorded_events(&mut game);

        game.set_direction(Direction::Right);
        assert_eq!(game.on_tick(), TickOutcome::Ended);
        assert!(!game.scheduler().is_active());
        assert!(events.borrow().contains(&GameEvent::GameOver {
            score: 0,
            reason: GameOverReason::SelfCollision
        }));

        // Slider moves while stopped don't revive the timer
        game.set_base_interval(200);
        assert!(!game.scheduler().is_active());

        game.apply(InputCommand::Restart);
        assert_eq!(game.state().phase, GamePhase::Idle);
        assert_eq!(game.scheduler().interval_ms(), Some(200));
        assert_eq!(events.borrow().last(), Some(&GameEvent::Restarted));
    }

    #[test]
    fn test_slider_reschedules_running_timer() {
        let mut game = started(GameState::new(8, 120));
        game.set_base_interval(60);
        assert_eq!(game.scheduler().interval_ms(), Some(60));
        game.set_base_interval(10);
        assert_eq!(game.scheduler().interval_ms(), Some(40));
    }

    #[test]
    fn test_renders_after_ticks_but_not_while_paused() {
        let frames = Rc::new(RefCell::new(Frames::default()));
        let mut state = GameState::new(3, 100);
        state.food = Cell::new(0, 0);
        let mut game = Game::new(state, Box::new(ManualScheduler::new()));
        game.set_renderer(Box::new(RecordingRenderer(frames.clone())));
        game.start();
        assert_eq!(frames.borrow().heads.len(), 1);

        game.on_tick();
        assert_eq!(frames.borrow().heads.len(), 2);

        game.apply(InputCommand::Turn(Direction::Down));
        game.on_tick();
        assert_eq!(frames.borrow().heads.last(), Some(&Cell::new(10, 11)));

        game.apply(InputCommand::TogglePause);
        assert_eq!(game.on_tick(), TickOutcome::Skipped);
        assert_eq!(frames.borrow().heads.len(), 3);

        game.resize(800.0, 600.0, false);
        assert_eq!(frames.borrow().heads.len(), 4);

        game.apply(InputCommand::Restart);
        assert_eq!(frames.borrow().heads.len(), 5);
        assert_eq!(frames.borrow().heads.last(), Some(&Cell::new(10, 10)));
    }

    #[test]
    fn test_broken_renderer_does_not_stop_game() {
        let mut state = GameState::new(3, 100);
        state.food = Cell::new(0, 0);
        let mut game = Game::new(state, Box::new(ManualScheduler::new()));
        game.set_renderer(Box::new(BrokenRenderer));
        game.start();

        game.set_direction(Direction::Left);
        assert_eq!(game.on_tick(), TickOutcome::Moved);
        assert_eq!(game.state().head(), Cell::new(9, 10));
    }

    #[test]
    fn test_pause_events_reach_listeners() {
        let mut game = started(GameState::new(4, 100));
        let events = recorded_events(&mut game);

        assert_eq!(game.toggle_pause(), GamePhase::Paused);
        assert_eq!(game.toggle_pause(), GamePhase::Idle);
        assert_eq!(
            *events.borrow(),
            vec![
                GameEvent::PauseChanged { paused: true },
                GameEvent::PauseChanged { paused: false }
            ]
        );
        // Pausing leaves the timer armed; ticks are simply skipped
        assert!(game.scheduler().is_active());
    }
}
