use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GridSize;
use crate::food;
use crate::input::{Heading, heading_change_is_valid};
use crate::snake::{Cell, Snake};

/// Whether the simulation is still advancing.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RunState {
    Running,
    Terminated,
}

/// Why the last game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TerminationCause {
    WallCollision,
    SelfCollision,
    /// The snake covers every cell, so no food can be placed.
    BoardFilled,
}

/// Authoritative state of one snake game.
///
/// Only [`GameState::tick`] moves the snake. Input goes through
/// [`GameState::set_direction`] and restarts through [`GameState::reset`].
/// The random source is a type parameter so tests can inject a seeded one.
#[derive(Debug, Clone)]
pub struct GameState<R = StdRng> {
    grid: GridSize,
    snake: Snake,
    food: Cell,
    heading: Heading,
    score: u32,
    run_state: RunState,
    termination_cause: Option<TerminationCause>,
    tick_count: u64,
    rng: R,
}

impl GameState<StdRng> {
    /// Creates a fresh game with an entropy-seeded random source.
    #[must_use]
    pub fn new(grid: GridSize) -> Self {
        Self::with_rng(grid, StdRng::from_entropy())
    }

    /// Creates a deterministic game for tests and reproducible sessions.
    #[must_use]
    pub fn new_with_seed(grid: GridSize, seed: u64) -> Self {
        Self::with_rng(grid, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameState<R> {
    /// Creates a fresh game drawing food positions from `rng`.
    #[must_use]
    pub fn with_rng(grid: GridSize, rng: R) -> Self {
        let snake = Snake::centered(grid);
        let food = snake.head();
        let mut state = Self {
            grid,
            snake,
            food,
            heading: Heading::Right,
            score: 0,
            run_state: RunState::Running,
            termination_cause: None,
            tick_count: 0,
            rng,
        };
        state.reset();
        state
    }

    /// Builds a running game from explicit parts, for scripted scenarios.
    #[must_use]
    pub fn from_parts(grid: GridSize, snake: Snake, heading: Heading, food: Cell, rng: R) -> Self {
        Self {
            grid,
            snake,
            food,
            heading,
            score: 0,
            run_state: RunState::Running,
            termination_cause: None,
            tick_count: 0,
            rng,
        }
    }

    /// Restores the starting position: centered two-segment snake heading
    /// right, zero score, fresh food.
    pub fn reset(&mut self) {
        self.snake = Snake::centered(self.grid);
        self.heading = Heading::Right;
        self.score = 0;
        self.run_state = RunState::Running;
        self.termination_cause = None;
        self.tick_count = 0;
        self.spawn_food();

        log::debug!(
            "game reset on {}x{} grid, food at ({}, {})",
            self.grid.width,
            self.grid.height,
            self.food.x,
            self.food.y
        );
    }

    /// Applies a heading change right away; reversals and input after game
    /// over are ignored. The last accepted request before a tick wins.
    pub fn set_direction(&mut self, requested: Heading) {
        if self.run_state != RunState::Running {
            return;
        }

        if heading_change_is_valid(self.heading, requested) {
            self.heading = requested;
        }
    }

    /// Advances the simulation by one step.
    pub fn tick(&mut self) {
        if self.run_state != RunState::Running {
            return;
        }

        self.tick_count += 1;

        let new_head = self.snake.head().step(self.heading);
        let ate = new_head == self.food;
        // Growth keeps the tail, so collision checks below see the vacated
        // tail cell only when the snake did not eat.
        self.snake.advance(new_head, ate);

        if ate {
            self.score += 1;
            self.spawn_food();
        }

        if !new_head.is_within_bounds(self.grid) {
            self.terminate(TerminationCause::WallCollision);
        } else if self.snake.head_overlaps_body() {
            self.terminate(TerminationCause::SelfCollision);
        }
    }

    fn spawn_food(&mut self) {
        match food::spawn_cell(&mut self.rng, self.grid, &self.snake) {
            Some(cell) => self.food = cell,
            None => self.terminate(TerminationCause::BoardFilled),
        }
    }

    fn terminate(&mut self, cause: TerminationCause) {
        self.run_state = RunState::Terminated;
        self.termination_cause = Some(cause);

        log::info!(
            "game over after {} ticks: {cause:?}, score {}, length {}",
            self.tick_count,
            self.score,
            self.snake.len()
        );
    }
}

impl<R> GameState<R> {
    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn food(&self) -> Cell {
        self.food
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    #[must_use]
    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Returns the reason for the last game over, if the game has ended.
    #[must_use]
    pub fn termination_cause(&self) -> Option<TerminationCause> {
        self.termination_cause
    }

    /// Number of steps applied since the last reset.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::GridSize;
    use crate::input::Heading;
    use crate::snake::{Cell, Snake};

    use super::{GameState, RunState, TerminationCause};

    fn scripted(segments: Vec<Cell>, heading: Heading, food: Cell) -> GameState {
        GameState::from_parts(
            GridSize::default(),
            Snake::from_segments(segments),
            heading,
            food,
            StdRng::seed_from_u64(5),
        )
    }

    fn segments(state: &GameState) -> Vec<Cell> {
        state.snake().segments().copied().collect()
    }

    #[test]
    fn new_game_starts_centered_heading_right() {
        let state = GameState::new_with_seed(GridSize::default(), 1);

        assert_eq!(segments(&state), vec![Cell::new(15, 10), Cell::new(14, 10)]);
        assert_eq!(state.heading(), Heading::Right);
        assert_eq!(state.score(), 0);
        assert_eq!(state.run_state(), RunState::Running);
        assert!(!state.snake().occupies(state.food()));
    }

    #[test]
    fn tick_moves_without_growing() {
        let mut state = scripted(
            vec![Cell::new(15, 10), Cell::new(14, 10)],
            Heading::Right,
            Cell::new(0, 0),
        );

        state.tick();

        assert_eq!(segments(&state), vec![Cell::new(16, 10), Cell::new(15, 10)]);
        assert_eq!(state.score(), 0);
        assert_eq!(state.tick_count(), 1);
    }

    #[test]
    fn eating_keeps_tail_and_scores() {
        let mut state = scripted(
            vec![Cell::new(5, 5), Cell::new(4, 5)],
            Heading::Right,
            Cell::new(6, 5),
        );

        state.tick();

        assert_eq!(
            segments(&state),
            vec![Cell::new(6, 5), Cell::new(5, 5), Cell::new(4, 5)]
        );
        assert_eq!(state.score(), 1);
        assert_ne!(state.food(), Cell::new(6, 5));
        assert!(!state.snake().occupies(state.food()));
        assert_eq!(state.run_state(), RunState::Running);
    }

    #[test]
    fn leaving_the_grid_terminates_and_freezes() {
        let mut state = scripted(
            vec![Cell::new(0, 5), Cell::new(1, 5)],
            Heading::Left,
            Cell::new(20, 10),
        );

        state.tick();
        assert_eq!(state.run_state(), RunState::Terminated);
        assert_eq!(
            state.termination_cause(),
            Some(TerminationCause::WallCollision)
        );
        assert_eq!(state.snake().head(), Cell::new(-1, 5));

        let frozen = segments(&state);
        state.tick();
        state.tick();
        assert_eq!(segments(&state), frozen);
        assert_eq!(state.tick_count(), 1);
    }

    #[test]
    fn bottom_and_right_edges_are_exclusive() {
        let mut down = scripted(
            vec![Cell::new(3, 19), Cell::new(3, 18)],
            Heading::Down,
            Cell::new(0, 0),
        );
        down.tick();
        assert_eq!(down.run_state(), RunState::Terminated);

        let mut right = scripted(
            vec![Cell::new(29, 3), Cell::new(28, 3)],
            Heading::Right,
            Cell::new(0, 0),
        );
        right.tick();
        assert_eq!(right.run_state(), RunState::Terminated);
    }

    #[test]
    fn running_into_body_terminates() {
        let mut state = scripted(
            vec![
                Cell::new(1, 1),
                Cell::new(2, 1),
                Cell::new(2, 2),
                Cell::new(1, 2),
                Cell::new(0, 2),
            ],
            Heading::Down,
            Cell::new(10, 10),
        );

        state.tick();

        assert_eq!(state.run_state(), RunState::Terminated);
        assert_eq!(
            state.termination_cause(),
            Some(TerminationCause::SelfCollision)
        );
    }

    #[test]
    fn moving_into_vacated_tail_is_safe() {
        let mut state = scripted(
            vec![
                Cell::new(1, 1),
                Cell::new(2, 1),
                Cell::new(2, 2),
                Cell::new(1, 2),
            ],
            Heading::Down,
            Cell::new(10, 10),
        );

        state.tick();

        assert_eq!(state.run_state(), RunState::Running);
        assert_eq!(state.snake().head(), Cell::new(1, 2));
        assert_eq!(state.snake().len(), 4);
    }

    #[test]
    fn reverse_direction_is_rejected() {
        let mut state = scripted(
            vec![Cell::new(5, 5), Cell::new(6, 5)],
            Heading::Left,
            Cell::new(0, 0),
        );

        state.set_direction(Heading::Right);
        assert_eq!(state.heading(), Heading::Left);

        state.set_direction(Heading::Up);
        assert_eq!(state.heading(), Heading::Up);
    }

    #[test]
    fn last_direction_before_tick_wins() {
        let mut state = GameState::new_with_seed(GridSize::default(), 8);

        state.set_direction(Heading::Up);
        state.set_direction(Heading::Down);
        assert_eq!(state.heading(), Heading::Up);

        state.set_direction(Heading::Left);
        assert_eq!(state.heading(), Heading::Left);
    }

    #[test]
    fn direction_is_ignored_after_game_over() {
        let mut state = scripted(
            vec![Cell::new(0, 5), Cell::new(1, 5)],
            Heading::Left,
            Cell::new(20, 10),
        );
        state.tick();

        state.set_direction(Heading::Up);

        assert_eq!(state.heading(), Heading::Left);
    }

    #[test]
    fn reset_restores_start_state_repeatedly() {
        let mut state = scripted(
            vec![Cell::new(0, 5), Cell::new(1, 5)],
            Heading::Left,
            Cell::new(20, 10),
        );
        state.tick();
        assert_eq!(state.run_state(), RunState::Terminated);

        for _ in 0..5 {
            state.reset();

            assert_eq!(segments(&state), vec![Cell::new(15, 10), Cell::new(14, 10)]);
            assert_eq!(state.heading(), Heading::Right);
            assert_eq!(state.score(), 0);
            assert_eq!(state.run_state(), RunState::Running);
            assert_eq!(state.termination_cause(), None);
            assert!(state.food().is_within_bounds(state.grid()));
            assert!(!state.snake().occupies(state.food()));
        }
    }

    #[test]
    fn filling_the_board_ends_the_game() {
        let grid = GridSize::new(3, 1).expect("3x1 grid is valid");
        let mut state = GameState::from_parts(
            grid,
            Snake::from_segments(vec![Cell::new(1, 0), Cell::new(0, 0)]),
            Heading::Right,
            Cell::new(2, 0),
            StdRng::seed_from_u64(0),
        );

        state.tick();

        assert_eq!(state.score(), 1);
        assert_eq!(state.snake().len(), 3);
        assert_eq!(state.run_state(), RunState::Terminated);
        assert_eq!(state.termination_cause(), Some(TerminationCause::BoardFilled));
    }
}
