//! Game state module - the event-driven state machine
//!
//! A [`GameState`] is an immutable value. [`GameState::reduce`] folds one
//! [`GameEvent`] into it and returns the next state; the input state is never
//! touched. Every step works on "board minus active piece": the active piece is
//! lifted off the grid first and composited back in at the end, so the grid a
//! caller observes always shows the active piece.

use crate::error::CoreError;
use crate::grid::{can_move, fits, place_on_grid, remove_from_grid, Grid};
use crate::progression::{
    hard_drop_score, level_for_lines, score_for_cleared_lines, speed_for_level,
};
use crate::supply::PieceSupply;
use crate::tetromino::{Shape, Tetromino};
use crate::types::{GameEvent, GameKey, LINE_CLEAR_SCORES};

/// Complete game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Board including the active piece
    grid: Grid,
    current: Tetromino,
    next: Tetromino,
    supply: PieceSupply,
    level: u32,
    score: u32,
    lines: u32,
    /// Tick interval in milliseconds, derived from `level`
    speed: u32,
    paused: bool,
    over: bool,
}

impl GameState {
    /// Start a new game on an empty board with a bag supply seeded by `seed`.
    pub fn new(seed: u32) -> Result<Self, CoreError> {
        Self::with_supply(Grid::new(), PieceSupply::new(seed))
    }

    /// Start a game on an arbitrary board.
    ///
    /// If the first piece does not fit at its spawn position the game starts
    /// already over.
    pub fn with_supply(grid: Grid, mut supply: PieceSupply) -> Result<Self, CoreError> {
        let current = supply.draw()?;
        let next = supply.peek()?;
        let over = !fits(&current, &grid);
        let level = level_for_lines(0);

        Ok(Self {
            grid: place_on_grid(&current, &grid),
            current,
            next,
            supply,
            level,
            score: 0,
            lines: 0,
            speed: speed_for_level(level),
            paused: false,
            over,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The board without the active piece
    pub fn board(&self) -> Grid {
        remove_from_grid(&self.current, &self.grid)
    }

    pub fn current(&self) -> &Tetromino {
        &self.current
    }

    pub fn next(&self) -> &Tetromino {
        &self.next
    }

    pub fn supply(&self) -> &PieceSupply {
        &self.supply
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn over(&self) -> bool {
        self.over
    }

    /// Whether gravity and keys currently have any effect
    pub fn playable(&self) -> bool {
        !self.over && !self.paused
    }

    /// Produce the state that follows `event`.
    ///
    /// Pause events only set the flag. Ticks and keys are ignored while paused
    /// or once the game is over.
    pub fn reduce(&self, event: &GameEvent) -> Self {
        let mut next = self.clone();

        if let GameEvent::Pause(paused) = *event {
            next.paused = paused;
            return next;
        }
        if !self.playable() {
            return next;
        }

        next.grid = remove_from_grid(&next.current, &next.grid);
        match *event {
            GameEvent::Loop => {
                next.drop_step();
            }
            GameEvent::KeyUp(key) => next.apply_key(key),
            GameEvent::Pause(_) => {}
        }
        // A topped-out spawn is drawn over the stack as well.
        next.grid = place_on_grid(&next.current, &next.grid);
        next
    }

    fn apply_key(&mut self, key: GameKey) {
        match key {
            GameKey::Left => self.try_shift(-1),
            GameKey::Right => self.try_shift(1),
            GameKey::RotateCw => self.try_rotate(self.current.shape.rotate()),
            GameKey::RotateCcw => self.try_rotate(self.current.shape.rotate_ccw()),
            GameKey::HardDrop => self.hard_drop(),
            GameKey::SoftDrop => {
                self.drop_step();
            }
        }
    }

    fn try_shift(&mut self, dx: i8) {
        if can_move(&self.current, dx, 0, &self.grid) {
            self.current = self.current.shifted(dx, 0);
        }
    }

    /// Rotate in place; no kicks, so anything blocked is refused
    fn try_rotate(&mut self, shape: Shape) {
        let rotated = self.current.with_shape(shape);
        if fits(&rotated, &self.grid) {
            self.current = rotated;
        }
    }

    /// Move the piece down one row, or lock it if it cannot move.
    /// Returns true if the piece moved.
    fn drop_step(&mut self) -> bool {
        let moved = can_move(&self.current, 0, 1, &self.grid);
        if moved {
            self.current = self.current.shifted(0, 1);
        } else {
            self.grid = place_on_grid(&self.current, &self.grid);
        }

        self.clear_lines();

        if !moved {
            self.spawn_next();
        }
        moved
    }

    fn hard_drop(&mut self) {
        let mut rows = 0;
        while self.drop_step() {
            rows += 1;
        }
        self.score += hard_drop_score(rows);
    }

    /// Clear full rows and recompute score, lines, level and speed
    fn clear_lines(&mut self) {
        let cleared = self.grid.clear_full_rows().len();
        if cleared == 0 {
            return;
        }

        let bonus = score_for_cleared_lines(cleared)
            .unwrap_or(LINE_CLEAR_SCORES[LINE_CLEAR_SCORES.len() - 1]);
        self.score += bonus;
        self.lines += cleared as u32;
        self.level = level_for_lines(self.lines);
        self.speed = speed_for_level(self.level);
    }

    /// Promote the lookahead piece and peek a new one.
    ///
    /// The game ends if the new piece overlaps the stack at its spawn
    /// position or the supply cannot provide it.
    fn spawn_next(&mut self) {
        let drawn = match self.supply.draw() {
            Ok(piece) => piece,
            Err(_) => {
                self.over = true;
                return;
            }
        };
        self.current = drawn;

        match self.supply.peek() {
            Ok(piece) => self.next = piece,
            Err(_) => self.over = true,
        }

        if !fits(&self.current, &self.grid) {
            self.over = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ShapeKind, BOARD_WIDTH};

    fn scripted(kinds: &[ShapeKind]) -> GameState {
        GameState::with_supply(Grid::new(), PieceSupply::scripted(kinds.iter().copied())).unwrap()
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345).unwrap();

        assert!(!state.over);
        assert!(!state.paused);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lines, 0);
        assert_eq!(state.speed, 800);
        assert_eq!(state.grid.occupied_count(), 4);
        assert_eq!(state.board().occupied_count(), 0);
        assert_eq!(state.supply.peek().unwrap(), state.next);
    }

    #[test]
    fn test_reduce_does_not_touch_input() {
        let state = scripted(&[ShapeKind::T, ShapeKind::O, ShapeKind::I]);
        let before = state.clone();
        let after = state.reduce(&GameEvent::Loop);

        assert_eq!(state, before);
        assert_eq!(after.current.origin_y, before.current.origin_y + 1);
    }

    #[test]
    fn test_pause_only_sets_flag() {
        let state = scripted(&[ShapeKind::T, ShapeKind::O]);
        let paused = state.reduce(&GameEvent::Pause(true));

        assert!(paused.paused);
        assert_eq!(paused.grid, state.grid);
        assert_eq!(paused.current, state.current);

        let resumed = paused.reduce(&GameEvent::Pause(false));
        assert!(!resumed.paused);
    }

    #[test]
    fn test_loop_ignored_while_paused() {
        let state = scripted(&[ShapeKind::T, ShapeKind::O]).reduce(&GameEvent::Pause(true));
        let after = state.reduce(&GameEvent::Loop);
        assert_eq!(after, state);

        let after = state.reduce(&GameEvent::KeyUp(GameKey::Left));
        assert_eq!(after, state);
    }

    #[test]
    fn test_shift_moves_piece_and_grid() {
        let state = scripted(&[ShapeKind::T, ShapeKind::O]);
        let after = state.reduce(&GameEvent::KeyUp(GameKey::Right));

        assert_eq!(after.current.origin_x, 4);
        assert_eq!(after.grid.get(3, 1), Some(0));
        assert_eq!(after.grid.get(6, 1), Some(ShapeKind::T.color_id()));
    }

    #[test]
    fn test_shift_blocked_by_stack() {
        let mut grid = Grid::new();
        grid.set(2, 1, 1);
        let state =
            GameState::with_supply(grid, PieceSupply::scripted([ShapeKind::T, ShapeKind::O]))
                .unwrap();

        let after = state.reduce(&GameEvent::KeyUp(GameKey::Left));
        assert_eq!(after.current.origin_x, 3);
    }

    #[test]
    fn test_rotation_refused_at_wall() {
        let mut state = scripted(&[ShapeKind::T, ShapeKind::O]);
        state = state.reduce(&GameEvent::KeyUp(GameKey::RotateCw));
        for _ in 0..5 {
            state = state.reduce(&GameEvent::KeyUp(GameKey::Left));
        }
        // Pointing right, the T's left column is empty, so it can hang off the wall.
        assert_eq!(state.current.origin_x, -1);

        let shape_before = state.current.shape;
        let after = state.reduce(&GameEvent::KeyUp(GameKey::RotateCcw));
        assert_eq!(after.current.shape, shape_before);
        assert_eq!(after.current.origin_x, -1);
    }

    #[test]
    fn test_soft_drop_moves_one_row() {
        let state = scripted(&[ShapeKind::T, ShapeKind::O]);
        let after = state.reduce(&GameEvent::KeyUp(GameKey::SoftDrop));
        assert_eq!(after.current.origin_y, 1);
        assert_eq!(after.score, 0);
    }

    #[test]
    fn test_hard_drop_scores_rows() {
        let state = scripted(&[ShapeKind::T, ShapeKind::O, ShapeKind::I]);
        let after = state.reduce(&GameEvent::KeyUp(GameKey::HardDrop));

        // T occupies rows 0-1 at spawn; it falls 18 rows to the floor.
        assert_eq!(after.score, 36);
        assert_eq!(after.current.kind(), ShapeKind::O);
        assert_eq!(after.next.kind(), ShapeKind::I);
        assert_eq!(after.grid.get(4, 18), Some(ShapeKind::T.color_id()));
        assert_eq!(after.grid.get(3, 19), Some(ShapeKind::T.color_id()));
    }

    #[test]
    fn test_clear_lines_updates_progression() {
        let mut state = scripted(&[ShapeKind::T, ShapeKind::O]);
        state.lines = 9;
        for x in 0..BOARD_WIDTH as i8 {
            state.grid.set(x, 19, 1);
        }
        state.clear_lines();

        assert_eq!(state.lines, 10);
        assert_eq!(state.score, 100);
        assert_eq!(state.level, 2);
        assert_eq!(state.speed, 720);
    }

    #[test]
    fn test_underrun_ends_game() {
        let state = scripted(&[ShapeKind::T, ShapeKind::O]);
        let after = state.reduce(&GameEvent::KeyUp(GameKey::HardDrop));

        assert_eq!(after.current.kind(), ShapeKind::O);
        assert!(after.over);
    }

    #[test]
    fn test_top_out_sets_over() {
        let mut grid = Grid::new();
        for y in 2..20 {
            for x in 0..9 {
                grid.set(x, y, 3);
            }
        }
        let state = GameState::with_supply(
            grid,
            PieceSupply::scripted([ShapeKind::O, ShapeKind::O, ShapeKind::O]),
        )
        .unwrap();

        // First O lands on row 0-1 with nowhere to fall.
        let after = state.reduce(&GameEvent::Loop);
        assert!(after.over);

        // Further ticks and keys are ignored.
        assert_eq!(after.reduce(&GameEvent::Loop), after);
        assert_eq!(after.reduce(&GameEvent::KeyUp(GameKey::Left)), after);
    }

    #[test]
    fn test_blocked_spawn_starts_over() {
        let mut grid = Grid::new();
        grid.set(4, 1, 2);
        let state =
            GameState::with_supply(grid, PieceSupply::scripted([ShapeKind::T, ShapeKind::O]))
                .unwrap();
        assert!(state.over);
    }

    #[test]
    fn test_with_supply_needs_two_pieces() {
        let result = GameState::with_supply(Grid::new(), PieceSupply::scripted([ShapeKind::T]));
        assert_eq!(result, Err(CoreError::SupplyUnderrun));
    }
}
