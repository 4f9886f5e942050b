use rand::Rng;

use crate::config::{GridSize, MAX_FOOD_SAMPLE_ATTEMPTS};
use crate::snake::{Cell, Snake};

/// Picks a uniformly random cell not occupied by the snake.
///
/// Returns `None` only when the snake covers the whole grid.
#[must_use]
pub fn spawn_cell<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize, snake: &Snake) -> Option<Cell> {
    spawn_cell_with_attempts(rng, bounds, snake, MAX_FOOD_SAMPLE_ATTEMPTS)
}

/// Rejection-samples up to `max_attempts` cells, then falls back to a scan
/// over every free cell.
#[must_use]
pub fn spawn_cell_with_attempts<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
    max_attempts: usize,
) -> Option<Cell> {
    for _ in 0..max_attempts {
        let candidate = random_cell(rng, bounds);
        if !snake.occupies(candidate) {
            return Some(candidate);
        }
    }

    log::debug!(
        "food sampling missed {max_attempts} times on a {}x{} grid with {} segments; scanning",
        bounds.width,
        bounds.height,
        snake.len()
    );
    scan_free_cell(rng, bounds, snake)
}

fn random_cell<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize) -> Cell {
    Cell {
        x: rng.gen_range(0..i32::from(bounds.width)),
        y: rng.gen_range(0..i32::from(bounds.height)),
    }
}

fn scan_free_cell<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize, snake: &Snake) -> Option<Cell> {
    let mut candidates = Vec::new();

    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let cell = Cell { x, y };
            if !snake.occupies(cell) {
                candidates.push(cell);
            }
        }
    }

    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}
