//! Food placement
//!
//! Uniform rejection sampling over the whole grid. Occupancy is normally far
//! below capacity so a free cell turns up within a few draws; the scan
//! fallback only matters for a snake that covers most of the board.

use std::collections::VecDeque;

use rand::Rng;

use super::state::Cell;
use crate::consts::MAX_REJECTION_DRAWS;

/// Pick a uniformly random cell not covered by `snake`.
///
/// Returns `None` when the snake covers every cell.
pub fn place_food<R: Rng + ?Sized>(rng: &mut R, grid: i32, snake: &VecDeque<Cell>) -> Option<Cell> {
    let capacity = (grid * grid) as usize;
    if snake.len() >= capacity {
        return None;
    }

    for _ in 0..MAX_REJECTION_DRAWS {
        let pos = Cell::new(rng.random_range(0..grid), rng.random_range(0..grid));
        if !snake.contains(&pos) {
            return Some(pos);
        }
    }

    log::debug!(
        "Food placement: {} draws missed, scanning {} free cells",
        MAX_REJECTION_DRAWS,
        capacity - snake.len()
    );
    let free: Vec<Cell> = (0..grid)
        .flat_map(|y| (0..grid).map(move |x| Cell::new(x, y)))
        .filter(|cell| !snake.contains(cell))
        .collect();
    if free.is_empty() {
        return None;
    }
    Some(free[rng.random_range(0..free.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_food_avoids_snake() {
        let mut rng = Pcg32::seed_from_u64(1);
        let snake: VecDeque<Cell> = (0..20).map(|x| Cell::new(x, 3)).collect();
        for _ in 0..500 {
            let food = place_food(&mut rng, 20, &snake).unwrap();
            assert!(!snake.contains(&food));
            assert!(food.x >= 0 && food.x < 20 && food.y >= 0 && food.y < 20);
        }
    }

    #[test]
    fn test_full_board_has_no_food() {
        let mut rng = Pcg32::seed_from_u64(2);
        let snake: VecDeque<Cell> = (0..3)
            .flat_map(|y| (0..3).map(move |x| Cell::new(x, y)))
            .collect();
        assert_eq!(place_food(&mut rng, 3, &snake), None);
    }

    #[test]
    fn test_single_free_cell_is_found() {
        let mut rng = Pcg32::seed_from_u64(3);
        let hole = Cell::new(1, 2);
        let snake: VecDeque<Cell> = (0..3)
            .flat_map(|y| (0..3).map(move |x| Cell::new(x, y)))
            .filter(|c| *c != hole)
            .collect();
        assert_eq!(place_food(&mut rng, 3, &snake), Some(hole));
    }

    #[test]
    fn test_placement_covers_every_free_cell() {
        let mut rng = Pcg32::seed_from_u64(4);
        let snake = VecDeque::from([Cell::new(0, 0)]);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2000 {
            seen.insert(place_food(&mut rng, 4, &snake).unwrap());
        }
        assert_eq!(seen.len(), 15);
    }
}
