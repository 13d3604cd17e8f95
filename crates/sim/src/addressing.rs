//! Chunk-major addressing.
//!
//! Storage is laid out chunk by chunk: all cells of chunk (0, 0) first, then
//! chunk (1, 0), and so on along the row of chunks. Inside a chunk cells are
//! row-major. `y = 0` is the bottom row of the world.
//!
//! These functions never check bounds on the hot path except in
//! [`to_index`], which fails fast: an out-of-range position is a caller bug
//! and must never wrap into a neighbouring slot.

use crate::config::GridConfig;
use glam::IVec2;

/// True if `pos` lies inside `[0, width) x [0, height)`.
#[inline]
pub fn in_bounds(pos: IVec2, config: &GridConfig) -> bool {
    let size = config.size();
    pos.x >= 0 && pos.y >= 0 && pos.x < size.x && pos.y < size.y
}

/// Chunk coordinates containing `pos`.
#[inline]
pub fn to_chunk(pos: IVec2, config: &GridConfig) -> IVec2 {
    pos / config.chunk_size as i32
}

/// Flat storage slot for `pos`.
///
/// # Panics
/// Panics if `pos` is outside the grid.
#[inline]
pub fn to_index(pos: IVec2, config: &GridConfig) -> usize {
    assert!(
        in_bounds(pos, config),
        "position {pos} outside {}x{} grid",
        config.width(),
        config.height()
    );
    let cs = config.chunk_size as usize;
    let x = pos.x as usize;
    let y = pos.y as usize;
    let (cx, cy) = (x / cs, y / cs);
    let in_chunk = (y - cy * cs) * cs + (x - cx * cs);
    (cy * config.chunks.x as usize + cx) * config.chunk_area() + in_chunk
}

/// Bounds-checked [`to_index`] for untrusted input.
#[inline]
pub fn try_index(pos: IVec2, config: &GridConfig) -> Option<usize> {
    in_bounds(pos, config).then(|| to_index(pos, config))
}

/// World position stored at slot `index`. Inverse of [`to_index`].
#[inline]
pub fn to_position(index: usize, config: &GridConfig) -> IVec2 {
    debug_assert!(index < config.cell_count());
    let cs = config.chunk_size as usize;
    let chunk = index / config.chunk_area();
    let in_chunk = index - chunk * config.chunk_area();
    let cx = chunk % config.chunks.x as usize;
    let cy = chunk / config.chunks.x as usize;
    IVec2::new(
        (cx * cs + in_chunk % cs) as i32,
        (cy * cs + in_chunk / cs) as i32,
    )
}

/// Chunk coordinates of the chunk with linear id `chunk` (chunk-major order).
#[inline]
pub fn chunk_coords(chunk: usize, config: &GridConfig) -> IVec2 {
    let per_row = config.chunks.x as usize;
    IVec2::new((chunk % per_row) as i32, (chunk / per_row) as i32)
}

/// Storage range occupied by chunk `chunk`.
#[inline]
pub fn chunk_slots(chunk: usize, config: &GridConfig) -> std::ops::Range<usize> {
    let area = config.chunk_area();
    chunk * area..(chunk + 1) * area
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GridConfig {
        GridConfig::new(4, 3, 2).unwrap()
    }

    #[test]
    fn index_calculation() {
        let config = config();
        assert_eq!(to_index(IVec2::new(0, 0), &config), 0);
        assert_eq!(to_index(IVec2::new(3, 0), &config), 3);
        assert_eq!(to_index(IVec2::new(0, 1), &config), 4);
        assert_eq!(to_index(IVec2::new(3, 3), &config), 15);
        // First cell of chunk (1, 0)
        assert_eq!(to_index(IVec2::new(4, 0), &config), 16);
        // First cell of chunk (0, 1)
        assert_eq!(to_index(IVec2::new(0, 4), &config), 48);
        // Last cell overall
        assert_eq!(to_index(IVec2::new(11, 7), &config), 95);
    }

    #[test]
    fn chunk_coordinates() {
        let config = config();
        assert_eq!(to_chunk(IVec2::new(0, 0), &config), IVec2::new(0, 0));
        assert_eq!(to_chunk(IVec2::new(3, 3), &config), IVec2::new(0, 0));
        assert_eq!(to_chunk(IVec2::new(4, 3), &config), IVec2::new(1, 0));
        assert_eq!(to_chunk(IVec2::new(11, 7), &config), IVec2::new(2, 1));
        assert_eq!(chunk_coords(4, &config), IVec2::new(1, 1));
    }

    #[test]
    fn position_round_trip_is_a_bijection() {
        let config = config();
        let mut seen = vec![false; config.cell_count()];
        for y in 0..config.height() as i32 {
            for x in 0..config.width() as i32 {
                let pos = IVec2::new(x, y);
                let index = to_index(pos, &config);
                assert!(!seen[index], "slot {index} hit twice");
                seen[index] = true;
                assert_eq!(to_position(index, &config), pos);
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn chunk_cells_are_contiguous() {
        let config = config();
        for chunk in 0..config.chunk_count() {
            let coords = chunk_coords(chunk, &config);
            for index in chunk_slots(chunk, &config) {
                assert_eq!(to_chunk(to_position(index, &config), &config), coords);
            }
        }
    }

    #[test]
    fn try_index_rejects_outside() {
        let config = config();
        assert_eq!(try_index(IVec2::new(-1, 0), &config), None);
        assert_eq!(try_index(IVec2::new(12, 0), &config), None);
        assert_eq!(try_index(IVec2::new(0, 8), &config), None);
        assert_eq!(try_index(IVec2::new(11, 7), &config), Some(95));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn to_index_fails_fast_out_of_range() {
        let config = config();
        // x = width would alias into the next chunk row if unchecked
        to_index(IVec2::new(12, 0), &config);
    }
}
