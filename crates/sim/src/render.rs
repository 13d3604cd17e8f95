//! Frame buffers for display.
//!
//! Storage is chunk-major; every buffer here is row-major with index
//! `y * width + x`, and row 0 is the bottom of the world.

use crate::grid::CellGrid;
use glam::IVec2;
use rayon::prelude::*;
use std::io::{self, Write};

/// Row-major material ids, one byte per cell.
pub fn material_ids(grid: &CellGrid) -> Vec<u8> {
    let width = grid.width() as usize;
    let mut ids = vec![0u8; grid.config().cell_count()];
    ids.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        for (x, id) in row.iter_mut().enumerate() {
            *id = grid.material_at(IVec2::new(x as i32, y as i32)).id();
        }
    });
    ids
}

/// Row-major RGBA8 pixels with per-cell colour variation.
pub fn rgba(grid: &CellGrid) -> Vec<u8> {
    let width = grid.width() as usize;
    let mut pixels = vec![0u8; grid.config().cell_count() * 4];
    pixels
        .par_chunks_mut(width * 4)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let (x, y) = (x as i32, y as i32);
                px.copy_from_slice(&grid.material_at(IVec2::new(x, y)).color_varied(x, y));
            }
        });
    pixels
}

/// Write the grid as a binary PPM (P6), top row first.
pub fn write_ppm<W: Write>(grid: &CellGrid, mut out: W) -> io::Result<()> {
    let width = grid.width() as usize;
    let height = grid.height() as usize;
    let pixels = rgba(grid);

    write!(out, "P6\n{} {}\n255\n", width, height)?;
    let mut line = Vec::with_capacity(width * 3);
    for row in pixels.chunks_exact(width * 4).rev() {
        line.clear();
        for px in row.chunks_exact(4) {
            line.extend_from_slice(&px[..3]);
        }
        out.write_all(&line)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;
    use crate::material::Material;

    fn striped() -> CellGrid {
        // 12 x 8, chunk size 4: stone on the bottom row, water in column 5
        CellGrid::from_fn(GridConfig::new(4, 3, 2).unwrap(), |pos| {
            if pos.y == 0 {
                Material::Stone
            } else if pos.x == 5 {
                Material::Water
            } else {
                Material::Empty
            }
        })
    }

    #[test]
    fn ids_are_row_major() {
        let grid = striped();
        let ids = material_ids(&grid);
        let width = grid.width() as usize;

        assert_eq!(ids.len(), 96);
        for y in 0..grid.height() as i32 {
            for x in 0..grid.width() as i32 {
                let expected = grid.material_at(IVec2::new(x, y)).id();
                assert_eq!(ids[y as usize * width + x as usize], expected, "({x}, {y})");
            }
        }
        assert_eq!(ids[..width], [Material::Stone.id(); 12]);
        assert_eq!(ids[width + 5], Material::Water.id());
    }

    #[test]
    fn rgba_matches_palette() {
        let grid = striped();
        let pixels = rgba(&grid);
        assert_eq!(pixels.len(), 96 * 4);
        let i = (3 * 12 + 5) * 4;
        assert_eq!(pixels[i..i + 4], Material::Water.color_varied(5, 3));
        assert_eq!(pixels[0..4], Material::Stone.color_varied(0, 0));
    }

    #[test]
    fn ppm_is_flipped() {
        let grid = striped();
        let mut out = Vec::new();
        write_ppm(&grid, &mut out).unwrap();

        let header = b"P6\n12 8\n255\n";
        assert_eq!(&out[..header.len()], header);
        let body = &out[header.len()..];
        assert_eq!(body.len(), 96 * 3);

        // Last image row is world y = 0
        let last = &body[7 * 12 * 3..];
        assert_eq!(last[..3], Material::Stone.color_varied(0, 0)[..3]);
        // First image row is world y = 7
        assert_eq!(body[..3], Material::Empty.color_varied(0, 7)[..3]);
    }
}
