// SPDX: CC0-1.0

//! Character-cell rendition of a [`Frame`] for the shell.

use crate::{
    plotter::{format_number, Frame},
    project::{AxisLine, ProjectedPoint},
    Number, Surface,
};
use std::io::{self, Write};

const BLANK: char = ' ';
const CURVE: char = '*';
const X_AXIS: char = '-';
const Y_AXIS: char = '|';
const ORIGIN: char = '+';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cells {
    pub cols: usize,
    pub rows: usize,
}

impl Default for Cells {
    fn default() -> Self {
        Self { cols: 72, rows: 20 }
    }
}

/// Cell holding surface point `p`, or `None` if `p` is off the surface.
fn cell_of(p: ProjectedPoint, surface: Surface, cells: Cells) -> Option<(usize, usize)> {
    fn index(v: Number, extent: Number, n: usize) -> Option<usize> {
        if !(0.0..=extent).contains(&v) {
            return None;
        }
        let i = (v / extent * n as Number).floor() as usize;
        Some(i.min(n - 1))
    }
    if cells.cols == 0 || cells.rows == 0 {
        return None;
    }
    let col = index(p.x, surface.width, cells.cols)?;
    let row = index(p.y, surface.height, cells.rows)?;
    Some((row, col))
}

/// Rasterize axes and curve. Row 0 is the top of the surface.
pub fn raster(frame: &Frame, surface: Surface, cells: Cells) -> Vec<Vec<char>> {
    let mut grid = vec![vec![BLANK; cells.cols]; cells.rows];

    if let AxisLine::Segment { start, .. } = frame.axes.x_axis {
        if let Some((row, _)) = cell_of(start, surface, cells) {
            grid[row].fill(X_AXIS);
        }
    }
    if let AxisLine::Segment { start, .. } = frame.axes.y_axis {
        if let Some((_, col)) = cell_of(start, surface, cells) {
            for row in grid.iter_mut() {
                row[col] = if row[col] == X_AXIS { ORIGIN } else { Y_AXIS };
            }
        }
    }

    let mut prev: Option<(usize, usize)> = None;
    for p in &frame.points {
        let Some((row, col)) = cell_of(*p, surface, cells) else {
            prev = None;
            continue;
        };
        match prev {
            // join steep neighbours so the curve stays connected
            Some((prev_row, prev_col)) if prev_col.abs_diff(col) <= 1 => {
                for cells_row in grid
                    .iter_mut()
                    .take(row.max(prev_row) + 1)
                    .skip(row.min(prev_row))
                {
                    cells_row[col] = CURVE;
                }
            }
            _ => grid[row][col] = CURVE,
        }
        prev = Some((row, col));
    }

    grid
}

/// Write the raster framed by the y bounds on the left and the x bounds
/// underneath.
pub fn draw<W: Write>(mut out: W, frame: &Frame, surface: Surface, cells: Cells) -> io::Result<()> {
    let grid = raster(frame, surface, cells);
    let ymax = format_number(frame.y.max);
    let ymin = format_number(frame.y.min);
    let w = ymax.len().max(ymin.len());
    let last = grid.len().saturating_sub(1);

    for (i, row) in grid.iter().enumerate() {
        let label = match i {
            0 => ymax.as_str(),
            i if i == last => ymin.as_str(),
            _ => "",
        };
        let row: String = row.iter().collect();
        writeln!(out, "{label:>w$} |{row}")?;
    }

    let xmin = format_number(frame.x.min);
    let xmax = format_number(frame.x.max);
    let gap = cells.cols.saturating_sub(xmin.len() + xmax.len());
    writeln!(out, "{:w$}  {xmin}{:gap$}{xmax}", "", "")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{persist::MemoryStore, plotter::Plotter, validate::Field, Point};

    fn count(grid: &[Vec<char>], c: char) -> usize {
        grid.iter().flatten().filter(|&&x| x == c).count()
    }

    #[test]
    fn default_plot_has_axes_and_curve() {
        let plotter = Plotter::new(MemoryStore::default());
        let frame = plotter.frame().unwrap();
        let cells = Cells { cols: 40, rows: 21 };
        let grid = raster(frame, plotter.surface(), cells);

        assert_eq!(grid.len(), 21);
        assert!(grid.iter().all(|row| row.len() == 40));
        assert_eq!(grid[0][20], Y_AXIS);
        assert!(grid[10].contains(&X_AXIS));
        assert!(count(&grid, CURVE) >= 40);
        // amplitude 1 of 10 keeps the curve near the middle rows
        assert!(grid[0].iter().all(|&c| c != CURVE));
        assert!(grid[20].iter().all(|&c| c != CURVE));
    }

    #[test]
    fn off_surface_values_are_clipped() {
        let mut plotter = Plotter::new(MemoryStore::default());
        plotter.edit(Field::Amplitude, "50");
        let grid = raster(plotter.frame().unwrap(), plotter.surface(), Cells::default());
        assert!(count(&grid, CURVE) > 0);
        assert_eq!(grid.len(), Cells::default().rows);
    }

    #[test]
    fn cell_lookup_is_clamped_at_far_edges() {
        let surface = Surface::new(100.0, 50.0);
        let cells = Cells { cols: 10, rows: 5 };
        assert_eq!(cell_of(Point { x: 100.0, y: 50.0 }, surface, cells), Some((4, 9)));
        assert_eq!(cell_of(Point { x: 0.0, y: 0.0 }, surface, cells), Some((0, 0)));
        assert_eq!(cell_of(Point { x: -0.1, y: 0.0 }, surface, cells), None);
        assert_eq!(cell_of(Point { x: 5.0, y: 50.1 }, surface, cells), None);
        assert_eq!(cell_of(Point { x: 5.0, y: 5.0 }, surface, Cells { cols: 0, rows: 5 }), None);
    }

    #[test]
    fn draw_labels_the_bounds() {
        let plotter = Plotter::new(MemoryStore::default());
        let mut buf = Vec::new();
        draw(
            &mut buf,
            plotter.frame().unwrap(),
            plotter.surface(),
            Cells { cols: 30, rows: 6 },
        )
        .unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[0].starts_with(" 10 |"));
        assert!(lines[5].starts_with("-10 |"));
        assert!(lines[6].trim_start().starts_with("-10"));
        assert!(lines[6].ends_with("10"));
    }
}
