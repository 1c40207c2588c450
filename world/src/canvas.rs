//! Bordered glyph buffer the world renders frames onto.

use tank_duel_core::{glyph, FrameSnapshot, GridDimensions, GridPos};

/// Dense row-major glyph buffer with an immutable wall ring.
///
/// The canvas knows only geometry; entity legality is the caller's concern.
#[derive(Clone, Debug)]
pub struct Canvas {
    dimensions: GridDimensions,
    cells: Vec<char>,
}

impl Canvas {
    /// Allocates a canvas for the provided extent.
    ///
    /// Callers guarantee `dimensions.has_interior()`; the bootstrap system
    /// rejects smaller scenarios before a canvas is ever built.
    #[must_use]
    pub fn new(dimensions: GridDimensions) -> Self {
        let len = usize::try_from(dimensions.rows()).unwrap_or(0)
            * usize::try_from(dimensions.cols()).unwrap_or(0);
        let mut canvas = Self {
            dimensions,
            cells: vec![glyph::EMPTY; len],
        };
        canvas.reset_border();
        canvas
    }

    /// Extent of the canvas, wall ring included.
    #[must_use]
    pub const fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    /// Restores the wall ring and blanks every interior cell.
    ///
    /// Called before every re-render so stale markers never survive a frame.
    pub fn reset_border(&mut self) {
        let rows = self.dimensions.rows();
        let cols = self.dimensions.cols();
        for row in 0..rows {
            for col in 0..cols {
                let pos = GridPos::new(row, col);
                let cell = if self.dimensions.is_wall(pos) {
                    glyph::WALL
                } else {
                    glyph::EMPTY
                };
                if let Some(index) = self.index(pos) {
                    self.cells[index] = cell;
                }
            }
        }
    }

    /// Writes a transient visual marker; positions outside the canvas are
    /// ignored.
    pub fn place_glyph(&mut self, pos: GridPos, marker: char) {
        if let Some(index) = self.index(pos) {
            self.cells[index] = marker;
        }
    }

    /// Glyph currently rendered at the provided cell.
    #[must_use]
    pub fn glyph_at(&self, pos: GridPos) -> Option<char> {
        self.index(pos).map(|index| self.cells[index])
    }

    /// Deep copy of the rendered contents for presentation and the journal.
    #[must_use]
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::from_cells(
            self.dimensions.rows(),
            self.dimensions.cols(),
            self.cells.clone(),
        )
    }

    fn index(&self, pos: GridPos) -> Option<usize> {
        if !self.dimensions.contains(pos) {
            return None;
        }

        let row = usize::try_from(pos.row()).ok()?;
        let col = usize::try_from(pos.col()).ok()?;
        let width = usize::try_from(self.dimensions.cols()).ok()?;
        Some(row * width + col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_canvas_carries_the_wall_ring() {
        let canvas = Canvas::new(GridDimensions::new(4, 5));
        assert_eq!(canvas.glyph_at(GridPos::new(0, 0)), Some(glyph::WALL));
        assert_eq!(canvas.glyph_at(GridPos::new(3, 4)), Some(glyph::WALL));
        assert_eq!(canvas.glyph_at(GridPos::new(0, 2)), Some(glyph::WALL));
        assert_eq!(canvas.glyph_at(GridPos::new(1, 1)), Some(glyph::EMPTY));
        assert_eq!(canvas.glyph_at(GridPos::new(2, 3)), Some(glyph::EMPTY));
    }

    #[test]
    fn reset_border_clears_interior_markers() {
        let mut canvas = Canvas::new(GridDimensions::new(5, 5));
        canvas.place_glyph(GridPos::new(2, 2), '>');
        canvas.reset_border();
        assert_eq!(canvas.glyph_at(GridPos::new(2, 2)), Some(glyph::EMPTY));
        assert_eq!(canvas.glyph_at(GridPos::new(0, 4)), Some(glyph::WALL));
    }

    #[test]
    fn out_of_range_markers_are_ignored() {
        let mut canvas = Canvas::new(GridDimensions::new(4, 4));
        canvas.place_glyph(GridPos::new(9, 9), 'X');
        let frame = canvas.snapshot();
        assert!(frame.glyph_at(GridPos::new(9, 9)).is_none());
    }

    #[test]
    fn snapshot_is_a_deep_copy() {
        let mut canvas = Canvas::new(GridDimensions::new(4, 4));
        canvas.place_glyph(GridPos::new(1, 2), '^');
        let frame = canvas.snapshot();
        canvas.reset_border();
        assert_eq!(frame.glyph_at(GridPos::new(1, 2)), Some('^'));
        assert_eq!(canvas.glyph_at(GridPos::new(1, 2)), Some(glyph::EMPTY));
    }
}
