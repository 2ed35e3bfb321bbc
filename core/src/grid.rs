use std::fmt;

use serde::{Deserialize, Serialize};

/// Width of a pointy-top hexagon as a fraction of its height: sqrt(3) / 2.
pub const CELL_WIDTH_RATIO: f32 = 0.866_025_4;
/// Vertical distance between consecutive row anchors, as a fraction of the
/// cell height. Rows interlock, so they sit closer than one full cell.
pub const ROW_SPACING_RATIO: f32 = 0.75;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellAddress {
    pub col: u32,
    pub row: u32,
}

impl CellAddress {
    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.col, self.row)
    }
}

/// Board-local pixel coordinates, origin at the board's own top-left.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PixelPoint {
    pub x: f32,
    pub y: f32,
}

impl PixelPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_sq(self, other: PixelPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Out-of-range cell access. This is a caller contract violation, not a
/// recoverable runtime condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidAddress {
    pub address: CellAddress,
    pub cols: u32,
    pub rows: u32,
}

impl fmt::Display for InvalidAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cell {} outside {}x{} grid",
            self.address, self.cols, self.rows
        )
    }
}

impl std::error::Error for InvalidAddress {}

/// Offset-coordinate layout for a grid of pointy-top hexagons. Every odd row
/// shifts right by half a cell width so edges share seamlessly.
///
/// Immutable: a board resize is a destroy-and-recreate, never a mutation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HexGrid {
    cols: u32,
    rows: u32,
    cell_size: f32,
}

impl HexGrid {
    pub fn new(cols: u32, rows: u32, cell_size: f32) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
            cell_size: cell_size.max(1.0),
        }
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Height of one hexagon in pixels.
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Width of one hexagon in pixels.
    pub fn cell_width(&self) -> f32 {
        self.cell_size * CELL_WIDTH_RATIO
    }

    fn horizontal_spacing(&self) -> f32 {
        self.cell_width()
    }

    fn vertical_spacing(&self) -> f32 {
        self.cell_size * ROW_SPACING_RATIO
    }

    fn row_offset(&self, row: u32) -> f32 {
        if row % 2 == 0 {
            0.0
        } else {
            self.cell_width() / 2.0
        }
    }

    pub fn contains(&self, address: CellAddress) -> bool {
        address.col < self.cols && address.row < self.rows
    }

    /// Top-left anchor of a cell's visual footprint.
    pub fn cell_origin(&self, address: CellAddress) -> Result<PixelPoint, InvalidAddress> {
        if !self.contains(address) {
            return Err(InvalidAddress {
                address,
                cols: self.cols,
                rows: self.rows,
            });
        }
        let x = address.col as f32 * self.horizontal_spacing() + self.row_offset(address.row);
        let y = address.row as f32 * self.vertical_spacing();
        Ok(PixelPoint::new(x, y))
    }

    /// Center of a cell's visual footprint: origin plus half the rendered
    /// width and height of a pointy-top hexagon of height `cell_size`.
    pub fn cell_center(&self, address: CellAddress) -> Result<PixelPoint, InvalidAddress> {
        let origin = self.cell_origin(address)?;
        Ok(PixelPoint::new(
            origin.x + self.cell_width() / 2.0,
            origin.y + self.cell_size / 2.0,
        ))
    }

    /// Inverse of `cell_origin`, clamped to the grid extent. Never fails,
    /// even for wildly out-of-bounds points.
    ///
    /// The closed-form estimate alone is wrong near offset-row boundaries,
    /// where a point can sit closer to a cell in the adjacent row. The
    /// nearest-center pass over the 3x3 neighborhood makes the lookup exact;
    /// ties go to the first candidate in row-major order.
    pub fn cell_at(&self, point: PixelPoint) -> CellAddress {
        let est_row = clamp_index((point.y / self.vertical_spacing()).floor(), self.rows);
        let offset = self.row_offset(est_row);
        let est_col = clamp_index(
            ((point.x - offset) / self.horizontal_spacing()).floor(),
            self.cols,
        );

        let mut best = CellAddress::new(est_col, est_row);
        let mut best_dist = f32::INFINITY;
        let row_end = (est_row + 1).min(self.rows - 1);
        let col_end = (est_col + 1).min(self.cols - 1);
        for row in est_row.saturating_sub(1)..=row_end {
            for col in est_col.saturating_sub(1)..=col_end {
                let candidate = CellAddress::new(col, row);
                let Ok(center) = self.cell_center(candidate) else {
                    continue;
                };
                let dist = center.distance_sq(point);
                if dist < best_dist {
                    best_dist = dist;
                    best = candidate;
                }
            }
        }
        best
    }

    /// Horizontal extent of the rendered board.
    pub fn pixel_width(&self) -> f32 {
        let odd_row_overhang = if self.rows > 1 {
            self.cell_width() / 2.0
        } else {
            0.0
        };
        self.cols as f32 * self.horizontal_spacing() + odd_row_overhang
    }

    /// Vertical extent of the rendered board.
    pub fn pixel_height(&self) -> f32 {
        (self.rows - 1) as f32 * self.vertical_spacing() + self.cell_size
    }
}

fn clamp_index(value: f32, len: u32) -> u32 {
    if !(value > 0.0) {
        return 0;
    }
    let max = (len - 1) as f32;
    if value >= max {
        len - 1
    } else {
        value as u32
    }
}
