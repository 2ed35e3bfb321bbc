use crate::board::TokenId;
use crate::grid::{CellAddress, HexGrid, PixelPoint};

/// Where a released token should land.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragOutcome {
    pub token_id: TokenId,
    pub target: CellAddress,
}

#[derive(Clone, Debug)]
struct ActiveDrag {
    token_id: TokenId,
    grab_dx: f32,
    grab_dy: f32,
    last: PixelPoint,
}

/// Tracks a single in-progress drag gesture. While a gesture is active the
/// dragged element freely follows the pointer; the position is purely visual
/// until `finish` resolves it against the grid. At most one gesture can be
/// active at a time; a second `begin` is rejected.
#[derive(Clone, Debug, Default)]
pub struct DragTracker {
    active: Option<ActiveDrag>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a gesture. `pointer` and `element_origin` (the grabbed
    /// element's top-left) are board-local. Returns false while another
    /// gesture is active.
    pub fn begin(
        &mut self,
        token_id: TokenId,
        pointer: PixelPoint,
        element_origin: PixelPoint,
    ) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(ActiveDrag {
            token_id,
            grab_dx: pointer.x - element_origin.x,
            grab_dy: pointer.y - element_origin.y,
            last: pointer,
        });
        true
    }

    /// Advances the gesture; yields the speculative element top-left for the
    /// current pointer, or None when no gesture is active.
    pub fn update(&mut self, pointer: PixelPoint) -> Option<PixelPoint> {
        let drag = self.active.as_mut()?;
        drag.last = pointer;
        Some(PixelPoint::new(
            pointer.x - drag.grab_dx,
            pointer.y - drag.grab_dy,
        ))
    }

    /// Ends the gesture and resolves the drop. The element center (top-left
    /// plus the given half extents) picks the nearest cell through
    /// `cell_at`, so a release outside the grid lands on an edge cell.
    pub fn finish(&mut self, grid: &HexGrid, half_width: f32, half_height: f32) -> Option<DragOutcome> {
        let drag = self.active.take()?;
        let center = PixelPoint::new(
            drag.last.x - drag.grab_dx + half_width,
            drag.last.y - drag.grab_dy + half_height,
        );
        Some(DragOutcome {
            token_id: drag.token_id,
            target: grid.cell_at(center),
        })
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_token(&self) -> Option<&TokenId> {
        self.active.as_ref().map(|drag| &drag.token_id)
    }
}
