use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use web_sys::{Document, Element};

use rokkakuban_core::{BoardState, CellAddress, HexGrid, PixelPoint, Token, TokenId};

/// Half the rendered token footprint; tokens are centered on their cell.
pub(crate) const TOKEN_HALF_SIZE: f32 = 20.0;
const SNAP_ANIMATION_MS: u32 = 200;

/// Imperative DOM rendering of the board: one absolutely positioned element
/// per hex cell, one per token. All placement comes from the grid geometry;
/// nothing here owns game state.
pub(crate) struct BoardView {
    document: Document,
    root: Element,
    tokens: RefCell<HashMap<TokenId, Element>>,
    snap_timers: RefCell<HashMap<TokenId, Timeout>>,
}

impl BoardView {
    pub(crate) fn new(document: Document, root: Element) -> Rc<Self> {
        Rc::new(Self {
            document,
            root,
            tokens: RefCell::new(HashMap::new()),
            snap_timers: RefCell::new(HashMap::new()),
        })
    }

    pub(crate) fn root(&self) -> &Element {
        &self.root
    }

    /// Rebuilds the whole board. A grid resize is destroy-and-recreate, so
    /// this is also the resize path.
    pub(crate) fn reset(&self, grid: &HexGrid, board: &BoardState) {
        self.root.set_inner_html("");
        self.tokens.borrow_mut().clear();
        self.snap_timers.borrow_mut().clear();

        let _ = self.root.set_attribute(
            "style",
            &format!(
                "position: relative; width: {:.2}px; height: {:.2}px;",
                grid.pixel_width(),
                grid.pixel_height()
            ),
        );

        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let address = CellAddress::new(col, row);
                let Ok(origin) = grid.cell_origin(address) else {
                    continue;
                };
                self.append_cell(grid, address, origin);
            }
        }

        for (id, token) in board.iter() {
            self.spawn_token(grid, id, token);
        }
    }

    fn append_cell(&self, grid: &HexGrid, address: CellAddress, origin: PixelPoint) {
        let Ok(cell) = self.document.create_element("div") else {
            return;
        };
        cell.set_class_name("hex-cell");
        let _ = cell.set_attribute("data-col", &address.col.to_string());
        let _ = cell.set_attribute("data-row", &address.row.to_string());
        let _ = cell.set_attribute(
            "style",
            &format!(
                "left: {:.2}px; top: {:.2}px; width: {:.2}px; height: {:.2}px;",
                origin.x,
                origin.y,
                grid.cell_width(),
                grid.cell_size()
            ),
        );
        if let Ok(label) = self.document.create_element("span") {
            label.set_class_name("hex-coordinate");
            label.set_text_content(Some(&address.to_string()));
            let _ = cell.append_child(&label);
        }
        let _ = self.root.append_child(&cell);
    }

    /// Creates (or replaces) the element for a confirmed token and centers
    /// it on its cell.
    pub(crate) fn spawn_token(&self, grid: &HexGrid, id: &TokenId, token: &Token) {
        self.remove_token(id);
        // Unplaceable tokens never reach the DOM.
        if !grid.contains(token.address) {
            return;
        }
        let Ok(element) = self.document.create_element("div") else {
            return;
        };
        element.set_class_name(&format!("token token-{}", token.kind));
        let _ = element.set_attribute("data-id", id.as_str());
        let _ = self.root.append_child(&element);
        self.tokens.borrow_mut().insert(id.clone(), element);
        self.place_token(grid, id, token.address, false);
    }

    /// Snaps a token element onto a cell center. `animate` plays the short
    /// settling transition used after drags and confirmed moves.
    pub(crate) fn place_token(
        &self,
        grid: &HexGrid,
        id: &TokenId,
        address: CellAddress,
        animate: bool,
    ) {
        let Some(element) = self.tokens.borrow().get(id).cloned() else {
            return;
        };
        let Ok(center) = grid.cell_center(address) else {
            return;
        };
        if animate {
            let _ = element.class_list().add_1("token-snapping");
            let settled = element.clone();
            let timer = Timeout::new(SNAP_ANIMATION_MS, move || {
                let _ = settled.class_list().remove_1("token-snapping");
            });
            self.snap_timers.borrow_mut().insert(id.clone(), timer);
        }
        self.set_element_position(
            &element,
            PixelPoint::new(center.x - TOKEN_HALF_SIZE, center.y - TOKEN_HALF_SIZE),
        );
    }

    /// Moves a token element to a free position while a drag is in flight.
    pub(crate) fn set_token_position(&self, id: &TokenId, top_left: PixelPoint) {
        let Some(element) = self.tokens.borrow().get(id).cloned() else {
            return;
        };
        self.set_element_position(&element, top_left);
    }

    fn set_element_position(&self, element: &Element, top_left: PixelPoint) {
        let _ = element.set_attribute(
            "style",
            &format!("left: {:.2}px; top: {:.2}px;", top_left.x, top_left.y),
        );
    }

    pub(crate) fn remove_token(&self, id: &TokenId) {
        self.snap_timers.borrow_mut().remove(id);
        if let Some(element) = self.tokens.borrow_mut().remove(id) {
            element.remove();
        }
    }

    pub(crate) fn set_dragging(&self, id: &TokenId, active: bool) {
        let Some(element) = self.tokens.borrow().get(id).cloned() else {
            return;
        };
        if active {
            let _ = element.class_list().add_1("dragging");
        } else {
            let _ = element.class_list().remove_1("dragging");
        }
    }

    /// Token id for an event target inside a token element, if any.
    pub(crate) fn token_id_of(&self, target: &Element) -> Option<TokenId> {
        let token = target.closest(".token").ok()??;
        token.get_attribute("data-id").map(TokenId::new)
    }

    /// Cell address for an event target inside a cell element, if any.
    pub(crate) fn cell_of(&self, target: &Element) -> Option<CellAddress> {
        let cell = target.closest(".hex-cell").ok()??;
        let col = cell.get_attribute("data-col")?.parse().ok()?;
        let row = cell.get_attribute("data-row")?.parse().ok()?;
        Some(CellAddress::new(col, row))
    }

    /// Viewport coordinates translated into board-local coordinates.
    pub(crate) fn board_point(&self, client_x: f32, client_y: f32) -> PixelPoint {
        let rect = self.root.get_bounding_client_rect();
        PixelPoint::new(client_x - rect.left() as f32, client_y - rect.top() as f32)
    }

    /// Board-local top-left of a token element.
    pub(crate) fn element_origin(&self, id: &TokenId) -> Option<PixelPoint> {
        let element = self.tokens.borrow().get(id).cloned()?;
        let rect = element.get_bounding_client_rect();
        let board = self.root.get_bounding_client_rect();
        Some(PixelPoint::new(
            (rect.left() - board.left()) as f32,
            (rect.top() - board.top()) as f32,
        ))
    }
}
