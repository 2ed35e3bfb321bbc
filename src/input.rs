use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, MouseEvent, TouchEvent};

use rokkakuban_core::{DragTracker, PixelPoint, TokenKind};

use crate::board_view::{BoardView, TOKEN_HALF_SIZE};
use crate::client::GameClient;

/// Mouse and touch handling for the board: token drags and armed cell
/// placement. One gesture at a time; a second pointer-down during a drag is
/// ignored by the tracker.
pub(crate) struct InputController {
    client: Rc<GameClient>,
    view: Rc<BoardView>,
    tracker: RefCell<DragTracker>,
    pending_kind: Cell<Option<TokenKind>>,
    listeners: RefCell<Vec<EventListener>>,
}

impl InputController {
    pub(crate) fn new(client: Rc<GameClient>, view: Rc<BoardView>) -> Rc<Self> {
        Rc::new(Self {
            client,
            view,
            tracker: RefCell::new(DragTracker::new()),
            pending_kind: Cell::new(None),
            listeners: RefCell::new(Vec::new()),
        })
    }

    /// Arms the next board click to place a token of the given kind.
    pub(crate) fn arm_token_placement(&self, kind: TokenKind) {
        self.pending_kind.set(Some(kind));
    }

    pub(crate) fn install(self: &Rc<Self>, document: &web_sys::Document) {
        let board = self.view.root().clone();
        let mut listeners = Vec::new();

        {
            let controller = self.clone();
            listeners.push(EventListener::new(&board, "mousedown", move |event| {
                if let Some((target, point)) = mouse_hit(&controller.view, event) {
                    controller.pointer_down(&target, point);
                }
            }));
        }
        {
            let controller = self.clone();
            let options = EventListenerOptions::enable_prevent_default();
            listeners.push(EventListener::new_with_options(
                &board,
                "touchstart",
                options,
                move |event| {
                    if let Some((target, point)) = touch_hit(&controller.view, event) {
                        if controller.pointer_down(&target, point) {
                            event.prevent_default();
                        }
                    }
                },
            ));
        }
        {
            let controller = self.clone();
            listeners.push(EventListener::new(&board, "click", move |event| {
                controller.board_click(event);
            }));
        }

        // Move and release are tracked on the document so a drag survives
        // leaving the board rectangle.
        {
            let controller = self.clone();
            listeners.push(EventListener::new(document, "mousemove", move |event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    let point = controller
                        .view
                        .board_point(event.client_x() as f32, event.client_y() as f32);
                    controller.pointer_move(point);
                }
            }));
        }
        {
            let controller = self.clone();
            let options = EventListenerOptions::enable_prevent_default();
            listeners.push(EventListener::new_with_options(
                document,
                "touchmove",
                options,
                move |event| {
                    if !controller.tracker.borrow().is_active() {
                        return;
                    }
                    event.prevent_default();
                    if let Some(point) = touch_point(&controller.view, event) {
                        controller.pointer_move(point);
                    }
                },
            ));
        }
        {
            let controller = self.clone();
            listeners.push(EventListener::new(document, "mouseup", move |_event| {
                controller.pointer_up();
            }));
        }
        {
            let controller = self.clone();
            listeners.push(EventListener::new(document, "touchend", move |_event| {
                controller.pointer_up();
            }));
        }
        {
            let controller = self.clone();
            listeners.push(EventListener::new(document, "touchcancel", move |_event| {
                controller.pointer_cancel();
            }));
        }

        *self.listeners.borrow_mut() = listeners;
    }

    /// Starts a drag when the pointer landed on a token. Returns whether a
    /// gesture began.
    fn pointer_down(&self, target: &Element, point: PixelPoint) -> bool {
        let Some(token_id) = self.view.token_id_of(target) else {
            return false;
        };
        let Some(origin) = self.view.element_origin(&token_id) else {
            return false;
        };
        if !self.tracker.borrow_mut().begin(token_id.clone(), point, origin) {
            return false;
        }
        self.view.set_dragging(&token_id, true);
        true
    }

    fn pointer_move(&self, point: PixelPoint) {
        let update = {
            let mut tracker = self.tracker.borrow_mut();
            tracker
                .update(point)
                .and_then(|top_left| tracker.active_token().cloned().map(|id| (id, top_left)))
        };
        if let Some((token_id, top_left)) = update {
            self.view.set_token_position(&token_id, top_left);
        }
    }

    /// Ends the gesture: the drop cell goes out as a speculative move
    /// request, and the element settles back on its confirmed cell until the
    /// server echoes the move.
    fn pointer_up(&self) {
        let grid = self.client.grid();
        let outcome = self
            .tracker
            .borrow_mut()
            .finish(&grid, TOKEN_HALF_SIZE, TOKEN_HALF_SIZE);
        let Some(outcome) = outcome else {
            return;
        };
        self.view.set_dragging(&outcome.token_id, false);
        let sent = self.client.request_move(&outcome.token_id, outcome.target);
        // Snap to the drop cell right away; the echoed event reconciles any
        // disagreement with the server.
        let settle = if sent {
            Some(outcome.target)
        } else {
            self.client.token(&outcome.token_id).map(|token| token.address)
        };
        if let Some(address) = settle {
            self.view
                .place_token(&grid, &outcome.token_id, address, true);
        }
    }

    fn pointer_cancel(&self) {
        let Some(token_id) = self.tracker.borrow().active_token().cloned() else {
            return;
        };
        self.tracker.borrow_mut().cancel();
        self.view.set_dragging(&token_id, false);
        if let Some(token) = self.client.token(&token_id) {
            self.view
                .place_token(&self.client.grid(), &token_id, token.address, false);
        }
    }

    /// A click on an empty cell while placement is armed requests a new
    /// token there. Clicks on tokens never place.
    fn board_click(&self, event: &Event) {
        let Some(kind) = self.pending_kind.get() else {
            return;
        };
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        if self.view.token_id_of(&target).is_some() {
            return;
        }
        let Some(address) = self.view.cell_of(&target) else {
            return;
        };
        self.pending_kind.set(None);
        self.client.request_add(kind, address);
    }
}

fn mouse_hit(view: &BoardView, event: &Event) -> Option<(Element, PixelPoint)> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let point = view.board_point(mouse.client_x() as f32, mouse.client_y() as f32);
    Some((target, point))
}

fn touch_hit(view: &BoardView, event: &Event) -> Option<(Element, PixelPoint)> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let point = touch_point(view, event)?;
    Some((target, point))
}

fn touch_point(view: &BoardView, event: &Event) -> Option<PixelPoint> {
    let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
    Some(view.board_point(touch.client_x() as f32, touch.client_y() as f32))
}

/// Uniform pick over the known token kinds for the quick-add button.
pub(crate) fn random_kind() -> TokenKind {
    let roll = js_sys::Math::random() * TokenKind::ALL.len() as f64;
    let index = (roll as usize).min(TokenKind::ALL.len() - 1);
    TokenKind::ALL[index]
}
