use std::cell::RefCell;
use std::rc::Rc;

use rokkakuban_core::{
    BoardState, CellAddress, ChatEntry, ClientMsg, HexGrid, ServerMsg, Token, TokenId, TokenKind,
};

use crate::diag;

pub(crate) const DEFAULT_COLS: u32 = 10;
pub(crate) const DEFAULT_ROWS: u32 = 10;
pub(crate) const DEFAULT_CELL_SIZE: f32 = 60.0;

/// Fan-out points for the views. Every hook fires after the authoritative
/// state change has been applied.
#[derive(Clone)]
pub(crate) struct ViewHooks {
    pub(crate) on_board_reset: Rc<dyn Fn(&HexGrid, &BoardState)>,
    pub(crate) on_token_added: Rc<dyn Fn(&HexGrid, &TokenId, &Token)>,
    pub(crate) on_token_moved: Rc<dyn Fn(&HexGrid, &TokenId, &Token)>,
    pub(crate) on_token_removed: Rc<dyn Fn(&TokenId)>,
    pub(crate) on_roster: Rc<dyn Fn(&[String])>,
    pub(crate) on_chat: Rc<dyn Fn(&ChatEntry)>,
}

impl ViewHooks {
    pub(crate) fn empty() -> Self {
        Self {
            on_board_reset: Rc::new(|_, _| {}),
            on_token_added: Rc::new(|_, _, _| {}),
            on_token_moved: Rc::new(|_, _, _| {}),
            on_token_removed: Rc::new(|_| {}),
            on_roster: Rc::new(|_| {}),
            on_chat: Rc::new(|_| {}),
        }
    }
}

pub(crate) type RequestSender = Rc<dyn Fn(ClientMsg)>;

/// Dispatch layer between the transport and the views. Holds the mirror of
/// the authoritative board; every outbound request is speculative and only
/// the echoed server event mutates state here.
pub(crate) struct GameClient {
    grid: RefCell<HexGrid>,
    board: RefCell<BoardState>,
    hooks: RefCell<ViewHooks>,
    sender: RefCell<RequestSender>,
}

impl GameClient {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self {
            grid: RefCell::new(HexGrid::new(DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_CELL_SIZE)),
            board: RefCell::new(BoardState::new()),
            hooks: RefCell::new(ViewHooks::empty()),
            sender: RefCell::new(Rc::new(|_| {})),
        })
    }

    pub(crate) fn set_hooks(&self, hooks: ViewHooks) {
        *self.hooks.borrow_mut() = hooks;
    }

    pub(crate) fn set_sender(&self, sender: RequestSender) {
        *self.sender.borrow_mut() = sender;
    }

    pub(crate) fn grid(&self) -> HexGrid {
        *self.grid.borrow()
    }

    pub(crate) fn token(&self, id: &TokenId) -> Option<Token> {
        self.board.borrow().token(id).copied()
    }

    /// Re-emits the current board through the reset hook, for the initial
    /// page render before any snapshot has arrived.
    pub(crate) fn refresh_views(&self) {
        let hooks = self.hooks.borrow().clone();
        (hooks.on_board_reset)(&self.grid.borrow(), &self.board.borrow());
    }

    /// Applies one authoritative event. Malformed or stale references are
    /// soft failures: logged, no state change, never an interruption of the
    /// dispatch loop.
    pub(crate) fn handle(&self, msg: ServerMsg) {
        let hooks = self.hooks.borrow().clone();
        match msg {
            ServerMsg::UpdateUsers(users) => {
                (hooks.on_roster)(&users);
            }
            ServerMsg::ChatMessage(entry) => {
                (hooks.on_chat)(&entry);
            }
            ServerMsg::GameStateUpdate(snapshot) => {
                {
                    let mut grid = self.grid.borrow_mut();
                    let size = snapshot.board_size;
                    if size.cols != grid.cols() || size.rows != grid.rows() {
                        // A resize replaces the grid outright.
                        *grid = HexGrid::new(size.cols, size.rows, grid.cell_size());
                    }
                    self.board.borrow_mut().apply_snapshot(&snapshot);
                }
                (hooks.on_board_reset)(&self.grid.borrow(), &self.board.borrow());
            }
            ServerMsg::TokenAdded {
                token_id,
                token_type,
                position,
                ..
            } => {
                if !self.grid.borrow().contains(position) {
                    diag::warn("token position outside the board dropped");
                    return;
                }
                self.board
                    .borrow_mut()
                    .add_token(token_id.clone(), token_type, position);
                let token = Token {
                    kind: token_type,
                    address: position,
                };
                (hooks.on_token_added)(&self.grid.borrow(), &token_id, &token);
            }
            ServerMsg::TokenMoved {
                token_id, position, ..
            } => {
                if !self.grid.borrow().contains(position) {
                    diag::warn("token position outside the board dropped");
                    return;
                }
                let moved = self.board.borrow_mut().move_token(&token_id, position);
                if !moved {
                    diag::warn("move for unknown token dropped");
                    return;
                }
                let token = match self.board.borrow().token(&token_id) {
                    Some(token) => *token,
                    None => return,
                };
                (hooks.on_token_moved)(&self.grid.borrow(), &token_id, &token);
            }
            ServerMsg::TokenRemoved { token_id, .. } => {
                if !self.board.borrow_mut().remove_token(&token_id) {
                    diag::log("remove for unknown token ignored");
                    return;
                }
                (hooks.on_token_removed)(&token_id);
            }
        }
    }

    pub(crate) fn request_add(&self, kind: TokenKind, position: CellAddress) {
        self.send(ClientMsg::AddToken {
            token_type: kind,
            position,
        });
    }

    /// Asks the server to move a token; skipped when the target equals the
    /// token's current cell. Returns whether a request went out.
    pub(crate) fn request_move(&self, id: &TokenId, target: CellAddress) -> bool {
        let current = self.board.borrow().token(id).map(|token| token.address);
        if current.is_none() || current == Some(target) {
            return false;
        }
        self.send(ClientMsg::MoveToken {
            token_id: id.clone(),
            position: target,
        });
        true
    }

    pub(crate) fn request_remove(&self, id: &TokenId) {
        self.send(ClientMsg::RemoveToken {
            token_id: id.clone(),
        });
    }

    /// Requests removal of every token currently on the board.
    pub(crate) fn request_clear(&self) {
        let ids = self.board.borrow().token_ids();
        for id in ids {
            self.request_remove(&id);
        }
    }

    /// Sends a chat line; blank input is dropped. Returns whether a request
    /// went out.
    pub(crate) fn send_chat(&self, message: &str) -> bool {
        let message = message.trim();
        if message.is_empty() {
            return false;
        }
        self.send(ClientMsg::ChatMessage {
            message: message.to_string(),
        });
        true
    }

    fn send(&self, msg: ClientMsg) {
        let sender = self.sender.borrow().clone();
        sender(msg);
    }
}
