pub mod board;
pub mod codec;
pub mod drag;
pub mod grid;
pub mod protocol;

pub use board::{BoardState, Token, TokenId, TokenKind};
pub use codec::{decode, encode};
pub use drag::{DragOutcome, DragTracker};
pub use grid::{CellAddress, HexGrid, InvalidAddress, PixelPoint};
pub use protocol::{BoardSize, BoardSnapshot, ChatEntry, ClientMsg, ServerMsg, TokenRecord};
