use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::board::{TokenId, TokenKind};
use crate::grid::CellAddress;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSize {
    pub cols: u32,
    pub rows: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub position: CellAddress,
}

/// Full authoritative board state, sent on join and after reconnects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub board_size: BoardSize,
    #[serde(default)]
    pub tokens: HashMap<TokenId, TokenRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub username: String,
    pub message: String,
    pub timestamp: String,
}

/// Authoritative events. Every locally requested change only takes effect
/// when the matching event echoes back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerMsg {
    UpdateUsers(Vec<String>),
    ChatMessage(ChatEntry),
    GameStateUpdate(BoardSnapshot),
    TokenAdded {
        token_id: TokenId,
        token_type: TokenKind,
        position: CellAddress,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        added_by: Option<String>,
    },
    TokenMoved {
        token_id: TokenId,
        position: CellAddress,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        moved_by: Option<String>,
    },
    TokenRemoved {
        token_id: TokenId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        removed_by: Option<String>,
    },
}

/// Speculative requests. The server answers with the corresponding
/// `ServerMsg`, which is the only thing that mutates client state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientMsg {
    ChatMessage {
        message: String,
    },
    AddToken {
        token_type: TokenKind,
        position: CellAddress,
    },
    MoveToken {
        token_id: TokenId,
        position: CellAddress,
    },
    RemoveToken {
        token_id: TokenId,
    },
}
