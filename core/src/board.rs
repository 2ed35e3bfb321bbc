use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grid::CellAddress;
use crate::protocol::BoardSnapshot;

/// Opaque server-assigned token identifier, unique per board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(String);

impl TokenId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for TokenId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Red,
    Blue,
    Green,
    Yellow,
}

impl TokenKind {
    pub const ALL: [TokenKind; 4] = [
        TokenKind::Red,
        TokenKind::Blue,
        TokenKind::Green,
        TokenKind::Yellow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Red => "red",
            TokenKind::Blue => "blue",
            TokenKind::Green => "green",
            TokenKind::Yellow => "yellow",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub address: CellAddress,
}

/// Client-side mirror of the authoritative token map. Every mutation here is
/// driven by a confirmed server event; the ops are last-write-wins and a miss
/// is soft (reported via the return value, no state change).
#[derive(Clone, Debug, Default)]
pub struct BoardState {
    tokens: HashMap<TokenId, Token>,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all tokens from a full-state snapshot.
    pub fn apply_snapshot(&mut self, snapshot: &BoardSnapshot) {
        self.tokens.clear();
        for (id, record) in &snapshot.tokens {
            self.tokens.insert(
                id.clone(),
                Token {
                    kind: record.kind,
                    address: record.position,
                },
            );
        }
    }

    /// Inserts a confirmed token; re-adding an existing id replaces it.
    pub fn add_token(&mut self, id: TokenId, kind: TokenKind, address: CellAddress) {
        self.tokens.insert(id, Token { kind, address });
    }

    /// Relocates a confirmed token. Returns false when the id is unknown.
    pub fn move_token(&mut self, id: &TokenId, address: CellAddress) -> bool {
        match self.tokens.get_mut(id) {
            Some(token) => {
                token.address = address;
                true
            }
            None => false,
        }
    }

    /// Removes a confirmed token. Removing an unknown id is a no-op.
    pub fn remove_token(&mut self, id: &TokenId) -> bool {
        self.tokens.remove(id).is_some()
    }

    pub fn token(&self, id: &TokenId) -> Option<&Token> {
        self.tokens.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TokenId, &Token)> {
        self.tokens.iter()
    }

    pub fn token_ids(&self) -> Vec<TokenId> {
        self.tokens.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
