use rokkakuban_core::{decode, encode, CellAddress, ClientMsg, ServerMsg, TokenId, TokenKind};

#[test]
fn decodes_token_moved_with_attribution() {
    let raw = r#"{"event":"token_moved","data":{"token_id":"abc","position":{"col":2,"row":3},"moved_by":"alice"}}"#;
    let msg: ServerMsg = decode(raw).unwrap();
    assert_eq!(
        msg,
        ServerMsg::TokenMoved {
            token_id: TokenId::from("abc"),
            position: CellAddress::new(2, 3),
            moved_by: Some("alice".to_string()),
        }
    );
}

#[test]
fn attribution_fields_are_optional() {
    let raw = r#"{"event":"token_removed","data":{"token_id":"abc"}}"#;
    let msg: ServerMsg = decode(raw).unwrap();
    assert_eq!(
        msg,
        ServerMsg::TokenRemoved {
            token_id: TokenId::from("abc"),
            removed_by: None,
        }
    );
}

#[test]
fn decodes_full_state_snapshot() {
    let raw = r#"{
        "event": "game_state_update",
        "data": {
            "board_size": {"cols": 12, "rows": 8},
            "tokens": {
                "t1": {"type": "red", "position": {"col": 0, "row": 0}},
                "t2": {"type": "yellow", "position": {"col": 11, "row": 7}}
            }
        }
    }"#;
    let ServerMsg::GameStateUpdate(snapshot) = decode::<ServerMsg>(raw).unwrap() else {
        panic!("wrong variant");
    };
    assert_eq!(snapshot.board_size.cols, 12);
    assert_eq!(snapshot.board_size.rows, 8);
    assert_eq!(snapshot.tokens.len(), 2);
    let record = &snapshot.tokens[&TokenId::from("t2")];
    assert_eq!(record.kind, TokenKind::Yellow);
    assert_eq!(record.position, CellAddress::new(11, 7));
}

#[test]
fn snapshot_tokens_default_to_empty() {
    let raw = r#"{"event":"game_state_update","data":{"board_size":{"cols":10,"rows":10}}}"#;
    let ServerMsg::GameStateUpdate(snapshot) = decode::<ServerMsg>(raw).unwrap() else {
        panic!("wrong variant");
    };
    assert!(snapshot.tokens.is_empty());
}

#[test]
fn decodes_roster_and_chat() {
    let roster: ServerMsg = decode(r#"{"event":"update_users","data":["ann","bob"]}"#).unwrap();
    assert_eq!(
        roster,
        ServerMsg::UpdateUsers(vec!["ann".to_string(), "bob".to_string()])
    );

    let chat: ServerMsg = decode(
        r#"{"event":"chat_message","data":{"username":"ann","message":"hi","timestamp":"12:01"}}"#,
    )
    .unwrap();
    let ServerMsg::ChatMessage(entry) = chat else {
        panic!("wrong variant");
    };
    assert_eq!(entry.username, "ann");
    assert_eq!(entry.message, "hi");
    assert_eq!(entry.timestamp, "12:01");
}

#[test]
fn malformed_frames_decode_to_none() {
    assert!(decode::<ServerMsg>("not json").is_none());
    assert!(decode::<ServerMsg>(r#"{"event":"token_moved","data":{"position":5}}"#).is_none());
    assert!(decode::<ServerMsg>(r#"{"event":"unknown_event","data":{}}"#).is_none());
    assert!(decode::<ServerMsg>(r#"{"data":{"token_id":"abc"}}"#).is_none());
}

#[test]
fn encodes_requests_with_snake_case_event_names() {
    let raw = encode(&ClientMsg::MoveToken {
        token_id: TokenId::from("abc"),
        position: CellAddress::new(4, 5),
    })
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["event"], "move_token");
    assert_eq!(value["data"]["token_id"], "abc");
    assert_eq!(value["data"]["position"]["col"], 4);
    assert_eq!(value["data"]["position"]["row"], 5);

    let raw = encode(&ClientMsg::AddToken {
        token_type: TokenKind::Green,
        position: CellAddress::new(0, 0),
    })
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["event"], "add_token");
    assert_eq!(value["data"]["token_type"], "green");

    let raw = encode(&ClientMsg::ChatMessage {
        message: "hello".to_string(),
    })
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["event"], "chat_message");
    assert_eq!(value["data"]["message"], "hello");
}
