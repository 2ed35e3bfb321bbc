use rokkakuban_core::{CellAddress, DragTracker, HexGrid, PixelPoint, TokenId};

const TOKEN_HALF: f32 = 20.0;

fn grid() -> HexGrid {
    HexGrid::new(10, 10, 60.0)
}

#[test]
fn drag_snaps_to_nearest_cell_on_release() {
    let grid = grid();
    let mut tracker = DragTracker::new();

    assert!(tracker.begin(
        TokenId::from("t1"),
        PixelPoint::new(10.0, 10.0),
        PixelPoint::new(0.0, 0.0),
    ));
    assert!(tracker.is_active());

    // Move so the token center lands on the center of (3,4).
    let target_center = grid.cell_center(CellAddress::new(3, 4)).unwrap();
    let pointer = PixelPoint::new(
        target_center.x - TOKEN_HALF + 10.0,
        target_center.y - TOKEN_HALF + 10.0,
    );
    let top_left = tracker.update(pointer).unwrap();
    assert!((top_left.x - (target_center.x - TOKEN_HALF)).abs() < 0.001);

    let outcome = tracker.finish(&grid, TOKEN_HALF, TOKEN_HALF).unwrap();
    assert_eq!(outcome.token_id, TokenId::from("t1"));
    assert_eq!(outcome.target, CellAddress::new(3, 4));
    assert!(!tracker.is_active());
}

#[test]
fn second_gesture_is_rejected_while_one_is_active() {
    let mut tracker = DragTracker::new();
    assert!(tracker.begin(
        TokenId::from("a"),
        PixelPoint::new(5.0, 5.0),
        PixelPoint::new(0.0, 0.0),
    ));
    assert!(!tracker.begin(
        TokenId::from("b"),
        PixelPoint::new(50.0, 50.0),
        PixelPoint::new(40.0, 40.0),
    ));
    assert_eq!(tracker.active_token(), Some(&TokenId::from("a")));
}

#[test]
fn release_outside_the_grid_clamps_to_an_edge_cell() {
    let grid = grid();
    let mut tracker = DragTracker::new();
    tracker.begin(
        TokenId::from("t1"),
        PixelPoint::new(0.0, 0.0),
        PixelPoint::new(0.0, 0.0),
    );
    tracker.update(PixelPoint::new(-400.0, 9999.0));

    let outcome = tracker.finish(&grid, TOKEN_HALF, TOKEN_HALF).unwrap();
    assert_eq!(outcome.target.col, 0);
    assert_eq!(outcome.target.row, grid.rows() - 1);
}

#[test]
fn cancel_discards_the_gesture() {
    let grid = grid();
    let mut tracker = DragTracker::new();
    tracker.begin(
        TokenId::from("t1"),
        PixelPoint::new(0.0, 0.0),
        PixelPoint::new(0.0, 0.0),
    );
    tracker.cancel();
    assert!(!tracker.is_active());
    assert!(tracker.finish(&grid, TOKEN_HALF, TOKEN_HALF).is_none());
}

#[test]
fn idle_tracker_ignores_updates() {
    let mut tracker = DragTracker::new();
    assert!(tracker.update(PixelPoint::new(10.0, 10.0)).is_none());
    assert!(tracker.active_token().is_none());
}
