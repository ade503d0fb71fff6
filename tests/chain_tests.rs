//! Chain resolver tests - groups, cascades and garbage

use puyo_tui::core::{pass_score, resolve_chains, Board};
use puyo_tui::types::{BoardEvent, BoardEventKind, Cell};

fn resolve(board: &mut Board) -> (puyo_tui::core::ChainResult, Vec<BoardEvent>) {
    let mut events = Vec::new();
    let result = resolve_chains(board, |e| events.push(e));
    (result, events)
}

#[test]
fn test_four_in_a_row_clears() {
    let mut board = Board::from_rows(&["RRRR.."]);
    let (result, events) = resolve(&mut board);

    assert_eq!(result.chain_count, 1);
    assert_eq!(result.score, 90);
    assert_eq!(result.cleared_per_pass.as_slice(), &[4]);
    assert!(board.is_clear());
    assert_eq!(events.len(), 4);
    assert!(events
        .iter()
        .all(|e| e.kind == BoardEventKind::Cleared && e.chain == 1));
}

#[test]
fn test_three_stays() {
    let mut board = Board::from_rows(&["RRR..."]);
    let before = board.clone();
    let (result, events) = resolve(&mut board);

    assert_eq!(result.chain_count, 0);
    assert_eq!(result.score, 0);
    assert!(events.is_empty());
    assert_eq!(board, before);
}

#[test]
fn test_diagonal_is_not_connected() {
    let mut board = Board::from_rows(&["R.....", ".R....", "..R...", "...R.."]);
    let (result, _) = resolve(&mut board);
    assert_eq!(result.chain_count, 0);
    assert_eq!(board.occupied_count(), 4);
}

#[test]
fn test_two_pass_cascade() {
    // Reds clear first; the blues then fall together into a group of four.
    let mut board = Board::from_rows(&["B.....", "RB....", "RB....", "RRB..."]);
    let (result, events) = resolve(&mut board);

    assert_eq!(result.chain_count, 2);
    assert_eq!(result.cleared_per_pass.as_slice(), &[4, 4]);
    assert_eq!(result.score, pass_score(4, 1) + pass_score(4, 2));
    assert_eq!(result.score, 230);
    assert!(board.is_clear());

    let second_pass = events.iter().filter(|e| e.chain == 2).count();
    assert_eq!(second_pass, 4);
}

#[test]
fn test_larger_group_scores_every_cell() {
    let mut board = Board::from_rows(&["GG....", "GGG..."]);
    let (result, _) = resolve(&mut board);
    assert_eq!(result.score, pass_score(5, 1));
    assert_eq!(result.score, 100);
}

#[test]
fn test_separate_groups_clear_in_the_same_pass() {
    let mut board = Board::from_rows(&["RRRRYY", "BBBBYY"]);
    let (result, _) = resolve(&mut board);

    assert_eq!(result.chain_count, 1);
    assert_eq!(result.cleared_per_pass.as_slice(), &[12]);
    assert_eq!(result.score, 170);
    assert!(board.is_clear());
}

#[test]
fn test_garbage_never_groups() {
    let mut board = Board::from_rows(&["######"]);
    let (result, _) = resolve(&mut board);
    assert_eq!(result.chain_count, 0);
    assert_eq!(board.occupied_count(), 6);
}

#[test]
fn test_adjacent_garbage_is_removed_one_layer_deep() {
    let mut board = Board::from_rows(&["##RRRR"]);
    let (result, events) = resolve(&mut board);

    assert_eq!(result.garbage_cleared, 1);
    assert_eq!(board.get(0, 11), Cell::Garbage);
    assert_eq!(board.get(1, 11), Cell::Empty);

    let garbage_event = events
        .iter()
        .find(|e| e.cell == Cell::Garbage)
        .copied()
        .unwrap();
    assert_eq!((garbage_event.x, garbage_event.y), (1, 11));
    assert_eq!(garbage_event.chain, 1);
}

#[test]
fn test_garbage_does_not_affect_score() {
    let mut with_garbage = Board::from_rows(&["#RRRR#"]);
    let mut without = Board::from_rows(&[".RRRR."]);
    let (a, _) = resolve(&mut with_garbage);
    let (b, _) = resolve(&mut without);

    assert_eq!(a.score, b.score);
    assert_eq!(a.garbage_cleared, 2);
    assert!(with_garbage.is_clear());
}

#[test]
fn test_garbage_on_top_of_cleared_group_is_removed() {
    let mut board = Board::from_rows(&["#.....", "R.....", "R.....", "RR...."]);
    let (result, _) = resolve(&mut board);

    assert_eq!(result.garbage_cleared, 1);
    assert!(board.is_clear());
}
