use crate::{board::BoardCall, promote, Board, MemoryBoard};
use shared::{error::ParseFenError, Color, Piece, Role, Square};

fn sq(key: &str) -> Square {
    key.parse().expect("square")
}

#[test]
fn start_position_has_thirty_two_pieces() {
    let board =
        MemoryBoard::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
            .expect("fen");
    assert_eq!(board.piece_count(), 32);
    assert_eq!(
        board.piece_at(sq("e1")),
        Some(Piece::new(Role::King, Color::White))
    );
    assert_eq!(
        board.piece_at(sq("d8")),
        Some(Piece::new(Role::Queen, Color::Black))
    );
    assert!(!board.has_piece(sq("e4")));
}

#[test]
fn crazyhouse_fen_keeps_promotion_markers_and_skips_pocket() {
    let board = MemoryBoard::from_fen("4Q~3/8/8/8/8/8/8/4k2K[Nn] w - - 0 1").expect("fen");
    assert_eq!(
        board.piece_at(sq("e8")),
        Some(Piece {
            role: Role::Queen,
            color: Color::White,
            promoted: true,
        })
    );
    assert_eq!(board.piece_count(), 3);

    let slashed = MemoryBoard::from_fen("8/8/8/8/8/8/8/4k2K/Nn w - - 0 1").expect("fen");
    assert_eq!(slashed.piece_count(), 2);
}

#[test]
fn malformed_placements_are_rejected() {
    assert_eq!(
        MemoryBoard::from_fen("8/8/8").unwrap_err(),
        ParseFenError::RankCount(3)
    );
    assert_eq!(
        MemoryBoard::from_fen("9/8/8/8/8/8/8/8").unwrap_err(),
        ParseFenError::RankOverflow { rank: 8 }
    );
    assert_eq!(
        MemoryBoard::from_fen("7/8/8/8/8/8/8/8").unwrap_err(),
        ParseFenError::RankUnderflow { rank: 8, files: 7 }
    );
    assert_eq!(
        MemoryBoard::from_fen("7x/8/8/8/8/8/8/8").unwrap_err(),
        ParseFenError::UnexpectedChar('x')
    );
}

#[test]
fn click_to_move_completes_only_when_forced() {
    let mut board = MemoryBoard::from_fen("8/8/8/8/8/8/4P3/8").expect("fen");
    board.select_square(sq("e2"), true);
    board.select_square(sq("e4"), false);
    assert_eq!(board.selected(), None);
    assert_eq!(board.last_move(), None);

    board.select_square(sq("e2"), true);
    board.select_square(sq("e4"), true);
    assert_eq!(board.last_move(), Some((sq("e2"), sq("e4"))));
    assert!(board.has_piece(sq("e4")));
    assert!(!board.has_piece(sq("e2")));
}

#[test]
fn clicking_own_piece_moves_selection() {
    let mut board = MemoryBoard::from_fen("8/8/8/8/8/8/3PP3/8").expect("fen");
    board.select_square(sq("d2"), true);
    board.select_square(sq("e2"), true);
    assert_eq!(board.selected(), Some(sq("e2")));
    assert_eq!(board.last_move(), None);
}

#[test]
fn clicking_empty_square_with_nothing_selected_selects_nothing() {
    let mut board = MemoryBoard::empty();
    board.select_square(sq("a1"), true);
    assert_eq!(board.selected(), None);
    assert_eq!(
        board.calls(),
        &[BoardCall::SelectSquare {
            square: sq("a1"),
            force: true
        }]
    );
}

#[test]
fn promote_replaces_pawn_only() {
    let mut board = MemoryBoard::from_fen("3nP3/8/8/8/8/8/8/8").expect("fen");

    promote(&mut board, sq("e8"), Role::Knight);
    promote(&mut board, sq("d8"), Role::Queen);
    promote(&mut board, sq("a1"), Role::Queen);

    assert_eq!(
        board.piece_at(sq("e8")),
        Some(Piece {
            role: Role::Knight,
            color: Color::White,
            promoted: true,
        })
    );
    assert_eq!(
        board.piece_at(sq("d8")),
        Some(Piece::new(Role::Knight, Color::Black))
    );
    assert_eq!(board.calls().len(), 1);
}
