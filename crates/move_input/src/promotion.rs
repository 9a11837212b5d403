use shared::{Piece, Role, Square};

use crate::board::Board;

/// Swaps the pawn standing on `square` for a promoted `role` of the same
/// color. Anything other than a pawn is left alone.
pub fn promote<B: Board + ?Sized>(board: &mut B, square: Square, role: Role) {
    let Some(piece) = board.piece_at(square) else {
        return;
    };
    if piece.role != Role::Pawn {
        return;
    }
    board.set_pieces(&[(
        square,
        Some(Piece {
            role,
            color: piece.color,
            promoted: true,
        }),
    )]);
}
