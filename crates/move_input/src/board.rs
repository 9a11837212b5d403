//! Board widget seam and an in-memory widget model.

use std::collections::HashMap;

use shared::{error::ParseFenError, Color, Piece, Square};

/// What the controller needs from the board widget: selection state,
/// square occupancy and piece placement.
pub trait Board {
    fn selected(&self) -> Option<Square>;
    fn piece_at(&self, square: Square) -> Option<Piece>;
    fn has_piece(&self, square: Square) -> bool {
        self.piece_at(square).is_some()
    }
    /// Click on `square`. With `force`, a second click completes the move
    /// from the current selection.
    fn select_square(&mut self, square: Square, force: bool);
    fn cancel_move(&mut self);
    fn new_piece(&mut self, piece: Piece, square: Square);
    /// Applies a placement diff; `None` clears the square.
    fn set_pieces(&mut self, diff: &[(Square, Option<Piece>)]);
}

/// Every mutating call a [`MemoryBoard`] has received, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardCall {
    SelectSquare { square: Square, force: bool },
    CancelMove,
    NewPiece { piece: Piece, square: Square },
    SetPieces(Vec<(Square, Option<Piece>)>),
}

#[derive(Debug, Clone, Default)]
pub struct MemoryBoard {
    pieces: HashMap<Square, Piece>,
    selected: Option<Square>,
    last_move: Option<(Square, Square)>,
    calls: Vec<BoardCall>,
}

impl MemoryBoard {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a board from the placement field of a FEN. Crazyhouse pocket
    /// suffixes (`[...]`) and promotion markers (`~`) are understood.
    pub fn from_fen(fen: &str) -> Result<Self, ParseFenError> {
        let placement = fen.split_whitespace().next().unwrap_or_default();
        let placement = placement.split('[').next().unwrap_or_default();
        let ranks: Vec<&str> = placement.split('/').collect();
        // A ninth segment holds the pocket in some crazyhouse FENs.
        let ranks = match ranks.len() {
            9 => &ranks[..8],
            8 => &ranks[..],
            n => return Err(ParseFenError::RankCount(n)),
        };

        let mut pieces: HashMap<Square, Piece> = HashMap::new();
        for (row, text) in ranks.iter().enumerate() {
            let rank = 7 - row as u8;
            let mut file = 0u8;
            let mut last: Option<Square> = None;
            for c in text.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as u8;
                    last = None;
                } else if c == '~' {
                    let Some(square) = last else {
                        return Err(ParseFenError::UnexpectedChar(c));
                    };
                    if let Some(piece) = pieces.get_mut(&square) {
                        piece.promoted = true;
                    }
                } else {
                    let piece = Piece::from_fen_char(c).ok_or(ParseFenError::UnexpectedChar(c))?;
                    let square = Square::new(file, rank).ok_or(ParseFenError::RankOverflow {
                        rank: rank + 1,
                    })?;
                    pieces.insert(square, piece);
                    last = Some(square);
                    file += 1;
                }
                if file > 8 {
                    return Err(ParseFenError::RankOverflow { rank: rank + 1 });
                }
            }
            if file != 8 {
                return Err(ParseFenError::RankUnderflow {
                    rank: rank + 1,
                    files: file,
                });
            }
        }

        Ok(Self {
            pieces,
            ..Self::default()
        })
    }

    pub fn calls(&self) -> &[BoardCall] {
        &self.calls
    }

    pub fn last_move(&self) -> Option<(Square, Square)> {
        self.last_move
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    fn apply_move(&mut self, orig: Square, dest: Square) {
        if let Some(piece) = self.pieces.remove(&orig) {
            self.pieces.insert(dest, piece);
            self.last_move = Some((orig, dest));
        }
    }

    fn color_at(&self, square: Square) -> Option<Color> {
        self.pieces.get(&square).map(|piece| piece.color)
    }
}

impl Board for MemoryBoard {
    fn selected(&self) -> Option<Square> {
        self.selected
    }

    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.pieces.get(&square).copied()
    }

    fn select_square(&mut self, square: Square, force: bool) {
        self.calls.push(BoardCall::SelectSquare { square, force });
        match self.selected {
            Some(current) if current == square => self.selected = None,
            Some(current) => {
                let own = self.color_at(current);
                if own.is_some() && self.color_at(square) == own {
                    self.selected = Some(square);
                } else {
                    if force {
                        self.apply_move(current, square);
                    }
                    self.selected = None;
                }
            }
            None => {
                if self.pieces.contains_key(&square) {
                    self.selected = Some(square);
                }
            }
        }
    }

    fn cancel_move(&mut self) {
        self.calls.push(BoardCall::CancelMove);
        self.selected = None;
    }

    fn new_piece(&mut self, piece: Piece, square: Square) {
        self.calls.push(BoardCall::NewPiece { piece, square });
        self.pieces.insert(square, piece);
        self.selected = None;
    }

    fn set_pieces(&mut self, diff: &[(Square, Option<Piece>)]) {
        self.calls.push(BoardCall::SetPieces(diff.to_vec()));
        for (square, piece) in diff {
            match piece {
                Some(piece) => self.pieces.insert(*square, *piece),
                None => self.pieces.remove(square),
            };
        }
    }
}
