//! Root game controller seam.
//!
//! Optional capabilities follow one rule: the accessor returns `None` when
//! the root does not offer it, and the move controller degrades to a no-op.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use shared::{protocol::GameData, Color, Role, Square};

use crate::board::Board;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SendMoveOpts {
    pub premove: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Round,
    Puzzle,
}

pub trait RootCtrl {
    type Board: Board;

    fn board(&self) -> &Self::Board;
    fn board_mut(&mut self) -> &mut Self::Board;
    fn data(&self) -> &GameData;
    fn redraw(&self);
    fn send_move(&mut self, orig: Square, dest: Square, promotion: Option<Role>, opts: SendMoveOpts);

    /// Keyboard move entry is active.
    fn keyboard(&self) -> bool {
        false
    }

    fn crazyhouse(&mut self) -> Option<&mut dyn CrazyhouseDrops> {
        None
    }

    fn ply_navigation(&mut self) -> Option<&mut dyn PlyNavigation> {
        None
    }

    fn move_confirmation(&mut self) -> Option<&mut dyn MoveConfirmation> {
        None
    }

    fn round_actions(&mut self) -> Option<&mut dyn RoundActions> {
        None
    }

    fn puzzle_actions(&mut self) -> Option<&mut dyn PuzzleActions> {
        None
    }

    fn clock(&self) -> Option<&dyn ChessClock> {
        None
    }
}

pub trait CrazyhouseDrops {
    /// Server-side drop rules, e.g. no pawns on the back ranks.
    fn valid(&self, role: Role, square: Square) -> bool;
    fn send_new_piece(&mut self, role: Role, square: Square, premove: bool);
}

pub trait PlyNavigation {
    fn jump_ply_delta(&mut self, delta: i32);
}

pub trait MoveConfirmation {
    fn submit_move(&mut self, confirm: bool);
}

pub trait RoundActions {
    fn offer_draw(&mut self, yes: bool, immediately: bool);
    fn resign(&mut self, yes: bool, immediately: bool);
    fn rematch(&mut self, accept: Option<bool>) -> bool;
    fn takeback_yes(&mut self);
}

pub trait PuzzleActions {
    fn next(&mut self);
    fn vote(&mut self, up: bool);
}

pub trait ChessClock {
    fn remaining(&self, color: Color) -> Duration;
    fn is_running(&self) -> bool;
}
