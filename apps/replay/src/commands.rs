//! Commands queued from the move controller to the game side.

use serde::Serialize;
use shared::{Role, Square};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RootCommand {
    Redraw,
    SendMove {
        orig: Square,
        dest: Square,
        promotion: Option<Role>,
        premove: bool,
    },
    SendNewPiece {
        role: Role,
        square: Square,
        premove: bool,
    },
    SubmitMove {
        confirm: bool,
    },
    JumpPlyDelta {
        delta: i32,
    },
    OfferDraw {
        yes: bool,
        immediately: bool,
    },
    Resign {
        yes: bool,
        immediately: bool,
    },
    Rematch {
        accept: Option<bool>,
    },
    TakebackYes,
    NextPuzzle,
    Vote {
        up: bool,
    },
}

impl RootCommand {
    pub fn name(&self) -> &'static str {
        match self {
            RootCommand::Redraw => "redraw",
            RootCommand::SendMove { .. } => "send_move",
            RootCommand::SendNewPiece { .. } => "send_new_piece",
            RootCommand::SubmitMove { .. } => "submit_move",
            RootCommand::JumpPlyDelta { .. } => "jump_ply_delta",
            RootCommand::OfferDraw { .. } => "offer_draw",
            RootCommand::Resign { .. } => "resign",
            RootCommand::Rematch { .. } => "rematch",
            RootCommand::TakebackYes => "takeback_yes",
            RootCommand::NextPuzzle => "next_puzzle",
            RootCommand::Vote { .. } => "vote",
        }
    }
}
