//! Root controller backed by a script: every action becomes a queued
//! [`RootCommand`].

use std::{cell::RefCell, time::Duration};

use crossbeam_channel::Sender;
use move_input::{
    ChessClock, CrazyhouseDrops, MemoryBoard, MoveConfirmation, PlyNavigation, PuzzleActions,
    RootCtrl, RoundActions, SendMoveOpts,
};
use shared::{protocol::GameData, Color, Role, Square};

use crate::{
    commands::RootCommand,
    orchestration::dispatch_root_command,
    script::{Capabilities, ClockState},
};

struct Dispatcher {
    cmd_tx: Sender<RootCommand>,
    status: RefCell<String>,
}

impl Dispatcher {
    fn dispatch(&self, cmd: RootCommand) {
        dispatch_root_command(&self.cmd_tx, cmd, &mut self.status.borrow_mut());
    }
}

impl CrazyhouseDrops for Dispatcher {
    fn valid(&self, role: Role, square: Square) -> bool {
        role != Role::Pawn || (1..7).contains(&square.rank())
    }

    fn send_new_piece(&mut self, role: Role, square: Square, premove: bool) {
        self.dispatch(RootCommand::SendNewPiece {
            role,
            square,
            premove,
        });
    }
}

impl PlyNavigation for Dispatcher {
    fn jump_ply_delta(&mut self, delta: i32) {
        self.dispatch(RootCommand::JumpPlyDelta { delta });
    }
}

impl MoveConfirmation for Dispatcher {
    fn submit_move(&mut self, confirm: bool) {
        self.dispatch(RootCommand::SubmitMove { confirm });
    }
}

impl RoundActions for Dispatcher {
    fn offer_draw(&mut self, yes: bool, immediately: bool) {
        self.dispatch(RootCommand::OfferDraw { yes, immediately });
    }

    fn resign(&mut self, yes: bool, immediately: bool) {
        self.dispatch(RootCommand::Resign { yes, immediately });
    }

    fn rematch(&mut self, accept: Option<bool>) -> bool {
        self.dispatch(RootCommand::Rematch { accept });
        accept.unwrap_or(false)
    }

    fn takeback_yes(&mut self) {
        self.dispatch(RootCommand::TakebackYes);
    }
}

impl PuzzleActions for Dispatcher {
    fn next(&mut self) {
        self.dispatch(RootCommand::NextPuzzle);
    }

    fn vote(&mut self, up: bool) {
        self.dispatch(RootCommand::Vote { up });
    }
}

struct FixedClock(ClockState);

impl ChessClock for FixedClock {
    fn remaining(&self, color: Color) -> Duration {
        match color {
            Color::White => Duration::from_millis(self.0.white_ms),
            Color::Black => Duration::from_millis(self.0.black_ms),
        }
    }

    fn is_running(&self) -> bool {
        self.0.running
    }
}

pub struct ScriptedRoot {
    board: MemoryBoard,
    data: GameData,
    keyboard: bool,
    capabilities: Capabilities,
    clock: Option<FixedClock>,
    dispatcher: Dispatcher,
}

impl ScriptedRoot {
    pub fn new(
        board: MemoryBoard,
        data: GameData,
        keyboard: bool,
        capabilities: Capabilities,
        clock: Option<ClockState>,
        cmd_tx: Sender<RootCommand>,
    ) -> Self {
        Self {
            board,
            data,
            keyboard,
            capabilities,
            clock: clock.map(FixedClock),
            dispatcher: Dispatcher {
                cmd_tx,
                status: RefCell::new(String::new()),
            },
        }
    }

    /// Last queueing problem, if any; empty when all commands went through.
    pub fn status(&self) -> String {
        self.dispatcher.status.borrow().clone()
    }
}

impl RootCtrl for ScriptedRoot {
    type Board = MemoryBoard;

    fn board(&self) -> &MemoryBoard {
        &self.board
    }

    fn board_mut(&mut self) -> &mut MemoryBoard {
        &mut self.board
    }

    fn data(&self) -> &GameData {
        &self.data
    }

    fn redraw(&self) {
        self.dispatcher.dispatch(RootCommand::Redraw);
    }

    fn send_move(&mut self, orig: Square, dest: Square, promotion: Option<Role>, opts: SendMoveOpts) {
        self.dispatcher.dispatch(RootCommand::SendMove {
            orig,
            dest,
            promotion,
            premove: opts.premove,
        });
    }

    fn keyboard(&self) -> bool {
        self.keyboard
    }

    fn crazyhouse(&mut self) -> Option<&mut dyn CrazyhouseDrops> {
        self.capabilities
            .crazyhouse
            .then_some(&mut self.dispatcher as &mut dyn CrazyhouseDrops)
    }

    fn ply_navigation(&mut self) -> Option<&mut dyn PlyNavigation> {
        self.capabilities
            .navigation
            .then_some(&mut self.dispatcher as &mut dyn PlyNavigation)
    }

    fn move_confirmation(&mut self) -> Option<&mut dyn MoveConfirmation> {
        self.capabilities
            .confirmation
            .then_some(&mut self.dispatcher as &mut dyn MoveConfirmation)
    }

    fn round_actions(&mut self) -> Option<&mut dyn RoundActions> {
        self.capabilities
            .round
            .then_some(&mut self.dispatcher as &mut dyn RoundActions)
    }

    fn puzzle_actions(&mut self) -> Option<&mut dyn PuzzleActions> {
        self.capabilities
            .puzzle
            .then_some(&mut self.dispatcher as &mut dyn PuzzleActions)
    }

    fn clock(&self) -> Option<&dyn ChessClock> {
        self.clock.as_ref().map(|clock| clock as &dyn ChessClock)
    }
}
