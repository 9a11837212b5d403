use std::{rc::Rc, time::Instant};

use shared::{protocol::Step, Role, Square};
use tracing::{debug, trace};

pub mod board;
pub mod promotion;
pub mod root;
pub mod settings;
pub mod time;

pub use board::{Board, BoardCall, MemoryBoard};
pub use promotion::promote;
pub use root::{
    ChessClock, CrazyhouseDrops, Mode, MoveConfirmation, PlyNavigation, PuzzleActions,
    RootCtrl, RoundActions, SendMoveOpts,
};
pub use settings::InputSettings;
pub use time::{ManualTime, MonotonicTime, TimeSource};

/// Position-change listener: `(fen, board, your_move)`. `your_move` is
/// `None` for the replay a handler gets when it is first registered.
pub type MoveHandler = Rc<dyn Fn(&str, &dyn Board, Option<bool>)>;

/// Turns board gestures into moves and drops for the root controller, and
/// keeps the bits of interaction state sibling widgets read.
pub struct MoveCtrl<R: RootCtrl, T: TimeSource = MonotonicTime> {
    root: R,
    time: T,
    settings: InputSettings,
    handlers: Vec<MoveHandler>,
    init_fen: String,
    last_select: Instant,
    is_focused: bool,
    modal_open: bool,
    mode: Mode,
}

impl<R: RootCtrl> MoveCtrl<R> {
    pub fn new(root: R, step: &Step) -> Self {
        Self::with_time(root, step, MonotonicTime, InputSettings::default())
    }
}

impl<R: RootCtrl, T: TimeSource> MoveCtrl<R, T> {
    pub fn with_time(mut root: R, step: &Step, time: T, settings: InputSettings) -> Self {
        let mode = if root.puzzle_actions().is_some() {
            Mode::Puzzle
        } else {
            Mode::Round
        };
        let last_select = time.now();
        Self {
            root,
            time,
            settings,
            handlers: Vec::new(),
            init_fen: step.fen.clone(),
            last_select,
            is_focused: false,
            modal_open: false,
            mode,
        }
    }

    /// Clicking the selected square again cancels; any other square is
    /// handed to the board's click-to-move logic.
    pub fn select(&mut self, square: Square) {
        if self.root.board().selected() == Some(square) {
            trace!(%square, "selection cancelled");
            self.root.board_mut().cancel_move();
        } else {
            self.root.board_mut().select_square(square, true);
            self.last_select = self.last_select.max(self.time.now());
        }
    }

    /// Crazyhouse drop of `piece` (an uppercase symbol) onto `square`.
    /// Every rejected precondition is a silent no-op.
    pub fn drop_piece(&mut self, square: Square, piece: char) {
        if self.root.crazyhouse().is_none() {
            return drop_ignored(square, piece, "crazyhouse_unavailable");
        }
        let Some(role) = Role::from_symbol(piece) else {
            return drop_ignored(square, piece, "unknown_symbol");
        };
        let color = self.root.data().player.color;
        let Some(crazy) = self.root.data().crazyhouse.as_ref() else {
            return drop_ignored(square, piece, "no_pockets");
        };
        let in_pocket = crazy.pocket(color).has(role);
        if self.root.board().has_piece(square) {
            return drop_ignored(square, piece, "occupied");
        }
        if !in_pocket {
            return drop_ignored(square, piece, "not_in_pocket");
        }
        let valid = self
            .root
            .crazyhouse()
            .is_some_and(|crazyhouse| crazyhouse.valid(role, square));
        if !valid {
            return drop_ignored(square, piece, "rejected_by_rules");
        }

        let board = self.root.board_mut();
        board.cancel_move();
        board.new_piece(shared::Piece::new(role, color), square);
        if let Some(crazyhouse) = self.root.crazyhouse() {
            crazyhouse.send_new_piece(role, square, false);
        }
        debug!(%square, ?role, "dropped piece");
    }

    /// Resynchronizes after the authoritative side confirms a position.
    pub fn update(&mut self, step: &Step, your_move: bool) {
        self.init_fen.clone_from(&step.fen);
        let board = self.root.board();
        for handler in &self.handlers {
            handler(&step.fen, board, Some(your_move));
        }
    }

    /// Registers `handler` and immediately replays the current position to
    /// it. Registering the same handler twice keeps a single entry.
    pub fn add_handler(&mut self, handler: MoveHandler) {
        let known = self
            .handlers
            .iter()
            .any(|h| std::ptr::addr_eq(Rc::as_ptr(h), Rc::as_ptr(&handler)));
        if !known {
            self.handlers.push(handler.clone());
        }
        handler(&self.init_fen, self.root.board(), None);
    }

    /// Completes a gesture from `orig` to `dest`. With a piece symbol this is
    /// a promotion choice and goes straight to the root; without one the two
    /// squares are clicked in turn.
    pub fn move_piece(&mut self, orig: Square, dest: Square, piece: Option<char>) {
        let variant = self.root.data().variant();
        let role = piece.and_then(|c| Role::from_symbol(c.to_ascii_uppercase()));
        match role {
            Some(Role::Pawn) => return,
            Some(Role::King) if !variant.allows_king_promotion() => return,
            _ => {}
        }

        self.root.board_mut().cancel_move();
        match role {
            Some(role) => {
                promote(self.root.board_mut(), dest, role);
                debug!(%orig, %dest, ?role, "sending promotion");
                self.root
                    .send_move(orig, dest, Some(role), SendMoveOpts { premove: false });
            }
            None => {
                let keyboard = self.root.keyboard();
                let board = self.root.board_mut();
                board.select_square(orig, true);
                board.select_square(dest, keyboard);
            }
        }
    }

    pub fn has_selected(&self) -> Option<Square> {
        self.root.board().selected()
    }

    pub fn confirm_move(&mut self) -> Option<()> {
        self.root
            .move_confirmation()
            .map(|confirmation| confirmation.submit_move(true))
    }

    pub fn jump(&mut self, ply_delta: i32) {
        if let Some(navigation) = self.root.ply_navigation() {
            navigation.jump_ply_delta(ply_delta);
        }
        self.root.redraw();
    }

    pub fn just_selected(&self) -> bool {
        self.time.now().saturating_duration_since(self.last_select)
            < self.settings.just_selected_window
    }

    pub fn clock(&self) -> Option<&dyn ChessClock> {
        self.root.clock()
    }

    pub fn draw(&mut self) -> Option<()> {
        self.root
            .round_actions()
            .map(|round| round.offer_draw(true, true))
    }

    pub fn resign(&mut self, yes: bool, immediately: bool) -> Option<()> {
        self.root
            .round_actions()
            .map(|round| round.resign(yes, immediately))
    }

    pub fn rematch(&mut self, accept: Option<bool>) -> bool {
        self.root
            .round_actions()
            .is_some_and(|round| round.rematch(accept))
    }

    pub fn takeback(&mut self) -> Option<()> {
        self.root.round_actions().map(|round| round.takeback_yes())
    }

    pub fn next(&mut self) -> Option<()> {
        self.root.puzzle_actions().map(|puzzle| puzzle.next())
    }

    pub fn vote(&mut self, up: bool) -> Option<()> {
        self.root.puzzle_actions().map(|puzzle| puzzle.vote(up))
    }

    pub fn is_focused(&self) -> bool {
        self.is_focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.is_focused = focused;
        self.root.redraw();
    }

    pub fn modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn set_modal_open(&mut self, open: bool) {
        self.modal_open = open;
        self.root.redraw();
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// SAN entry is not wired to this controller; always `false`.
    pub fn used_san(&self) -> bool {
        false
    }

    pub fn redraw(&self) {
        self.root.redraw();
    }

    pub fn root(&self) -> &R {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut R {
        &mut self.root
    }

    pub fn into_root(self) -> R {
        self.root
    }
}

fn drop_ignored(square: Square, piece: char, reason: &'static str) {
    debug!(%square, %piece, reason, "drop ignored");
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests/board_tests.rs"]
mod board_tests;
