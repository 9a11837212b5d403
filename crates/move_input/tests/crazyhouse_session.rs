use std::{cell::RefCell, rc::Rc, time::Duration};

use move_input::{
    Board, BoardCall, CrazyhouseDrops, InputSettings, ManualTime, MemoryBoard, MoveCtrl,
    RootCtrl, SendMoveOpts,
};
use shared::{
    protocol::{CrazyData, GameData, Pocket, Step},
    Color, Piece, Role, Square, Variant,
};

const FEN: &str = "rnbqkb1r/pppppppp/8/8/8/8/PPPPPPPP/RNBQKB1R[Nn] w KQkq - 0 3";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Sent {
    Move(Square, Square, Option<Role>),
    NewPiece(Role, Square, bool),
}

struct Drops {
    sent: Rc<RefCell<Vec<Sent>>>,
}

impl CrazyhouseDrops for Drops {
    fn valid(&self, role: Role, square: Square) -> bool {
        role != Role::Pawn || (1..7).contains(&square.rank())
    }

    fn send_new_piece(&mut self, role: Role, square: Square, premove: bool) {
        self.sent
            .borrow_mut()
            .push(Sent::NewPiece(role, square, premove));
    }
}

struct SessionRoot {
    board: MemoryBoard,
    data: GameData,
    drops: Drops,
    sent: Rc<RefCell<Vec<Sent>>>,
}

impl RootCtrl for SessionRoot {
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

    fn redraw(&self) {}

    fn send_move(&mut self, orig: Square, dest: Square, promotion: Option<Role>, _opts: SendMoveOpts) {
        self.sent
            .borrow_mut()
            .push(Sent::Move(orig, dest, promotion));
    }

    fn crazyhouse(&mut self) -> Option<&mut dyn CrazyhouseDrops> {
        Some(&mut self.drops)
    }
}

fn sq(key: &str) -> Square {
    key.parse().expect("square")
}

fn session() -> (MoveCtrl<SessionRoot, Rc<ManualTime>>, Rc<RefCell<Vec<Sent>>>, Rc<ManualTime>) {
    let sent = Rc::new(RefCell::new(Vec::new()));
    let data = GameData::new(Color::White, Variant::Crazyhouse).with_crazyhouse(CrazyData {
        pockets: [
            Pocket::default().with(Role::Knight, 1).with(Role::Pawn, 1),
            Pocket::default().with(Role::Knight, 1),
        ],
    });
    let root = SessionRoot {
        board: MemoryBoard::from_fen(FEN).expect("fen"),
        data,
        drops: Drops { sent: sent.clone() },
        sent: sent.clone(),
    };
    let time = Rc::new(ManualTime::new());
    let ctrl = MoveCtrl::with_time(root, &Step::new(FEN), time.clone(), InputSettings::default());
    (ctrl, sent, time)
}

#[test]
fn knight_drop_reaches_board_and_server_once() {
    let (mut ctrl, sent, _) = session();

    ctrl.drop_piece(sq("e4"), 'N');

    let new_pieces: Vec<_> = ctrl
        .root()
        .board
        .calls()
        .iter()
        .filter(|call| matches!(call, BoardCall::NewPiece { .. }))
        .cloned()
        .collect();
    assert_eq!(
        new_pieces,
        vec![BoardCall::NewPiece {
            piece: Piece::new(Role::Knight, Color::White),
            square: sq("e4"),
        }]
    );
    assert_eq!(
        sent.borrow().as_slice(),
        &[Sent::NewPiece(Role::Knight, sq("e4"), false)]
    );
}

#[test]
fn pawn_drop_on_back_rank_is_refused_by_rules() {
    let (mut ctrl, sent, _) = session();

    ctrl.drop_piece(sq("g1"), 'P');

    assert!(ctrl.root().board.calls().is_empty());
    assert!(sent.borrow().is_empty());
}

#[test]
fn drop_cancels_pending_selection() {
    let (mut ctrl, _, _) = session();
    ctrl.select(sq("b1"));
    assert_eq!(ctrl.has_selected(), Some(sq("b1")));

    ctrl.drop_piece(sq("d4"), 'N');

    assert_eq!(ctrl.has_selected(), None);
    assert!(ctrl.root().board.has_piece(sq("d4")));
}

#[test]
fn handlers_follow_server_confirmed_positions() {
    let (mut ctrl, _, time) = session();
    let fens = Rc::new(RefCell::new(Vec::new()));
    let sink = fens.clone();
    ctrl.add_handler(Rc::new(move |fen: &str, board: &dyn Board, your_move: Option<bool>| {
        sink.borrow_mut()
            .push((fen.to_string(), board.selected(), your_move));
    }));

    ctrl.select(sq("e2"));
    ctrl.select(sq("e4"));
    time.advance(Duration::from_millis(800));
    let next = "rnbqkb1r/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKB1R[Nn] b KQkq - 0 3";
    ctrl.update(&Step::new(next), false);

    assert!(!ctrl.just_selected());
    assert_eq!(
        fens.borrow().as_slice(),
        &[
            (FEN.to_string(), None, None),
            (next.to_string(), None, Some(false)),
        ]
    );
    assert_eq!(ctrl.root().board.last_move(), Some((sq("e2"), sq("e4"))));
}
