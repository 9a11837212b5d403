use crate::{
    domain::{Color, Piece, Role, Square, Variant},
    error::{ParseRoleError, ParseSquareError},
    protocol::{CrazyData, GameData, Pocket},
};

#[test]
fn parses_corner_squares() {
    let a1: Square = "a1".parse().expect("a1");
    let h8: Square = "h8".parse().expect("h8");
    assert_eq!((a1.file(), a1.rank()), (0, 0));
    assert_eq!((h8.file(), h8.rank()), (7, 7));
    assert_eq!(h8.to_string(), "h8");
}

#[test]
fn rejects_keys_outside_the_alphabet() {
    for key in ["", "e", "e9", "i1", "E4", "e44", "a0"] {
        assert_eq!(
            key.parse::<Square>(),
            Err(ParseSquareError(key.to_string())),
            "{key} should not parse"
        );
    }
}

#[test]
fn piece_symbols_are_uppercase_only() {
    assert_eq!(Role::from_symbol('N'), Some(Role::Knight));
    assert_eq!(Role::from_symbol('n'), None);
    assert_eq!(Role::try_from('x'), Err(ParseRoleError('x')));
}

#[test]
fn fen_chars_carry_color() {
    assert_eq!(
        Piece::from_fen_char('q'),
        Some(Piece::new(Role::Queen, Color::Black))
    );
    assert_eq!(Piece::new(Role::Knight, Color::White).fen_char(), 'N');
}

#[test]
fn only_antichess_allows_king_promotion() {
    assert!(Variant::Antichess.allows_king_promotion());
    assert!(!Variant::Standard.allows_king_promotion());
    assert!(!Variant::Crazyhouse.allows_king_promotion());
}

#[test]
fn game_data_accepts_sparse_pockets() {
    let raw = r#"{
        "player": { "color": "black" },
        "game": { "variant": { "key": "crazyhouse" } },
        "crazyhouse": { "pockets": [ { "knight": 1 }, { "pawn": 2, "queen": 1 } ] }
    }"#;
    let data: GameData = serde_json::from_str(raw).expect("game data");

    assert_eq!(data.player.color, Color::Black);
    assert_eq!(data.variant(), Variant::Crazyhouse);
    let crazy = data.crazyhouse.expect("crazyhouse");
    assert_eq!(crazy.pocket(Color::White).count(Role::Knight), 1);
    assert_eq!(crazy.pocket(Color::Black).count(Role::Pawn), 2);
    assert!(!crazy.pocket(Color::Black).has(Role::Rook));
}

#[test]
fn variant_keys_use_server_casing() {
    let variant: Variant = serde_json::from_str("\"kingOfTheHill\"").expect("variant");
    assert_eq!(variant, Variant::KingOfTheHill);
}

#[test]
fn empty_pocket_entries_are_not_serialized() {
    let crazy = CrazyData {
        pockets: [Pocket::default().with(Role::Bishop, 1), Pocket::default()],
    };
    let json = serde_json::to_string(&crazy).expect("serialize");
    assert_eq!(json, r#"{"pockets":[{"bishop":1},{}]}"#);
}
