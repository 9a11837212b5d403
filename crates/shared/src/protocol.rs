use std::collections::BTreeMap;

use enum_map::EnumMap;
use serde::{Deserialize, Serialize};

use crate::domain::{Color, Role, Variant};

/// Position snapshot pushed by the game server after each confirmed move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub fen: String,
}

impl Step {
    pub fn new(fen: impl Into<String>) -> Self {
        Self { fen: fen.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerData {
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VariantData {
    pub key: Variant,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameInfo {
    pub variant: VariantData,
}

/// Captured pieces available for dropping, counted per role.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Role, u8>", into = "BTreeMap<Role, u8>")]
pub struct Pocket(EnumMap<Role, u8>);

impl Pocket {
    pub fn count(&self, role: Role) -> u8 {
        self.0[role]
    }

    pub fn has(&self, role: Role) -> bool {
        self.count(role) > 0
    }

    pub fn set(&mut self, role: Role, count: u8) {
        self.0[role] = count;
    }

    pub fn with(mut self, role: Role, count: u8) -> Self {
        self.set(role, count);
        self
    }
}

impl From<BTreeMap<Role, u8>> for Pocket {
    fn from(value: BTreeMap<Role, u8>) -> Self {
        let mut pocket = Pocket::default();
        for (role, count) in value {
            pocket.set(role, count);
        }
        pocket
    }
}

impl From<Pocket> for BTreeMap<Role, u8> {
    fn from(value: Pocket) -> Self {
        value.0.into_iter().filter(|(_, count)| *count > 0).collect()
    }
}

/// Crazyhouse state as sent by the server: pockets indexed white first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CrazyData {
    pub pockets: [Pocket; 2],
}

impl CrazyData {
    pub fn pocket(&self, color: Color) -> &Pocket {
        match color {
            Color::White => &self.pockets[0],
            Color::Black => &self.pockets[1],
        }
    }

    pub fn pocket_mut(&mut self, color: Color) -> &mut Pocket {
        match color {
            Color::White => &mut self.pockets[0],
            Color::Black => &mut self.pockets[1],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameData {
    pub player: PlayerData,
    #[serde(default)]
    pub game: GameInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crazyhouse: Option<CrazyData>,
}

impl GameData {
    pub fn new(color: Color, variant: Variant) -> Self {
        Self {
            player: PlayerData { color },
            game: GameInfo {
                variant: VariantData { key: variant },
            },
            crazyhouse: None,
        }
    }

    pub fn with_crazyhouse(mut self, crazyhouse: CrazyData) -> Self {
        self.crazyhouse = Some(crazyhouse);
        self
    }

    pub fn variant(&self) -> Variant {
        self.game.variant.key
    }
}
