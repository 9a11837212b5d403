use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;
use shared::{
    protocol::{GameData, Step},
    Square,
};

/// Which optional root capabilities the scripted game offers.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    pub crazyhouse: bool,
    pub navigation: bool,
    pub confirmation: bool,
    pub round: bool,
    pub puzzle: bool,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ClockState {
    pub white_ms: u64,
    pub black_ms: u64,
    #[serde(default)]
    pub running: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DropGesture {
    pub square: Square,
    pub piece: char,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MoveGesture {
    pub orig: Square,
    pub dest: Square,
    #[serde(default)]
    pub piece: Option<char>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateGesture {
    pub fen: String,
    #[serde(default)]
    pub your_move: bool,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ResignGesture {
    pub yes: bool,
    #[serde(default)]
    pub immediately: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    Select(Square),
    Drop(DropGesture),
    Move(MoveGesture),
    Update(UpdateGesture),
    AdvanceMs(u64),
    Confirm,
    Jump(i32),
    Draw,
    Resign(ResignGesture),
    Rematch(Option<bool>),
    Takeback,
    Next,
    Vote(bool),
    Focus(bool),
    Modal(bool),
    JustSelected,
    Clock,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    pub step: Step,
    pub data: GameData,
    #[serde(default)]
    pub keyboard: bool,
    #[serde(default)]
    pub capabilities: Capabilities,
    #[serde(default)]
    pub clock: Option<ClockState>,
    pub gestures: Vec<Gesture>,
}

pub fn load(path: &Path) -> anyhow::Result<Script> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read script '{}'", path.display()))?;
    parse(&raw).with_context(|| format!("invalid script '{}'", path.display()))
}

pub fn parse(raw: &str) -> anyhow::Result<Script> {
    Ok(serde_json::from_str(raw)?)
}
