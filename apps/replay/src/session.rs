//! Drives a [`MoveCtrl`] through a scripted gesture sequence and reports
//! what reached the root.

use std::{io::Write, rc::Rc, time::Duration};

use anyhow::Context;
use move_input::{Board, ManualTime, MemoryBoard, Mode, MoveCtrl, RootCtrl, TimeSource};
use serde::Serialize;
use shared::{protocol::Step, Color, Square};
use tracing::info;

use crate::{
    commands::RootCommand,
    config::Settings,
    root::ScriptedRoot,
    script::{Gesture, Script},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Observation {
    Selected(Option<Square>),
    JustSelected(bool),
    Rematch(bool),
    Clock {
        white_ms: u64,
        black_ms: u64,
        running: bool,
    },
    Unsupported(&'static str),
}

#[derive(Serialize)]
struct Line<'a> {
    gesture: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    command: Option<&'a RootCommand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    observation: Option<&'a Observation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub mode: Mode,
    pub selected: Option<Square>,
    pub board_calls: usize,
    pub commands: Vec<RootCommand>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
}

pub fn run<W: Write>(script: Script, settings: &Settings, out: &mut W) -> anyhow::Result<Summary> {
    let board = MemoryBoard::from_fen(&script.step.fen)
        .with_context(|| format!("invalid starting fen '{}'", script.step.fen))?;
    let (cmd_tx, cmd_rx) = crossbeam_channel::bounded(settings.queue_capacity.max(1));
    let keyboard = settings.keyboard.unwrap_or(script.keyboard);
    let root = ScriptedRoot::new(
        board,
        script.data,
        keyboard,
        script.capabilities,
        script.clock,
        cmd_tx,
    );
    let time = Rc::new(ManualTime::new());
    let mut ctrl = MoveCtrl::with_time(root, &script.step, time.clone(), settings.input());
    ctrl.add_handler(Rc::new(
        |fen: &str, board: &dyn Board, your_move: Option<bool>| {
            info!(fen, selected = ?board.selected(), ?your_move, "position");
        },
    ));

    let mut commands = Vec::new();
    for (index, gesture) in script.gestures.into_iter().enumerate() {
        let observation = apply(&mut ctrl, &time, gesture);
        if let Some(observation) = &observation {
            write_line(out, index, None, Some(observation))?;
        }
        for cmd in cmd_rx.try_iter() {
            write_line(out, index, Some(&cmd), None)?;
            commands.push(cmd);
        }
    }

    let summary = Summary {
        mode: ctrl.mode(),
        selected: ctrl.has_selected(),
        board_calls: ctrl.root().board().calls().len(),
        commands,
        status: ctrl.root().status(),
    };
    info!(
        commands = summary.commands.len(),
        board_calls = summary.board_calls,
        "replay finished"
    );
    Ok(summary)
}

fn write_line<W: Write>(
    out: &mut W,
    gesture: usize,
    command: Option<&RootCommand>,
    observation: Option<&Observation>,
) -> anyhow::Result<()> {
    let line = Line {
        gesture,
        command,
        observation,
    };
    writeln!(out, "{}", serde_json::to_string(&line)?)?;
    Ok(())
}

fn apply<T: TimeSource>(
    ctrl: &mut MoveCtrl<ScriptedRoot, T>,
    time: &ManualTime,
    gesture: Gesture,
) -> Option<Observation> {
    match gesture {
        Gesture::Select(square) => {
            ctrl.select(square);
            Some(Observation::Selected(ctrl.has_selected()))
        }
        Gesture::Drop(piece_drop) => {
            ctrl.drop_piece(piece_drop.square, piece_drop.piece);
            None
        }
        Gesture::Move(mv) => {
            ctrl.move_piece(mv.orig, mv.dest, mv.piece);
            None
        }
        Gesture::Update(update) => {
            ctrl.update(&Step::new(update.fen), update.your_move);
            None
        }
        Gesture::AdvanceMs(ms) => {
            time.advance(Duration::from_millis(ms));
            None
        }
        Gesture::Confirm => unsupported(ctrl.confirm_move(), "confirm"),
        Gesture::Jump(delta) => {
            ctrl.jump(delta);
            None
        }
        Gesture::Draw => unsupported(ctrl.draw(), "draw"),
        Gesture::Resign(resign) => unsupported(ctrl.resign(resign.yes, resign.immediately), "resign"),
        Gesture::Rematch(accept) => Some(Observation::Rematch(ctrl.rematch(accept))),
        Gesture::Takeback => unsupported(ctrl.takeback(), "takeback"),
        Gesture::Next => unsupported(ctrl.next(), "next"),
        Gesture::Vote(up) => unsupported(ctrl.vote(up), "vote"),
        Gesture::Focus(focused) => {
            ctrl.set_focused(focused);
            None
        }
        Gesture::Modal(open) => {
            ctrl.set_modal_open(open);
            None
        }
        Gesture::JustSelected => Some(Observation::JustSelected(ctrl.just_selected())),
        Gesture::Clock => Some(match ctrl.clock() {
            Some(clock) => Observation::Clock {
                white_ms: millis(clock.remaining(Color::White)),
                black_ms: millis(clock.remaining(Color::Black)),
                running: clock.is_running(),
            },
            None => Observation::Unsupported("clock"),
        }),
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn unsupported(result: Option<()>, what: &'static str) -> Option<Observation> {
    result.is_none().then_some(Observation::Unsupported(what))
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
