//! Queueing of root commands onto the session channel.

use crossbeam_channel::{Sender, TrySendError};

use crate::commands::RootCommand;

pub fn dispatch_root_command(cmd_tx: &Sender<RootCommand>, cmd: RootCommand, status: &mut String) {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued root command"),
        Err(TrySendError::Full(_)) => {
            *status = format!("root command queue is full; dropped {cmd_name}");
            tracing::warn!(command = cmd_name, "root command queue full");
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = format!("root command consumer disconnected; dropped {cmd_name}");
            tracing::warn!(command = cmd_name, "root command consumer disconnected");
        }
    }
}
