//! Fire-and-forget notifications for finished runs.

use crate::rover::RunResult;
use crate::service::Coordinates;
use crossbeam_channel::{Sender, TrySendError};
use log::{info, warn};
use serde::Serialize;

/// The event fired after every successful run.
pub const NEW_RUN_EVENT: &str = "new:rover";

/// The payload of a [`NEW_RUN_EVENT`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunEvent {
    pub result: RunResult,
    /// The start coordinates exactly as they were requested.
    pub coordinates: Coordinates,
    /// The instruction string exactly as it was requested.
    pub instructions: String,
}

impl RunEvent {
    pub fn name(&self) -> &'static str {
        NEW_RUN_EVENT
    }
}

/// Receives run events. Delivery is best effort and never reports back to the caller.
pub trait NotificationSink: Send + Sync {
    #[allow(unused_variables)]
    fn notify(&self, event: &RunEvent) {}
}

pub struct NoOpNotifier;
impl NotificationSink for NoOpNotifier {}

/// Writes every event to the log.
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn notify(&self, event: &RunEvent) {
        info!(
            "{}: {} with {} ended at {}",
            event.name(),
            event.result.start,
            event.instructions,
            event.result.end
        );
    }
}

/// Hands events to a channel so that a listener can handle them on its own thread.
///
/// Never blocks: when the channel is full or the listener is gone the event is dropped
/// with a warning.
pub struct ChannelNotifier {
    sender: Sender<RunEvent>,
}

impl ChannelNotifier {
    pub fn new(sender: Sender<RunEvent>) -> ChannelNotifier {
        ChannelNotifier { sender }
    }
}

impl NotificationSink for ChannelNotifier {
    fn notify(&self, event: &RunEvent) {
        match self.sender.try_send(event.clone()) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                warn!("Dropped {} event, the listener is not keeping up", event.name());
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!("Dropped {} event, the listener is gone", event.name());
            }
        }
    }
}
