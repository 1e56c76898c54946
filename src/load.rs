//! Background acquisition.
//!
//! Runs the chain once on a tokio task and hands the outcome to the UI
//! thread over a [`oneshot`] channel.  The channel carries exactly one
//! value, which is what keeps the display from ever reaching two terminal
//! states.

use tokio::sync::oneshot;

use crate::chain::{Acquisition, Chain};

/// Spawn the chain on the current runtime.
///
/// If the task dies before sending, the receiver reports the channel as
/// closed and the caller should treat the chain as exhausted.
pub fn spawn(chain: Chain) -> oneshot::Receiver<Acquisition> {
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let outcome = chain.acquire().await;
        // The receiver is gone if the user quit before loading finished.
        let _ = tx.send(outcome);
    });

    rx
}
