//! Trailing-edge debounce.
//!
//! Each `call` replaces the pending argument and restarts the quiet period;
//! the action only runs once no call has arrived for `delay`. Only the
//! latest argument is ever acted on.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Runs an action on a worker thread after calls go quiet.
///
/// Dropping the debouncer discards any pending call and joins the worker.
pub struct Debouncer<T> {
    sender: Option<Sender<T>>,
    worker: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F>(delay: Duration, action: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        let worker = thread::spawn(move || run(receiver, delay, action));

        Self {
            sender: Some(sender),
            worker: Some(worker),
        }
    }

    /// Schedule `action(arg)`, replacing whatever was pending.
    pub fn call(&self, arg: T) {
        let Some(sender) = &self.sender else {
            return;
        };
        if sender.send(arg).is_err() {
            tracing::debug!("debounce worker stopped, call dropped");
        }
    }
}

fn run<T, F>(receiver: Receiver<T>, delay: Duration, mut action: F)
where
    F: FnMut(T),
{
    while let Ok(mut pending) = receiver.recv() {
        loop {
            match receiver.recv_timeout(delay) {
                Ok(newer) => pending = newer,
                Err(RecvTimeoutError::Timeout) => {
                    tracing::debug!(delay_ms = delay.as_millis() as u64, "debounce fired");
                    action(pending);
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => return,
            }
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        // Closing the channel wakes the worker.
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::warn!("debounced action panicked");
            }
        }
    }
}
