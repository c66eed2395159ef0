//! Relay between a blocking window event source and the dispatcher.
//!
//! Every event goes through a rendezvous channel and the relay then waits for
//! an acknowledgement, so the source is never polled while the previous event
//! is still being handled.

use crate::errors::ShellError;
use crate::session::ImageResult;
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::thread::{self, JoinHandle};

pub enum WindowEvent<F> {
    /// The window wants its contents declared.
    Frame(F),
    /// The window is closing, with the reason when it was not a normal close.
    Destroy(Option<ShellError>),
}

impl<F> WindowEvent<F> {
    pub fn is_destroy(&self) -> bool {
        matches!(self, WindowEvent::Destroy(_))
    }
}

/// Blocking source of platform events.
pub trait EventSource: Send + 'static {
    type Frame: Send + 'static;

    fn next_event(&mut self) -> WindowEvent<Self::Frame>;
}

/// Everything the dispatcher waits on, funnelled through one receiver.
pub enum LoopMessage<F> {
    Window(WindowEvent<F>),
    Opened(ImageResult),
    Saved(crate::errors::Result<()>),
}

/// Rendezvous channel for loop messages.
pub fn loop_channel<F>() -> (SyncSender<LoopMessage<F>>, Receiver<LoopMessage<F>>) {
    sync_channel(0)
}

pub struct EventRelay {
    acks: SyncSender<()>,
    handle: JoinHandle<()>,
}

/// The relay thread's end of both channels. If the thread unwinds before a
/// destroy went through, dropping the link reports the window as lost.
struct RelayLink<F> {
    tx: SyncSender<LoopMessage<F>>,
    acks: Receiver<()>,
    finished: bool,
}

impl<F> RelayLink<F> {
    /// Forwards one event and waits for its ack. False once the relay must stop.
    fn forward(&mut self, event: WindowEvent<F>) -> bool {
        let destroy = event.is_destroy();
        if self.tx.send(LoopMessage::Window(event)).is_err() || self.acks.recv().is_err() {
            log::debug!("Dispatcher gone, stopping event relay");
            self.finished = true;
            return false;
        }
        self.finished |= destroy;
        !self.finished
    }
}

impl<F> Drop for RelayLink<F> {
    fn drop(&mut self) {
        if !self.finished {
            log::error!("Event relay stopped without a destroy event");
            self.forward(WindowEvent::Destroy(Some(ShellError::WindowLost)));
        }
    }
}

impl EventRelay {
    /// Starts relaying `source` into `tx`.
    pub fn spawn<S: EventSource>(
        mut source: S,
        tx: SyncSender<LoopMessage<S::Frame>>,
    ) -> std::io::Result<Self> {
        let (acks, ack_rx) = sync_channel::<()>(0);

        let handle = thread::Builder::new()
            .name("event-relay".to_string())
            .spawn(move || {
                let mut link = RelayLink {
                    tx,
                    acks: ack_rx,
                    finished: false,
                };
                while link.forward(source.next_event()) {}
                log::debug!("Event relay finished");
            })?;

        Ok(Self { acks, handle })
    }

    /// Releases the relay to fetch the next event.
    pub fn ack(&self) {
        let _ = self.acks.send(());
    }

    pub fn join(self) {
        drop(self.acks);
        if self.handle.join().is_err() {
            log::error!("Event relay thread panicked");
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc::Receiver;
    use std::sync::Arc;

    /// Event source fed by the test through a channel. A closed channel reads as a lost window.
    pub struct ChannelSource<F> {
        pub events: Receiver<WindowEvent<F>>,
        pub fetched: Arc<AtomicUsize>,
    }

    impl<F: Send + 'static> EventSource for ChannelSource<F> {
        type Frame = F;

        fn next_event(&mut self) -> WindowEvent<F> {
            self.fetched.fetch_add(1, Ordering::SeqCst);
            self.events
                .recv()
                .unwrap_or(WindowEvent::Destroy(Some(ShellError::WindowLost)))
        }
    }

    /// Source whose platform side fails on the first fetch.
    pub struct PanickingSource;

    impl EventSource for PanickingSource {
        type Frame = ();

        fn next_event(&mut self) -> WindowEvent<()> {
            panic!("platform event queue broke");
        }
    }
}
