use crate::errors::{Result, ShellError};
use crate::explorer::Explorer;
use crate::handlers;
use crate::session::{ImageResult, Session};
use crate::shell::{loop_channel, EventRelay, EventSource, LoopMessage, WindowEvent};
use std::sync::mpsc::SyncSender;
use std::sync::Arc;
use std::thread;

/// Buttons pressed while a frame was declared.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UiActions {
    pub open_clicked: bool,
    pub save_clicked: bool,
}

/// Declares the widget tree for a frame and can ask the window for another one.
pub trait Renderer<F> {
    fn render(&mut self, frame: F, session: &Session) -> UiActions;

    fn invalidate(&self);
}

/// Runs the main loop until the window is destroyed and returns the destroy error, if any.
pub fn run<S, R, E>(source: S, mut renderer: R, explorer: Arc<E>) -> Result<()>
where
    S: EventSource,
    R: Renderer<S::Frame>,
    E: Explorer,
{
    let (tx, rx) = loop_channel::<S::Frame>();
    let relay = EventRelay::spawn(source, tx.clone()).map_err(|e| {
        log::error!("Failed to start event relay: {}", e);
        ShellError::WindowLost
    })?;
    let mut session = Session::new();

    log::debug!("Dispatcher running");
    let outcome = loop {
        let Ok(message) = rx.recv() else {
            break Err(ShellError::WindowLost);
        };

        match message {
            LoopMessage::Opened(result) => {
                if let ImageResult::Failed(err) = &result {
                    err.log();
                }
                session.apply_open(result);
                renderer.invalidate();
            }
            LoopMessage::Saved(result) => {
                if let Err(err) = &result {
                    err.log();
                }
                session.apply_save(result);
                renderer.invalidate();
            }
            LoopMessage::Window(WindowEvent::Destroy(err)) => {
                relay.ack();
                break err.map_or(Ok(()), Err);
            }
            LoopMessage::Window(WindowEvent::Frame(frame)) => {
                let actions = renderer.render(frame, &session);
                if actions.open_clicked {
                    spawn_open(Arc::clone(&explorer), tx.clone());
                }
                if actions.save_clicked {
                    spawn_save(&session, Arc::clone(&explorer), tx.clone());
                }
                relay.ack();
            }
        }
    };

    relay.join();
    log::debug!("Dispatcher stopped");
    outcome
}

fn spawn_open<F: Send + 'static, E: Explorer>(
    explorer: Arc<E>,
    tx: SyncSender<LoopMessage<F>>,
) {
    thread::spawn(move || {
        let result = handlers::open_image(explorer.as_ref());
        // The loop may already be gone; the result is then irrelevant.
        let _ = tx.send(LoopMessage::Opened(result));
    });
}

fn spawn_save<F: Send + 'static, E: Explorer>(
    session: &Session,
    explorer: Arc<E>,
    tx: SyncSender<LoopMessage<F>>,
) {
    let snapshot = session.loaded().cloned();
    thread::spawn(move || {
        let result = handlers::save_image(snapshot.as_ref(), explorer.as_ref());
        let _ = tx.send(LoopMessage::Saved(result));
    });
}
