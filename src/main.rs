mod codec;
mod config;
mod dispatcher;
mod errors;
mod explorer;
mod handlers;
mod logging;
mod session;
mod shell;
mod window;

use anyhow::{anyhow, Context};
use config::ViewerConfig;
use eframe::egui;
use explorer::NativeExplorer;
use std::sync::{mpsc, Arc};
use std::thread;
use window::EguiRenderer;

fn main() -> anyhow::Result<()> {
    let config = ViewerConfig::default();
    logging::init_tracing(config.log_filter);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.title.as_str())
            .with_inner_size(config.inner_size)
            .with_min_inner_size(config.min_inner_size),
        ..Default::default()
    };

    let (app, events) = window::bridge();
    let (outcome_tx, outcome_rx) = mpsc::channel();

    eframe::run_native(
        &config.title,
        native_options,
        Box::new(move |cc| {
            let renderer = EguiRenderer::new(cc.egui_ctx.clone());
            let explorer = Arc::new(NativeExplorer);
            thread::Builder::new()
                .name("dispatcher".to_string())
                .spawn(move || {
                    let _ = outcome_tx.send(dispatcher::run(events, renderer, explorer));
                })?;
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow!("{e}"))
    .context("failed to run the window")?;

    // The dispatcher only reports once the destroy event has been acknowledged.
    report_outcome(outcome_rx.recv())
}

/// Turns the dispatcher's report into the process result. A dispatcher that
/// vanished without reporting is a failure, not a clean exit.
fn report_outcome(outcome: Result<errors::Result<()>, mpsc::RecvError>) -> anyhow::Result<()> {
    match outcome {
        Ok(Err(err)) => {
            log::error!("[{}] {}", err.error_code(), err);
            Err(err).context("window destroyed with an error")
        }
        Ok(Ok(())) => Ok(()),
        Err(_) => {
            log::error!("Dispatcher stopped without reporting an outcome");
            Err(anyhow!("dispatcher stopped without reporting"))
        }
    }
}
