//! Terminal user interface.
//!
//! This module provides:
//! - The `App` router and one model per resource view
//! - The `Command`/`Message` plumbing between views and the engine
//! - Shared widgets and styles
//! - The event loop tying the terminal, the engine and the views together

pub mod app;
pub mod command;
pub mod container;
pub mod container_create;
pub mod image;
pub mod network;
pub mod styles;
pub mod system;
pub mod volume;
pub mod widgets;

pub use app::{App, View};
pub use command::{Command, Dispatcher, Message};

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{EventStream, KeyEvent};
use futures_util::StreamExt;
use ratatui::layout::Rect;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::TerminalGuard;
use crate::config::Settings;
use crate::docker::DockerOperations;
use crate::Result;

/// Rows taken by the router header and footer plus a pane's borders
pub const PANE_CHROME: u16 = 4;

/// What a view asks the router to do after a key press
#[derive(Debug)]
pub enum ViewAction {
    None,
    /// Leave the view and return to the summary screen
    Back,
    Run(Vec<Command>),
}

/// A resource view driven by the router
pub trait Screen {
    /// Engine results owned by this view
    type Msg;

    /// Called each time the view is opened
    fn init(&mut self) -> Vec<Command>;

    fn handle_key(&mut self, key: KeyEvent) -> ViewAction;

    fn update(&mut self, msg: Self::Msg) -> Vec<Command>;

    fn tick(&mut self);

    fn resize(&mut self, width: u16, height: u16);

    /// True while text entry or a confirmation owns the keyboard
    fn captures_input(&self) -> bool;

    fn help(&self) -> &'static str;

    /// One-shot status shown in the footer until the next key
    fn notice(&self) -> Option<&str>;

    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// Run the UI until the user quits.
///
/// Returns the final containers "show all" toggle so it can be persisted.
pub async fn run(docker: Arc<dyn DockerOperations>, settings: &Settings) -> Result<bool> {
    let mut guard = TerminalGuard::new()?;
    let (tx, mut rx) = mpsc::unbounded_channel();
    let dispatcher = Dispatcher::new(docker, tx);

    let mut app = App::new(settings);
    let size = guard.terminal().size()?;
    app.resize(size.width, size.height);
    dispatcher.dispatch(app.init());

    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(Duration::from_millis(settings.tick_rate_ms));
    info!("UI started");

    loop {
        guard.terminal().draw(|frame| app.render(frame))?;

        let commands = tokio::select! {
            _ = ticker.tick() => {
                app.tick();
                Vec::new()
            }
            Some(message) = rx.recv() => app.update(message),
            event = events.next() => match event {
                Some(Ok(event)) => app.handle_event(event),
                Some(Err(e)) => return Err(e.into()),
                None => {
                    debug!("Terminal event stream closed");
                    break;
                }
            },
        };

        dispatcher.dispatch(commands);
        if app.should_quit() {
            break;
        }
    }

    info!("UI stopped");
    Ok(app.show_all_containers())
}
