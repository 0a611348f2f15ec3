use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, info, warn};

use crate::compose::StackClient;
use crate::config::Config;
use crate::docker::ResourceClient;
use crate::error::Result;
use crate::view::{Presenter, Theme};

use super::render::build_frame;
use super::scheduler::{Dispatcher, RefreshScheduler};
use super::{App, AppEvent, Command};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Restore the terminal to normal mode. Safe to call multiple times.
pub fn restore_terminal() {
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Run the dashboard until quit. Sets up the terminal, runs the main loop,
/// restores the terminal on exit.
pub fn run(
    config: &Config,
    runtime: Arc<Runtime>,
    resources: Arc<dyn ResourceClient>,
    stacks: Arc<dyn StackClient>,
    should_quit: Arc<AtomicBool>,
) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, Clear(ClearType::All)) {
        restore_terminal();
        return Err(e.into());
    }

    let result = event_loop(config, &runtime, resources, stacks, &should_quit);

    // Stop the input thread whatever the loop's outcome.
    should_quit.store(true, Ordering::Relaxed);
    restore_terminal();
    result
}

fn event_loop(
    config: &Config,
    runtime: &Runtime,
    resources: Arc<dyn ResourceClient>,
    stacks: Arc<dyn StackClient>,
    should_quit: &Arc<AtomicBool>,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let theme = Theme::new(config.theme);

    if let Ok((cols, rows)) = terminal::size() {
        let _ = tx.send(AppEvent::Resize(cols, rows));
    }

    let input = spawn_input_reader(tx.clone(), Arc::clone(should_quit));
    let scheduler = RefreshScheduler::start(runtime.handle(), config.refresh_interval, tx.clone());
    let dispatcher = Dispatcher::new(resources, stacks, tx, config.grace_period, runtime.handle().clone());

    let mut app = App::new();
    let mut needs_render = true;
    let mut out = io::stdout();

    info!(interval = ?config.refresh_interval, "event loop started");

    loop {
        if should_quit.load(Ordering::Relaxed) {
            debug!("quit requested by signal");
            break;
        }

        if needs_render {
            let size = app.size();
            Presenter::paint(&mut out, &build_frame(&app), &theme, size)?;
            out.flush()?;
            needs_render = false;
        }

        let next = runtime.block_on(async { tokio::time::timeout(POLL_INTERVAL, rx.recv()).await });
        let event = match next {
            Ok(Some(event)) => event,
            Ok(None) => break,
            Err(_) => continue,
        };

        needs_render = true;
        match app.handle(event) {
            Some(Command::Quit) => break,
            Some(Command::Refresh) => {
                dispatcher.refresh();
            }
            Some(Command::Execute(action)) => {
                dispatcher.execute(action);
            }
            None => {}
        }
    }

    scheduler.stop();
    should_quit.store(true, Ordering::Relaxed);
    if input.join().is_err() {
        warn!("input thread panicked");
    }
    info!("event loop stopped");
    Ok(())
}

/// Blocking crossterm reads live on their own thread and are forwarded as events.
fn spawn_input_reader(tx: UnboundedSender<AppEvent>, should_quit: Arc<AtomicBool>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while !should_quit.load(Ordering::Relaxed) {
            match event::poll(POLL_INTERVAL) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    warn!(error = %e, "terminal poll failed");
                    break;
                }
            }
            let event = match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                Ok(Event::Resize(cols, rows)) => AppEvent::Resize(cols, rows),
                Ok(_) => continue,
                Err(e) => {
                    warn!(error = %e, "terminal read failed");
                    break;
                }
            };
            if tx.send(event).is_err() {
                break;
            }
        }
    })
}
