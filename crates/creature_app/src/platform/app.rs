use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use creature_core::{update, CollectionStore, Msg, Topic};
use creature_engine::{EngineHandle, FetchError};
use creature_logging::{creature_debug, creature_info, creature_warn};

use super::config::{self, AppConfig};
use super::effects::EffectRunner;
use super::input::{parse_command, Command};
use super::logging::{self, LogDestination};
use super::ui::layout::Viewport;
use super::ui::render;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("could not start the fetch engine: {0}")]
    Engine(#[from] FetchError),
}

enum Input {
    Line(String),
    Closed,
}

pub fn run_app(config_path: &Path) -> Result<(), AppError> {
    let (config, config_error) = match config::load(config_path) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };

    logging::initialize(if config.log_to_file {
        LogDestination::Both
    } else {
        LogDestination::Terminal
    });
    if let Some(err) = config_error {
        creature_warn!("{}; using defaults", err);
    }
    creature_info!("Starting with {:?}", config);

    let engine = EngineHandle::new(config.fetch_settings())?;
    let mut app = App::new(&config, EffectRunner::new(engine));
    let input_rx = spawn_input_reader();

    app.dispatch(Msg::LoadNextPage);
    app.refresh(true);

    loop {
        while let Some(msg) = app.runner.poll() {
            app.dispatch(msg);
        }
        app.refresh(false);

        match input_rx.recv_timeout(POLL_INTERVAL) {
            Ok(Input::Line(line)) => match parse_command(&line) {
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => app.handle_command(command),
                Ok(None) => {}
                Err(err) => println!("{err}"),
            },
            Ok(Input::Closed) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
            Err(mpsc::RecvTimeoutError::Timeout) => {}
        }
    }

    creature_info!(
        "Session ended with {} creatures, {} favourites",
        app.store.state().creatures().len(),
        app.store.state().favourites().len()
    );
    Ok(())
}

struct App {
    store: CollectionStore,
    runner: EffectRunner,
    viewport: Viewport,
}

impl App {
    fn new(config: &AppConfig, runner: EffectRunner) -> Self {
        let mut store = CollectionStore::new(config.store_config());
        store.subscribe(Topic::Favourites, |state| {
            creature_debug!("Favourites now {:?}", state.favourites());
        });
        store.subscribe(Topic::Creatures, |state| {
            creature_debug!(
                "Loaded sequence now {} creatures (cursor={})",
                state.creatures().len(),
                state.cursor()
            );
        });
        Self {
            store,
            runner,
            viewport: Viewport::new(config.visible_rows),
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let store = std::mem::take(&mut self.store);
        let (store, effects) = update(store, msg);
        self.store = store;
        self.runner.enqueue(effects);
    }

    fn handle_command(&mut self, command: Command) {
        let row_count = self.store.view().rows.len();
        match command {
            Command::More => self.viewport.scroll_down(row_count),
            Command::Up => self.viewport.scroll_up(),
            Command::Favourite(id) => self.dispatch(Msg::ToggleFavourite(id)),
            Command::Remove(id) => self.dispatch(Msg::RemoveCreature(id)),
            Command::Show(id) => {
                if self.store.state().creature(id).is_none() {
                    println!("No loaded creature with id {id}");
                    return;
                }
                self.dispatch(Msg::CreatureSelected(id));
            }
            Command::Star => match self.store.view().detail {
                Some(mut detail) => {
                    let msg = detail.favourite_tapped();
                    self.dispatch(msg);
                }
                None => println!("Open a creature with 'show <id>' first"),
            },
            Command::Back => self.dispatch(Msg::DetailClosed),
            Command::Help => {
                print_lines(&render::help());
                return;
            }
            Command::Quit => {}
        }
        self.refresh(true);
    }

    /// Redraws when the store changed (or when forced), then reports newly
    /// visible rows to the store so it can page ahead.
    fn refresh(&mut self, force: bool) {
        let changed = self.store.consume_dirty();
        let view = self.store.view();
        if changed || force {
            print_lines(&render::render(&view, self.viewport.visible(view.rows.len())));
        }
        if view.detail.is_some() {
            return;
        }
        for index in self.viewport.take_newly_visible(view.rows.len()) {
            self.dispatch(Msg::RowWillDisplay { index });
        }
    }
}

fn print_lines(lines: &[String]) {
    let mut stdout = io::stdout().lock();
    for line in lines {
        let _ = writeln!(stdout, "{line}");
    }
    let _ = write!(stdout, "> ");
    let _ = stdout.flush();
}

fn spawn_input_reader() -> mpsc::Receiver<Input> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(Input::Line(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(Input::Closed);
    });
    rx
}
