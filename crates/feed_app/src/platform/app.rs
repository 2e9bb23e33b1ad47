use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use chrono::Utc;
use feed_core::{update, FeedConfig, FeedState, Msg};
use feed_engine::FetchSettings;
use feed_logging::{feed_debug, feed_info, LevelFilter, LogDestination};

use super::effects::EffectRunner;
use super::input::{self, Command};
use super::ui::render::Renderer;
use super::ui::viewport::SimulatedViewport;

pub const BASE_URL_VAR: &str = "FEED_BASE_URL";

const TICK_INTERVAL: Duration = Duration::from_millis(50);

pub enum AppEvent {
    Command(Command),
    Core(Msg),
}

pub fn run_app() -> anyhow::Result<()> {
    feed_logging::initialize(LogDestination::File, LevelFilter::Debug);

    let mut settings = FetchSettings::default();
    if let Ok(base_url) = std::env::var(BASE_URL_VAR) {
        settings.base_url = base_url;
    }

    let (tx, rx) = mpsc::channel::<AppEvent>();
    let effects = EffectRunner::new(settings, tx.clone())?;

    // Background tick drives the search debounce.
    let tick_tx = tx.clone();
    thread::spawn(move || {
        while tick_tx
            .send(AppEvent::Core(Msg::Tick { now: Instant::now() }))
            .is_ok()
        {
            thread::sleep(TICK_INTERVAL);
        }
    });
    input::spawn_reader(tx);

    println!("{}", input::HELP);
    let mut app = App::new(effects);
    app.dispatch(Msg::Started);

    while let Ok(event) = rx.recv() {
        match event {
            AppEvent::Core(msg) => app.dispatch(msg),
            AppEvent::Command(Command::Quit) => break,
            AppEvent::Command(command) => app.handle_command(command),
        }
    }

    feed_info!("Shutting down");
    app.dispatch(Msg::TornDown);
    app.effects.shutdown();
    Ok(())
}

struct App {
    state: FeedState,
    effects: EffectRunner,
    viewport: SimulatedViewport,
    renderer: Renderer,
}

impl App {
    fn new(effects: EffectRunner) -> Self {
        Self {
            state: FeedState::new(FeedConfig::default()),
            effects,
            viewport: SimulatedViewport::default(),
            renderer: Renderer::default(),
        }
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Type(value) => self.dispatch(Msg::SearchInputChanged {
                value,
                at: Instant::now(),
            }),
            Command::Submit => self.dispatch(Msg::SearchSubmitted),
            Command::Clear => self.dispatch(Msg::SearchCleared),
            Command::More => self.dispatch(Msg::LoadMoreRequested),
            Command::Retry => self.dispatch(Msg::RetryClicked),
            Command::Scroll(delta) => {
                let count = self.state.items().count();
                self.viewport.scroll_by(delta, count);
                feed_debug!("Scrolled to {}px of {} rows", self.viewport.scroll_top(), count);
                self.dispatch(Msg::SentinelObserved(self.viewport.observe(count)));
            }
            Command::Help => println!("{}", input::HELP),
            Command::Unknown(raw) => println!("unknown command {raw:?}; try /help"),
            Command::Quit => {}
        }
    }

    /// Runs `msg` and any follow-up sentinel observations to a fixed point.
    fn dispatch(&mut self, msg: Msg) {
        let mut queue = VecDeque::from([msg]);
        while let Some(msg) = queue.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (mut state, effects) = update(state, msg);
            self.effects.apply(effects, &mut self.viewport);

            if state.consume_dirty() {
                let view = state.view();
                print_lines(&self.renderer.render(&view, Utc::now()));
                queue.push_back(Msg::SentinelObserved(
                    self.viewport.observe(view.items.len()),
                ));
            }
            self.state = state;
        }
    }
}

fn print_lines(lines: &[String]) {
    let mut out = io::stdout().lock();
    for line in lines {
        let _ = writeln!(out, "{line}");
    }
    let _ = out.flush();
}
