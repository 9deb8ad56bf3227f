//! Terminal front end: reads commands from stdin and drives the engine clock from a ticker thread.

use std::io::{self, BufRead};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossbeam_channel::{Sender, unbounded};
use minefield_core::{Engine, Preset, RandomSampler, RevealOutcome, TimerToken};

use crate::command::{Command, HELP};
use crate::interval::Interval;

mod command;
mod interval;
mod render;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Difficulty to start with
    #[arg(short, long)]
    preset: Option<Preset>,

    /// Open on the 404 board
    #[arg(long, conflicts_with = "preset")]
    splash: bool,

    /// Print snapshots as JSON instead of drawing the board
    #[arg(long)]
    json: bool,
}

enum Msg {
    Input(String),
    Tick(TimerToken),
    Quit,
}

/// Background interval delivering ticks for one timer run.
struct Ticker {
    token: TimerToken,
    _interval: Interval,
}

struct App {
    engine: Engine,
    ticker: Option<Ticker>,
    tx: Sender<Msg>,
    json: bool,
}

impl App {
    fn new(mut engine: Engine, tx: Sender<Msg>, json: bool) -> Self {
        engine.subscribe(|event| log::trace!("Engine event: {:?}", event));
        Self {
            engine,
            ticker: None,
            tx,
            json,
        }
    }

    /// Returns `false` once the app should exit.
    fn update(&mut self, msg: Msg) -> anyhow::Result<bool> {
        match msg {
            Msg::Input(line) => {
                if line.trim().is_empty() {
                    return Ok(true);
                }
                let result = line.parse::<Command>().and_then(|command| self.execute(command));
                self.sync_timer();
                match result {
                    Ok(keep_going) => Ok(keep_going),
                    Err(err) => {
                        println!("error: {err:#}");
                        Ok(true)
                    }
                }
            }
            Msg::Tick(token) => {
                if self.engine.tick(token) {
                    log::trace!("Tick: {}s", self.engine.elapsed_secs());
                } else {
                    log::trace!("Stale tick ignored");
                }
                Ok(true)
            }
            Msg::Quit => Ok(false),
        }
    }

    fn execute(&mut self, command: Command) -> anyhow::Result<bool> {
        match command {
            Command::Reveal(coords) => {
                let outcome = self
                    .engine
                    .handle_cell_click(coords)
                    .with_context(|| format!("Cannot reveal {coords:?}"))?;
                if outcome.has_update() {
                    self.draw()?;
                }
                match outcome {
                    RevealOutcome::HitMine => println!("Boom. `new` to play again."),
                    RevealOutcome::Won => {
                        println!("Cleared in {}s!", self.engine.elapsed_secs())
                    }
                    RevealOutcome::NoChange => println!("Nothing to reveal there."),
                    RevealOutcome::Revealed => {}
                }
            }
            Command::Flag(coords) => {
                let outcome = self
                    .engine
                    .flag_cell(coords)
                    .with_context(|| format!("Cannot flag {coords:?}"))?;
                if outcome.has_update() {
                    self.draw()?;
                }
            }
            Command::New => {
                self.engine.start_new_game().context("Could not start a new game")?;
                self.draw()?;
            }
            Command::Preset(preset) => {
                self.engine
                    .change_setting(preset)
                    .with_context(|| format!("Could not switch to {preset}"))?;
                self.draw()?;
            }
            Command::Custom {
                rows,
                columns,
                mines,
            } => {
                self.engine
                    .edit_custom_settings(rows, columns, mines)
                    .context("Custom preset rejected")?;
                println!("Custom preset stored, `preset custom` to play it.");
            }
            Command::Show => self.draw()?,
            Command::List => print!("{}", render::render_settings(self.engine.settings())),
            Command::Help => println!("{HELP}"),
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// Matches the ticker thread to the engine's live timer token.
    ///
    /// A new token replaces the old ticker, dropping it cancels its thread.
    fn sync_timer(&mut self) {
        let live = self.engine.timer_token();
        if self.ticker.as_ref().map(|ticker| ticker.token) == live {
            return;
        }

        self.ticker = live.map(|token| {
            log::debug!("Ticker started for {:?}", token);
            let tx = self.tx.clone();
            Ticker {
                token,
                _interval: Interval::new(Duration::from_secs(1), move || {
                    tx.send(Msg::Tick(token)).is_ok()
                }),
            }
        });
        if self.ticker.is_none() {
            log::debug!("Ticker stopped");
        }
    }

    fn draw(&self) -> anyhow::Result<()> {
        let snapshot = self.engine.snapshot();
        if self.json {
            println!("{}", serde_json::to_string(&snapshot)?);
        } else {
            print!("{}", render::render(&snapshot));
        }
        Ok(())
    }
}

fn build_engine(args: &Args, seed: u64) -> anyhow::Result<Engine> {
    let sampler = RandomSampler::new(seed);
    if args.splash {
        return Engine::splash(sampler).context("Could not build the splash board");
    }

    let mut engine = Engine::with_sampler(sampler).context("Could not build the first board")?;
    if let Some(preset) = args.preset {
        engine
            .change_setting(preset)
            .with_context(|| format!("Could not start a {preset} game"))?;
    }
    Ok(engine)
}

fn init_logging(verbose: &clap_verbosity_flag::Verbosity) {
    use tracing_subscriber::filter::LevelFilter;

    let max_level = match verbose.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(io::stderr)
        .init();
}

fn spawn_input(tx: Sender<Msg>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(Msg::Input(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    log::error!("Could not read stdin: {err}");
                    break;
                }
            }
        }
        let _ = tx.send(Msg::Quit);
    });
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {seed}");

    let (tx, rx) = unbounded();
    spawn_input(tx.clone());

    let mut app = App::new(build_engine(&args, seed)?, tx, args.json);
    app.draw()?;
    log::info!("Application started");

    for msg in rx {
        if !app.update(msg)? {
            break;
        }
    }
    Ok(())
}
