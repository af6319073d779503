//! Linguimage CLI - terminal quiz driver
//!
//! Usage:
//!   linguimage                                # Interactive game, bundled data
//!   linguimage --data my/verbs.json           # Custom dataset
//!   linguimage --seed 42                      # Deterministic shuffles
//!   linguimage --json                         # JSON round snapshots
//!
//! In-round commands: 1-4 guess, r replay, s slow replay, m music, a autoplay,
//! v N volume, q quit.

use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use clap::Parser;
use colored::Colorize;

use linguimage::core::GameEngine;
use linguimage::types::{AchievementTable, Cue, Effect, Event, ReplaySpeed, VerbDataset};
use linguimage::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "linguimage",
    version = VERSION,
    about = "Vocabulary quiz - hear a verb, pick the matching label",
    long_about = "Linguimage shows a source-language verb and four candidate labels.\n\
                  Pick the right one: +1 point. Pick wrong: -3 points (floor 0) and\n\
                  the verb comes back four rounds later. Score milestones pop\n\
                  achievement banners.\n\n\
                  Commands during a round:\n  \
                  1-4    guess that option\n  \
                  r / s  replay pronunciation (normal / slow)\n  \
                  m      toggle background music\n  \
                  a      toggle pronunciation autoplay\n  \
                  v N    set music volume (0-100)\n  \
                  q      quit"
)]
struct Args {
    /// Verb dataset (JSON array of {source, target, audio, image, exceptions})
    #[arg(long, default_value = "data/verbs.json")]
    data: String,

    /// Achievement table (JSON array of {score, message})
    #[arg(long, default_value = "data/achievements.json")]
    achievements: String,

    /// Seed for deterministic shuffles
    #[arg(long)]
    seed: Option<u64>,

    /// Output round snapshots as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Start with background music off
    #[arg(long)]
    no_music: bool,

    /// Start with pronunciation autoplay off
    #[arg(long)]
    no_autoplay: bool,

    /// Print audio/music effect lines
    #[arg(long)]
    verbose: bool,
}

/// A scheduled engine event: `Effect::Delay` interpreted by the driver
struct Timer {
    due: Instant,
    event: Event,
}

fn main() {
    let args = Args::parse();

    let dataset = match VerbDataset::load(&args.data) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("dataset error: {}", e);
            std::process::exit(1);
        }
    };
    let table = match AchievementTable::load(&args.achievements) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("achievements error: {}", e);
            std::process::exit(1);
        }
    };

    let mut engine = match args.seed {
        Some(seed) => GameEngine::with_seed(&dataset, table, seed),
        None => GameEngine::new(&dataset, table),
    };
    if args.no_music {
        engine.handle(Event::ToggleMusic);
    }
    if args.no_autoplay {
        engine.handle(Event::ToggleAutoplay);
    }

    print_header(dataset.len(), &args);
    run_game(&mut engine, &args);
}

fn print_header(verb_count: usize, args: &Args) {
    if args.no_color {
        println!("========================================");
        println!("  Linguimage v{} - {} verbs loaded", VERSION, verb_count);
        println!("========================================");
    } else {
        println!("{}", "========================================".bold());
        println!(
            "  {} v{} - {} verbs loaded",
            "Linguimage".bold().cyan(),
            VERSION,
            verb_count
        );
        println!("{}", "========================================".bold());
    }
    println!();
}

/// Interactive driver loop. Interprets effects, owns the delay timers, and
/// feeds user commands back into the engine.
fn run_game(engine: &mut GameEngine, args: &Args) {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut timers: Vec<Timer> = Vec::new();

    // Both hardcoded start strings, as shipped
    if args.no_color {
        println!("Press Enter to start - Start Game / Empezar Juego");
    } else {
        println!(
            "Press Enter to start - {} / {}",
            "Start Game".green().bold(),
            "Empezar Juego".green().bold()
        );
    }
    let mut line = String::new();
    if stdin.lock().read_line(&mut line).is_err() {
        return;
    }

    dispatch(engine, Event::Start, &mut timers, args);

    loop {
        pump_due_timers(engine, &mut timers, args);
        render(engine, args);

        print!("> ");
        let _ = stdout.flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        match parse_command(line, engine) {
            Some(event) => dispatch(engine, event, &mut timers, args),
            None => {
                println!("commands: 1-4 guess | r replay | s slow | m music | a autoplay | v N volume | q quit");
                continue;
            }
        }

        // A correct guess locks input until the advance timer fires; sleep
        // through it instead of prompting into a dead round.
        wait_while_locked(engine, &mut timers, args);
    }

    println!(
        "\nSession ended. Score: {} | Milestones: {}",
        engine.score(),
        engine.milestones_achieved()
    );
}

/// Map an input line to an engine event
fn parse_command(line: &str, engine: &GameEngine) -> Option<Event> {
    if let Ok(n) = line.parse::<usize>() {
        let option = engine.options().get(n.checked_sub(1)?)?;
        return Some(Event::Guess(option.label.clone()));
    }
    let mut parts = line.split_whitespace();
    match parts.next()?.to_ascii_lowercase().as_str() {
        "r" => Some(Event::Replay(ReplaySpeed::Normal)),
        "s" => Some(Event::Replay(ReplaySpeed::Slow)),
        "m" => Some(Event::ToggleMusic),
        "a" => Some(Event::ToggleAutoplay),
        "v" => {
            let percent: u8 = parts.next()?.parse().ok()?;
            Some(Event::SetVolume(percent))
        }
        _ => None,
    }
}

/// Feed one event through the engine and run the resulting effects
fn dispatch(engine: &mut GameEngine, event: Event, timers: &mut Vec<Timer>, args: &Args) {
    for effect in engine.handle(event) {
        match effect {
            Effect::Delay { ms, then } => timers.push(Timer {
                due: Instant::now() + Duration::from_millis(ms),
                event: then,
            }),
            other => run_effect(&other, args),
        }
    }
}

/// Fire every timer whose deadline has passed
fn pump_due_timers(engine: &mut GameEngine, timers: &mut Vec<Timer>, args: &Args) {
    loop {
        let now = Instant::now();
        let Some(pos) = timers.iter().position(|t| t.due <= now) else {
            break;
        };
        let timer = timers.remove(pos);
        dispatch(engine, timer.event, timers, args);
    }
}

/// While input is locked a pending advance timer is the only way forward:
/// sleep until the earliest deadline and fire it.
fn wait_while_locked(engine: &mut GameEngine, timers: &mut Vec<Timer>, args: &Args) {
    while engine.input_locked() {
        let Some(pos) = timers
            .iter()
            .enumerate()
            .min_by_key(|(_, t)| t.due)
            .map(|(i, _)| i)
        else {
            break;
        };
        let timer = timers.remove(pos);
        let now = Instant::now();
        if timer.due > now {
            std::thread::sleep(timer.due - now);
        }
        dispatch(engine, timer.event, timers, args);
    }
}

/// Run a fire-and-forget effect. This driver has no real audio backend; it
/// narrates playback requests and never feeds failures back into the engine.
fn run_effect(effect: &Effect, args: &Args) {
    match effect {
        Effect::PlayVerb { audio, rate } => {
            if args.verbose {
                println!("♪ {} (rate {:.1})", audio, rate);
            }
        }
        Effect::PlayCue(Cue::Correct) => {
            print!("\x07"); // Terminal bell
            if args.no_color {
                println!("✓ Correct!");
            } else {
                println!("{}", "✓ Correct!".green().bold());
            }
        }
        Effect::PlayCue(Cue::Incorrect) => {
            if args.no_color {
                println!("✗ Wrong - try again");
            } else {
                println!("{}", "✗ Wrong - try again".red());
            }
        }
        Effect::MusicOn { volume } => {
            if args.verbose {
                println!("♫ music on (volume {:.2})", volume);
            }
        }
        Effect::MusicOff => {
            if args.verbose {
                println!("♫ music off");
            }
        }
        Effect::MusicVolume(volume) => {
            if args.verbose {
                println!("♫ volume {:.2}", volume);
            }
        }
        Effect::ShowBanner(message) => {
            if args.no_color {
                println!("*** {} ***", message);
            } else {
                println!("{}", format!("★ {} ★", message).yellow().bold());
            }
        }
        Effect::ClearBanner => {}
        Effect::Delay { .. } => unreachable!("delays are scheduled, not run"),
    }
}

fn render(engine: &GameEngine, args: &Args) {
    let view = engine.view();
    if args.json {
        match serde_json::to_string(&view) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("view serialization failed: {}", e),
        }
    } else if args.no_color {
        println!("{}", view.to_parseable_string());
    } else {
        println!();
        print!("{}", view.to_terminal_string());
    }
}
