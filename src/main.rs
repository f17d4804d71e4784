//! Redlight CLI
//!
//! Usage:
//!   redlight                         # Interactive play (lights out, press Enter)
//!   redlight --rounds 5              # Best-of-five session
//!   redlight --simulate --seed 42    # Scripted session on a manual clock
//!   redlight --simulate --json       # JSON output per transition

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use redlight::core::{
    ManualClock, ReactionController, RecordingPresenter, ScriptedCuePlayer, TerminalPresenter,
};
use redlight::types::{FalseStartPolicy, GameConfig, GameState, ReactionSession, ReasonCode};
use redlight::{DEFAULT_DELAY_MAX_MS, DEFAULT_DELAY_MIN_MS, VERSION};

/// Number of start lights in the cue sequence
const CUE_LIGHTS: u64 = 5;

/// Nominal cue length for terminal play (ms)
const CUE_DURATION_MS: u64 = 4000;

/// Poll interval while pacing the cue and delay (ms)
const POLL_MS: u64 = 25;

#[derive(Parser, Debug)]
#[command(
    name = "redlight",
    version = VERSION,
    about = "Redlight - reaction-time game in the terminal",
    long_about = "Redlight measures your reaction time.\n\n\
                  Five lights come on one by one. After they go out and a\n\
                  randomized delay passes, the GO signal appears: press Enter\n\
                  as fast as you can. Pressing early is a false start.\n\n\
                  Modes:\n  \
                  (default)   Interactive play\n  \
                  --simulate  Scripted session on a manual clock (no waiting)"
)]
struct Args {
    /// Run a scripted session instead of interactive play
    #[arg(short, long)]
    simulate: bool,

    /// Number of rounds to play
    #[arg(short, long, default_value_t = 1)]
    rounds: u32,

    /// Lower bound for the randomized go-signal delay (ms)
    #[arg(long, default_value_t = DEFAULT_DELAY_MIN_MS)]
    delay_min: u64,

    /// Upper bound for the randomized go-signal delay (ms)
    #[arg(long, default_value_t = DEFAULT_DELAY_MAX_MS)]
    delay_max: u64,

    /// Bound the tap wait (ms); omit for an unbounded window
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Early-tap handling: ignore | resolve
    #[arg(long, default_value = "ignore")]
    false_start: FalseStartPolicy,

    /// RNG seed for reproducible delays
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated tap latency for --simulate (ms)
    #[arg(long, default_value_t = 250)]
    tap_after_ms: u64,

    /// Output as JSON (simulate mode)
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Print every state transition
    #[arg(long)]
    verbose: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let args = Args::parse();
    let config = GameConfig {
        delay_min_ms: args.delay_min,
        delay_max_ms: args.delay_max,
        go_timeout_ms: args.timeout_ms,
        false_start_policy: args.false_start,
        seed: args.seed,
        ..GameConfig::default()
    };
    if let Err(e) = config.validate() {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    if args.simulate {
        run_simulate(&args, config);
    } else {
        run_play(&args, config);
    }
}

/// Interactive play: real clock, stdin taps
fn run_play(args: &Args, config: GameConfig) {
    let mut ctrl = match ReactionController::new(
        config,
        Box::new(ScriptedCuePlayer::ready(CUE_DURATION_MS)),
        Box::new(TerminalPresenter::new(args.no_color)),
    ) {
        Ok(ctrl) => ctrl,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    print_header(args.no_color);

    // One reader thread for the whole session; every Enter press is a tap.
    let taps = spawn_tap_reader();
    let mut results: Vec<Option<u64>> = Vec::new();

    for round in 1..=args.rounds {
        if args.rounds > 1 {
            println!();
            println!("--- Round {}/{} ---", round, args.rounds);
        }
        print!("Press Enter to start...");
        io::stdout().flush().ok();
        if taps.recv().is_err() {
            return;
        }
        drain(&taps);

        let out = ctrl.start();
        if args.verbose {
            print_output(&out, args.no_color);
        }
        if ctrl.state() != GameState::Armed {
            if let Some(err) = ctrl.last_error() {
                eprintln!("{}", err);
            }
            continue;
        }

        // Lights come on one by one across the cue
        println!();
        let light_ms = CUE_DURATION_MS / CUE_LIGHTS;
        let mut aborted = false;
        for lit in 1..=CUE_LIGHTS {
            print_lights(lit, args.no_color);
            if !pace(&mut ctrl, &taps, light_ms, args) {
                aborted = true;
                break;
            }
        }

        if !aborted {
            let out = ctrl.on_cue_released();
            if args.verbose {
                print_output(&out, args.no_color);
            }
            // Randomized delay; early taps still follow the policy
            while ctrl.state() == GameState::WaitingForGo {
                if !pace(&mut ctrl, &taps, POLL_MS, args) {
                    aborted = true;
                    break;
                }
            }
        }

        if !aborted && ctrl.state() == GameState::GoSignaled {
            print_go(args.no_color);
            wait_for_tap(&mut ctrl, &taps, args);
        }

        // TerminalPresenter already printed the result or the error
        match ctrl.state() {
            GameState::Resolved => results.push(ctrl.elapsed_ms()),
            _ => results.push(None),
        }
        thread::sleep(Duration::from_millis(ctrl.config().result_hold_ms));
        ctrl.retry();
        drain(&taps);
    }

    if args.rounds > 1 {
        print_summary(&results, args.no_color);
    }
    ctrl.teardown();
}

/// Sleep `total_ms` in small slices, feeding queued taps and the timer
/// pump. Returns false once the session has left the running states.
fn pace(ctrl: &mut ReactionController, taps: &Receiver<()>, total_ms: u64, args: &Args) -> bool {
    let mut remaining = total_ms;
    loop {
        while taps.try_recv().is_ok() {
            let out = ctrl.on_tap();
            if args.verbose {
                print_output(&out, args.no_color);
            }
        }
        let out = ctrl.tick();
        if args.verbose
            && matches!(
                out.reason,
                ReasonCode::R001_GO_SIGNALED | ReasonCode::R001_GO_TIMED_OUT
            )
        {
            print_output(&out, args.no_color);
        }
        match ctrl.state() {
            GameState::Armed | GameState::WaitingForGo => {}
            _ => return false,
        }
        if remaining == 0 {
            return true;
        }
        let slice = remaining.min(POLL_MS);
        thread::sleep(Duration::from_millis(slice));
        remaining -= slice;
    }
}

/// Block until the tap lands or the configured window expires
fn wait_for_tap(ctrl: &mut ReactionController, taps: &Receiver<()>, args: &Args) {
    loop {
        let wait = match ctrl.config().go_timeout_ms {
            Some(_) => taps.recv_timeout(Duration::from_millis(POLL_MS)),
            None => taps.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        match wait {
            Ok(()) => {
                let out = ctrl.on_tap();
                if args.verbose {
                    print_output(&out, args.no_color);
                }
                if ctrl.state() != GameState::GoSignaled {
                    return;
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                ctrl.tick();
                if ctrl.state() != GameState::GoSignaled {
                    println!("Too slow - window closed.");
                    return;
                }
            }
            Err(RecvTimeoutError::Disconnected) => return,
        }
    }
}

/// Scripted session on a manual clock: no sleeping, fully reproducible
/// with --seed
fn run_simulate(args: &Args, config: GameConfig) {
    let clock = ManualClock::new();
    let presenter = RecordingPresenter::new();
    let presenter_log = presenter.log_handle();
    let mut ctrl = match ReactionController::with_clock(
        config,
        Box::new(ScriptedCuePlayer::ready(CUE_DURATION_MS)),
        Box::new(presenter),
        Box::new(clock.clone()),
    ) {
        Ok(ctrl) => ctrl,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    if !args.json {
        print_header(args.no_color);
        println!("Scripted session (cue {}ms, tap after {}ms)", CUE_DURATION_MS, args.tap_after_ms);
        println!();
    }

    let mut outputs = Vec::new();
    outputs.push(ctrl.start());
    clock.advance(CUE_DURATION_MS);
    outputs.push(ctrl.on_cue_released());
    if let Some(delay) = ctrl.remaining_delay_ms() {
        clock.advance(delay);
    }
    outputs.push(ctrl.tick());
    clock.advance(args.tap_after_ms);
    outputs.push(ctrl.on_tap());

    for out in &outputs {
        if args.json {
            println!("{}", serde_json::to_string(out).expect("output serializes"));
        } else if args.no_color {
            println!("{}", out.to_parseable_string());
        } else {
            println!("{}", out.to_terminal_string());
        }
    }

    if !args.json {
        println!();
        let shown = presenter_log
            .lock()
            .expect("presenter log poisoned")
            .last()
            .cloned();
        println!(
            "Reaction time: {} (presented: {:?})",
            ReactionSession::format_elapsed(ctrl.elapsed_ms()),
            shown
        );
    }
    ctrl.teardown();
}

fn spawn_tap_reader() -> Receiver<()> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            if line.is_err() || tx.send(()).is_err() {
                break;
            }
        }
    });
    rx
}

fn drain(taps: &Receiver<()>) {
    while taps.try_recv().is_ok() {}
}

fn print_header(no_color: bool) {
    if no_color {
        println!("========================================");
        println!("  REDLIGHT v{} - Reaction Time Test", VERSION);
        println!("========================================");
    } else {
        println!("{}", "========================================".bold());
        println!(
            "  {}{} v{} - Reaction Time Test",
            "RED".red().bold(),
            "LIGHT".bold(),
            VERSION
        );
        println!("{}", "========================================".bold());
    }
    println!();
}

fn print_lights(lit: u64, no_color: bool) {
    let mut row = String::new();
    for i in 0..CUE_LIGHTS {
        if i < lit {
            row.push_str(if no_color { "[#] " } else { "\x1b[31m\u{25cf}\x1b[0m " });
        } else {
            row.push_str(if no_color { "[ ] " } else { "\x1b[90m\u{25cb}\x1b[0m " });
        }
    }
    println!("  {}", row.trim_end());
}

fn print_go(no_color: bool) {
    if no_color {
        println!();
        println!("  >>> LIGHTS OUT - PRESS ENTER <<<");
    } else {
        println!();
        println!("{}", "  >>> LIGHTS OUT - PRESS ENTER <<<".green().bold());
    }
}

fn print_output(out: &redlight::types::StateOutput, no_color: bool) {
    if no_color {
        println!("{}", out.to_parseable_string());
    } else {
        println!("{}", out.to_terminal_string());
    }
}

fn print_summary(results: &[Option<u64>], no_color: bool) {
    let scored: Vec<u64> = results.iter().filter_map(|r| *r).collect();
    println!();
    if no_color {
        println!("=== Session summary ===");
    } else {
        println!("{}", "=== Session summary ===".bold());
    }
    println!("  Rounds: {} ({} scored)", results.len(), scored.len());
    if let Some(best) = scored.iter().min() {
        println!("  Best:   {}", ReactionSession::format_elapsed(Some(*best)));
        let mean = scored.iter().sum::<u64>() / scored.len() as u64;
        println!("  Mean:   {}", ReactionSession::format_elapsed(Some(mean)));
    }
}
