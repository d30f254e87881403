//! viz-runner: terminal and IPC front end for the scheduler metrics dashboard.
//!
//! Usage:
//!   viz-runner                          interactive terminal chart
//!   viz-runner --ipc-mode               JSON lines on stdin/stdout
//!   viz-runner --headless --seed 7      run to the horizon and print a summary
//!
//! Options: --config <path>, --seed <u64>, --interval-ms <u64>, --no-color

mod json_sink;
mod terminal_sink;

use anyhow::Result;
use json_sink::JsonLinesSink;
use schedviz_core::{
    chart::SeriesKey,
    command::ControlCommand,
    config::SimConfig,
    sink::NoopSink,
    snapshot::SeriesSummary,
    SimController,
};
use std::env;
use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Instant;
use terminal_sink::{render_chart, TerminalSink};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    Start,
    Pause,
    Toggle,
    Reset,
    GetState,
    Quit,
}

/// A parsed line from the control surface.
#[derive(Debug, PartialEq)]
enum Incoming {
    Control(ControlCommand),
    GetState,
    Quit,
    Invalid(String),
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = match flag_value(&args, "--config") {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if let Some(seed) = parse_arg(&args, "--seed") {
        config.seed = seed;
    }
    if let Some(ms) = parse_arg(&args, "--interval-ms") {
        config.tick_interval_ms = ms;
    }
    config.validate()?;

    let ipc_mode = has_flag(&args, "--ipc-mode");
    let headless = has_flag(&args, "--headless");
    let color = !has_flag(&args, "--no-color");

    if headless {
        run_headless(config, color)
    } else if ipc_mode {
        let sink = Box::new(JsonLinesSink::new(io::stdout()));
        run_loop(SimController::new(config, sink), parse_ipc_line, true)
    } else {
        let sink = Box::new(TerminalSink::new(io::stdout(), color, true));
        run_loop(SimController::new(config, sink), parse_key_line, false)
    }
}

fn run_headless(config: SimConfig, color: bool) -> Result<()> {
    println!("Scheduler metrics dashboard (headless run)");
    println!("  seed:     {}", config.seed);
    println!("  horizon:  {}", config.horizon);
    println!();

    let mut controller = SimController::new(config, Box::new(NoopSink));
    let appended = controller.run_to_horizon();

    println!("{}", render_chart(&controller.frame(&[]), 16, color));
    print_summary(&controller, appended);
    Ok(())
}

/// Single-threaded control loop. The stdin reader only forwards parsed
/// lines; every state change happens here, between waits bounded by
/// the tick timer's next deadline.
fn run_loop(
    mut controller: SimController,
    parse: fn(&str) -> Incoming,
    ipc_mode: bool,
) -> Result<()> {
    let rx = spawn_stdin_reader(parse);
    controller.refresh();
    controller.check_sink()?;

    loop {
        let next = match controller.next_deadline() {
            Some(deadline) => rx.recv_timeout(deadline.saturating_duration_since(Instant::now())),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        let flow = step(&mut controller, next, Instant::now(), ipc_mode);
        controller.check_sink()?;
        if flow == Flow::Quit {
            break;
        }
    }

    log::info!("control surface closed at tick {}", controller.state().current_tick());
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Handle one wake-up of the control loop, then fire the tick timer if
/// it is due. Polling after every message keeps a busy control surface
/// from holding ticks back.
fn step(
    controller: &mut SimController,
    next: Result<Incoming, RecvTimeoutError>,
    now: Instant,
    ipc_mode: bool,
) -> Flow {
    match next {
        Ok(Incoming::Control(cmd)) => controller.handle(cmd),
        Ok(Incoming::GetState) => controller.refresh(),
        Ok(Incoming::Quit) | Err(RecvTimeoutError::Disconnected) => return Flow::Quit,
        Ok(Incoming::Invalid(reason)) => {
            if ipc_mode {
                println!("{}", serde_json::json!({ "error": reason }));
            } else {
                log::warn!("{reason}");
            }
        }
        Err(RecvTimeoutError::Timeout) => {}
    }
    controller.poll_at(now);
    Flow::Continue
}

fn spawn_stdin_reader(parse: fn(&str) -> Incoming) -> Receiver<Incoming> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let incoming = match line {
                Ok(line) => parse(&line),
                Err(e) => {
                    log::warn!("stdin read failed: {e}");
                    break;
                }
            };
            let quit = matches!(incoming, Incoming::Quit);
            if tx.send(incoming).is_err() || quit {
                break;
            }
        }
    });
    rx
}

fn parse_ipc_line(line: &str) -> Incoming {
    match serde_json::from_str::<IpcCommand>(line) {
        Ok(IpcCommand::Start) => Incoming::Control(ControlCommand::Start),
        Ok(IpcCommand::Pause) => Incoming::Control(ControlCommand::Pause),
        Ok(IpcCommand::Toggle) => Incoming::Control(ControlCommand::Toggle),
        Ok(IpcCommand::Reset) => Incoming::Control(ControlCommand::Reset),
        Ok(IpcCommand::GetState) => Incoming::GetState,
        Ok(IpcCommand::Quit) => Incoming::Quit,
        Err(e) => Incoming::Invalid(e.to_string()),
    }
}

fn parse_key_line(line: &str) -> Incoming {
    match line.trim() {
        "" | "p" => Incoming::Control(ControlCommand::Toggle),
        "s" => Incoming::Control(ControlCommand::Start),
        "x" => Incoming::Control(ControlCommand::Pause),
        "r" => Incoming::Control(ControlCommand::Reset),
        "q" => Incoming::Quit,
        other => Incoming::Invalid(format!("Unknown key: {other:?} (p, s, x, r, q)")),
    }
}

fn print_summary(controller: &SimController, appended: usize) {
    println!("=== RUN SUMMARY ===");
    println!("  run_id:      {}", controller.run_id());
    println!("  points:      {appended}");
    println!("  final tick:  {}", controller.state().current_tick());
    println!("  phase:       {:?}", controller.phase());
    println!();

    for def in &controller.config().chart.series {
        match SeriesSummary::compute(controller.series(), def.key) {
            Some(s) => println!(
                "  {:<26} min {:>7.2} | mean {:>7.2} | max {:>7.2} | last {:>7.2}",
                def.label, s.min, s.mean, s.max, s.last
            ),
            None => println!("  {:<26} (no data)", def.label),
        }
    }

    let drained = controller
        .series()
        .iter()
        .position(|p| p.value(SeriesKey::WaitingJobs) == 0.0);
    if let Some(tick) = drained {
        println!();
        println!("  waiting queue first drained at tick {tick}");
    }
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2).find(|w| w[0] == flag).map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    flag_value(args, flag).and_then(|v| v.parse().ok())
}
