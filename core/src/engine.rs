//! The simulation controller — owns state, the tick timer, and the sink.
//!
//! RULES:
//!   - Every mutation goes through transition(); the controller never
//!     edits SimulationState itself.
//!   - The tick timer exists if and only if the state is running. It is
//!     re-synced right after every transition, before the operation
//!     returns, so no tick can fire after pause, reset or completion.
//!   - Every transition that emits events is rendered exactly once.

use crate::{
    command::{ControlCommand, SimInput},
    config::SimConfig,
    error::{SimError, SimResult},
    event::SimEvent,
    rng::{MetricRng, UniformSource},
    sink::RenderSink,
    snapshot::DashboardFrame,
    state::{transition, DataPoint, Phase, SimulationState},
    synth::MetricSynthesizer,
    timer::TickTimer,
    types::{new_run_id, RunId},
};
use std::time::Instant;

pub struct SimController {
    config:          SimConfig,
    state:           SimulationState,
    synth:           MetricSynthesizer,
    timer:           Option<TickTimer>,
    run_id:          RunId,
    sink:            Box<dyn RenderSink>,
    last_sink_error: Option<SimError>,
}

impl SimController {
    /// Controller seeded from `config.seed`.
    pub fn new(config: SimConfig, sink: Box<dyn RenderSink>) -> Self {
        let source = Box::new(MetricRng::new(config.seed));
        Self::with_source(config, source, sink)
    }

    /// Controller drawing from an explicit random source.
    pub fn with_source(
        config: SimConfig,
        source: Box<dyn UniformSource + Send>,
        sink: Box<dyn RenderSink>,
    ) -> Self {
        let synth = MetricSynthesizer::new(config.metrics.clone(), source);
        Self {
            config,
            state: SimulationState::new(),
            synth,
            timer: None,
            run_id: new_run_id(),
            sink,
            last_sink_error: None,
        }
    }

    // ── Control surface ────────────────────────────────────────

    pub fn start(&mut self) {
        self.apply(SimInput::Start, Instant::now());
    }

    pub fn pause(&mut self) {
        self.apply(SimInput::Pause, Instant::now());
    }

    pub fn toggle(&mut self) {
        self.handle(ControlCommand::Toggle);
    }

    pub fn reset(&mut self) {
        self.apply(SimInput::Reset, Instant::now());
    }

    pub fn handle(&mut self, command: ControlCommand) {
        let input = command.to_input(self.state.is_running());
        self.apply(input, Instant::now());
    }

    // ── Tick cadence ───────────────────────────────────────────

    /// One simulation step. A no-op unless running.
    pub fn advance(&mut self) {
        self.apply(SimInput::Tick, Instant::now());
    }

    pub fn poll(&mut self) -> bool {
        self.poll_at(Instant::now())
    }

    /// Fire the tick timer if it is due at `now`. Returns true if a
    /// tick was applied.
    pub fn poll_at(&mut self, now: Instant) -> bool {
        let fired = match self.timer.as_mut() {
            Some(timer) => timer.fire(now),
            None => false,
        };
        if fired {
            self.apply(SimInput::Tick, now);
        }
        fired
    }

    /// When the next tick is due. None unless running.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.as_ref().map(TickTimer::next_due)
    }

    /// Start and step until the run stops, without waiting on the timer.
    /// Returns the number of points appended.
    pub fn run_to_horizon(&mut self) -> usize {
        let before = self.state.series().len();
        self.start();
        while self.state.is_running() {
            self.advance();
        }
        self.state.series().len() - before
    }

    /// Re-render the current state without changing it.
    pub fn refresh(&mut self) {
        self.render(&[]);
    }

    // ── Accessors ──────────────────────────────────────────────

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn series(&self) -> &[DataPoint] {
        self.state.series()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase(self.config.horizon)
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// True while a tick timer handle is held.
    pub fn timer_armed(&self) -> bool {
        self.timer.is_some()
    }

    /// The first render failure since the last call, if any.
    pub fn take_sink_error(&mut self) -> Option<SimError> {
        self.last_sink_error.take()
    }

    /// take_sink_error() as a Result, for `?` in runner loops.
    pub fn check_sink(&mut self) -> SimResult<()> {
        match self.take_sink_error() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn frame<'a>(&'a self, events: &'a [SimEvent]) -> DashboardFrame<'a> {
        build_frame(&self.state, &self.config, &self.run_id, events)
    }

    // ── Internals ──────────────────────────────────────────────

    fn apply(&mut self, input: SimInput, now: Instant) {
        let state = std::mem::take(&mut self.state);
        let (next, events) = transition(state, input, self.config.horizon, &mut self.synth);
        self.state = next;
        self.sync_timer(now);

        if events.is_empty() {
            return;
        }
        for event in &events {
            self.log_event(event);
            if matches!(event, SimEvent::Reset { .. }) {
                self.run_id = new_run_id();
            }
        }
        self.render(&events);
    }

    fn sync_timer(&mut self, now: Instant) {
        match (self.state.is_running(), self.timer.is_some()) {
            (true, false) => {
                let timer = TickTimer::arm(self.config.tick_interval(), now);
                log::debug!("tick timer armed ({:?})", timer.interval());
                self.timer = Some(timer);
            }
            (false, true) => {
                if let Some(timer) = self.timer.take() {
                    log::debug!("tick timer cancelled after {} firings", timer.fired());
                }
            }
            _ => {}
        }
    }

    fn log_event(&self, event: &SimEvent) {
        match event {
            SimEvent::PointAppended { point } => log::debug!(
                "tick={} util={:.1} thr={:.2} waiting={:.1}",
                point.tick,
                point.utilization,
                point.throughput,
                point.waiting_jobs
            ),
            SimEvent::Started { tick } => log::info!("run {} started at tick {tick}", self.run_id),
            SimEvent::Paused { tick } => log::info!("run {} paused at tick {tick}", self.run_id),
            SimEvent::Completed { tick } => {
                log::info!("run {} completed at tick {tick}", self.run_id)
            }
            SimEvent::Reset { previous_tick } => {
                log::info!("run {} reset from tick {previous_tick}", self.run_id)
            }
        }
    }

    fn render(&mut self, events: &[SimEvent]) {
        let frame = build_frame(&self.state, &self.config, &self.run_id, events);
        if let Err(e) = self.sink.render(&frame) {
            log::warn!("render sink '{}' failed: {e}", self.sink.name());
            if self.last_sink_error.is_none() {
                self.last_sink_error = Some(e);
            }
        }
    }
}

/// The frame for one render. A free function so `render` can build it
/// while the sink is borrowed mutably.
fn build_frame<'a>(
    state: &'a SimulationState,
    config: &'a SimConfig,
    run_id: &'a str,
    events: &'a [SimEvent],
) -> DashboardFrame<'a> {
    DashboardFrame {
        run_id,
        phase:        state.phase(config.horizon),
        is_running:   state.is_running(),
        current_tick: state.current_tick(),
        horizon:      config.horizon,
        chart:        &config.chart,
        series:       state.series(),
        events,
    }
}
