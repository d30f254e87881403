//! Simulation state and the pure transition function.
//!
//! RULES:
//!   - SimulationState is only ever changed by transition().
//!   - series[i].tick == i, and series.len() == current_tick after
//!     every transition.
//!   - current_tick never exceeds the horizon; reaching it clears
//!     the running flag in the same step.

use crate::{
    chart::SeriesKey,
    command::SimInput,
    event::SimEvent,
    synth::MetricSynthesizer,
    types::Tick,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DataPoint {
    pub tick:         Tick,
    pub utilization:  f64,
    /// Thousands of jobs per second.
    pub throughput:   f64,
    pub waiting_jobs: f64,
}

impl DataPoint {
    pub fn value(&self, key: SeriesKey) -> f64 {
        match key {
            SeriesKey::Utilization => self.utilization,
            SeriesKey::Throughput  => self.throughput,
            SeriesKey::WaitingJobs => self.waiting_jobs,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Running,
    /// Horizon reached. Only reset() leaves this phase.
    Completed,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulationState {
    is_running:   bool,
    current_tick: Tick,
    series:       Vec<DataPoint>,
}

impl SimulationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn current_tick(&self) -> Tick {
        self.current_tick
    }

    pub fn series(&self) -> &[DataPoint] {
        &self.series
    }

    pub fn phase(&self, horizon: Tick) -> Phase {
        if self.is_running {
            Phase::Running
        } else if self.current_tick >= horizon {
            Phase::Completed
        } else {
            Phase::Idle
        }
    }
}

/// Apply one input. Returns the next state and what changed.
///
/// Inputs that do not apply to the current state (start at the
/// horizon, pause while idle, tick while not running) return the
/// state untouched with no events.
pub fn transition(
    mut state: SimulationState,
    input: SimInput,
    horizon: Tick,
    synth: &mut MetricSynthesizer,
) -> (SimulationState, Vec<SimEvent>) {
    let mut events = Vec::new();

    match input {
        SimInput::Start => {
            if !state.is_running && state.current_tick < horizon {
                state.is_running = true;
                events.push(SimEvent::Started { tick: state.current_tick });
            }
        }
        SimInput::Pause => {
            if state.is_running {
                state.is_running = false;
                events.push(SimEvent::Paused { tick: state.current_tick });
            }
        }
        SimInput::Reset => {
            let previous_tick = state.current_tick;
            state = SimulationState::new();
            events.push(SimEvent::Reset { previous_tick });
        }
        SimInput::Tick => {
            if !state.is_running {
                return (state, events);
            }
            if state.current_tick >= horizon {
                state.is_running = false;
                events.push(SimEvent::Completed { tick: state.current_tick });
                return (state, events);
            }

            let point = synth.synthesize(state.current_tick);
            state.series.push(point);
            state.current_tick += 1;
            events.push(SimEvent::PointAppended { point });

            if state.current_tick >= horizon {
                state.is_running = false;
                events.push(SimEvent::Completed { tick: state.current_tick });
            }
        }
    }

    (state, events)
}
