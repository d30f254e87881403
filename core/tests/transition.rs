//! Pure transition function tests: no controller, no timer.

use schedviz_core::{
    command::{ControlCommand, SimInput},
    config::MetricProfile,
    event::SimEvent,
    rng::ConstantSource,
    state::{transition, Phase, SimulationState},
    synth::MetricSynthesizer,
};

fn synth() -> MetricSynthesizer {
    MetricSynthesizer::new(MetricProfile::default(), Box::new(ConstantSource(0.0)))
}

fn apply_all(
    mut state: SimulationState,
    inputs: &[SimInput],
    horizon: u64,
) -> (SimulationState, Vec<SimEvent>) {
    let mut synth = synth();
    let mut all = Vec::new();
    for input in inputs {
        let (next, events) = transition(state, *input, horizon, &mut synth);
        state = next;
        all.extend(events);
    }
    (state, all)
}

#[test]
fn tick_appends_one_point_and_emits_it() {
    let (state, events) = apply_all(SimulationState::new(), &[SimInput::Start, SimInput::Tick], 100);

    assert_eq!(state.current_tick(), 1);
    assert_eq!(state.series().len(), 1);
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], SimEvent::Started { tick: 0 }));
    match &events[1] {
        SimEvent::PointAppended { point } => {
            assert_eq!(point.tick, 0);
            assert_eq!(point.waiting_jobs, 100.0);
        }
        other => panic!("expected point_appended, got {other:?}"),
    }
}

#[test]
fn no_op_inputs_emit_nothing() {
    let mut synth = synth();
    let idle = SimulationState::new();

    for input in [SimInput::Pause, SimInput::Tick] {
        let (next, events) = transition(idle.clone(), input, 100, &mut synth);
        assert_eq!(next, idle, "{input:?} changed an idle state");
        assert!(events.is_empty(), "{input:?} emitted {events:?}");
    }

    let (running, _) = transition(idle, SimInput::Start, 100, &mut synth);
    let (again, events) = transition(running.clone(), SimInput::Start, 100, &mut synth);
    assert_eq!(again, running);
    assert!(events.is_empty());
}

#[test]
fn final_tick_completes_in_the_same_step() {
    let mut inputs = vec![SimInput::Start];
    inputs.extend(std::iter::repeat(SimInput::Tick).take(3));
    let (state, events) = apply_all(SimulationState::new(), &inputs, 3);

    assert!(!state.is_running());
    assert_eq!(state.phase(3), Phase::Completed);
    assert_eq!(state.series().len(), 3);
    assert!(matches!(events.last(), Some(SimEvent::Completed { tick: 3 })));
}

#[test]
fn ticks_after_completion_are_ignored() {
    let mut inputs = vec![SimInput::Start];
    inputs.extend(std::iter::repeat(SimInput::Tick).take(10));
    let (state, events) = apply_all(SimulationState::new(), &inputs, 4);

    assert_eq!(state.series().len(), 4);
    let completions = events
        .iter()
        .filter(|e| matches!(e, SimEvent::Completed { .. }))
        .count();
    assert_eq!(completions, 1);
}

#[test]
fn start_refused_at_horizon() {
    let mut inputs = vec![SimInput::Start];
    inputs.extend(std::iter::repeat(SimInput::Tick).take(2));
    let (done, _) = apply_all(SimulationState::new(), &inputs, 2);

    let (state, events) = apply_all(done.clone(), &[SimInput::Start], 2);
    assert_eq!(state, done);
    assert!(events.is_empty());
}

#[test]
fn reset_restores_initial_state_and_reports_previous_tick() {
    let inputs = [SimInput::Start, SimInput::Tick, SimInput::Tick, SimInput::Reset];
    let (state, events) = apply_all(SimulationState::new(), &inputs, 100);

    assert_eq!(state, SimulationState::new());
    assert!(matches!(events.last(), Some(SimEvent::Reset { previous_tick: 2 })));
}

#[test]
fn toggle_resolves_against_running_flag() {
    assert_eq!(ControlCommand::Toggle.to_input(true), SimInput::Pause);
    assert_eq!(ControlCommand::Toggle.to_input(false), SimInput::Start);
    assert_eq!(ControlCommand::Reset.to_input(true), SimInput::Reset);
    assert_eq!(ControlCommand::Start.to_input(true), SimInput::Start);
}

#[test]
fn state_serializes_with_camel_case_keys() {
    let (state, _) = apply_all(SimulationState::new(), &[SimInput::Start, SimInput::Tick], 100);
    let json = serde_json::to_value(&state).expect("serialize state");

    assert_eq!(json["isRunning"], true);
    assert_eq!(json["currentTick"], 1);
    assert_eq!(json["series"][0]["waitingJobs"], 100.0);
}
