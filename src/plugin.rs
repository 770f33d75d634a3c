use bevy::prelude::*;

use crate::config::GameConfig;
use crate::state_machine::ClockMatch;
use crate::types::{ClockTime, HandFrame, RoundOutcome};

#[derive(Debug, Clone, Default, Resource)]
pub struct ClockDuelSettings {
    pub config: GameConfig,
}

#[derive(Resource)]
pub struct MatchRuntime {
    pub machine: ClockMatch,
}

/// One result from the hand-tracking feed.
#[derive(Event, Clone, Debug)]
pub struct HandFrameEvent(pub HandFrame);

/// "Next round" button.
#[derive(Event, Clone, Copy, Debug)]
pub struct SkipRoundEvent;

#[derive(Event, Clone, Copy, Debug)]
pub struct CaptureFailedEvent;

/// "Restart" button. Works in every phase, including after the match is over.
#[derive(Event, Clone, Copy, Debug)]
pub struct ResetMatchEvent;

#[derive(Event, Clone, Copy, Debug)]
pub struct RoundResolved {
    pub outcome: RoundOutcome,
}

#[derive(Event, Clone, Copy, Debug)]
pub struct NewTarget {
    pub target: ClockTime,
    pub round: u32,
}

pub struct ClockDuelPlugin;

impl Plugin for ClockDuelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ClockDuelSettings>()
            .add_event::<HandFrameEvent>()
            .add_event::<SkipRoundEvent>()
            .add_event::<CaptureFailedEvent>()
            .add_event::<ResetMatchEvent>()
            .add_event::<RoundResolved>()
            .add_event::<NewTarget>()
            .add_systems(Startup, setup)
            .add_systems(Update, (advance_rounds, read_frames, read_skips, read_resets, read_capture_failures).chain());
    }
}

fn now_ms(time: &Time) -> u64 { (time.elapsed_seconds_f64() * 1000.0) as u64 }

fn announce(machine: &ClockMatch, targets: &mut EventWriter<NewTarget>) {
    targets.send(NewTarget { target: machine.target, round: machine.round });
}

fn setup(mut commands: Commands, settings: Res<ClockDuelSettings>, mut targets: EventWriter<NewTarget>) {
    match ClockMatch::new(settings.config.clone()) {
        Ok(machine) => {
            announce(&machine, &mut targets);
            commands.insert_resource(MatchRuntime { machine });
        }
        Err(e) => log::error!("clock duel not started: {e}"),
    }
}

fn advance_rounds(time: Res<Time>, rt: Option<ResMut<MatchRuntime>>, mut targets: EventWriter<NewTarget>) {
    let Some(mut rt) = rt else { return };
    if rt.machine.tick(now_ms(&time)) {
        announce(&rt.machine, &mut targets);
    }
}

fn read_frames(
    time: Res<Time>,
    rt: Option<ResMut<MatchRuntime>>,
    mut frames: EventReader<HandFrameEvent>,
    mut resolved: EventWriter<RoundResolved>,
    mut targets: EventWriter<NewTarget>,
) {
    let Some(mut rt) = rt else {
        frames.clear();
        return;
    };
    let now = now_ms(&time);
    for HandFrameEvent(frame) in frames.read() {
        let round = rt.machine.round;
        let outcome = rt.machine.on_frame(now, frame);
        if rt.machine.round != round {
            announce(&rt.machine, &mut targets);
        }
        if outcome != RoundOutcome::Unresolved {
            resolved.send(RoundResolved { outcome });
        }
    }
}

fn read_skips(
    time: Res<Time>,
    rt: Option<ResMut<MatchRuntime>>,
    mut skips: EventReader<SkipRoundEvent>,
    mut targets: EventWriter<NewTarget>,
) {
    let Some(mut rt) = rt else {
        skips.clear();
        return;
    };
    let now = now_ms(&time);
    for _ in skips.read() {
        if rt.machine.skip_round(now) {
            announce(&rt.machine, &mut targets);
        }
    }
}

fn read_resets(
    time: Res<Time>,
    rt: Option<ResMut<MatchRuntime>>,
    mut resets: EventReader<ResetMatchEvent>,
    mut targets: EventWriter<NewTarget>,
) {
    let Some(mut rt) = rt else {
        resets.clear();
        return;
    };
    // several presses in one frame restart once
    if resets.read().count() > 0 {
        rt.machine.reset_match(now_ms(&time));
        announce(&rt.machine, &mut targets);
    }
}

fn read_capture_failures(rt: Option<ResMut<MatchRuntime>>, mut failures: EventReader<CaptureFailedEvent>) {
    let Some(mut rt) = rt else {
        failures.clear();
        return;
    };
    if failures.read().count() > 0 {
        rt.machine.report_capture_failure();
    }
}
