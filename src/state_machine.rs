use rand::rngs::StdRng;

use crate::config::{ConfigError, GameConfig};
use crate::judge::judge_round;
use crate::rng::{seeded_rng, TargetSource};
use crate::status::Status;
use crate::timer::Scheduler;
use crate::tracker::{FrameInput, Players};
use crate::types::*;

/// Round and match flow for one session.
///
/// All inputs carry a caller-supplied timestamp in milliseconds. A resolved round
/// moves the match to [`MatchPhase::Resolving`] and schedules the next target;
/// frames arriving before that transition fires update the dials but are never
/// judged again.
#[derive(Clone, Debug)]
pub struct ClockMatch {
    pub config: GameConfig,
    pub phase: MatchPhase,
    pub players: Players,
    pub target: ClockTime,
    pub status: Status,
    pub round: u32,
    pub rounds_completed: u32,
    pub round_results: Vec<RoundRecord>,
    targets: TargetSource,
    rng: StdRng,
    scheduler: Scheduler,
}

impl ClockMatch {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = seeded_rng(config.seed);
        let mut targets = TargetSource::new(config.draw, config.pool_size);
        let target = targets.next(&mut rng);
        log::info!("{:?} match started, first target {target}", config.policy);
        Ok(Self {
            config,
            phase: MatchPhase::Active,
            players: Players::default(),
            target,
            status: Status::Ready,
            round: 1,
            rounds_completed: 0,
            round_results: Vec::new(),
            targets,
            rng,
            scheduler: Scheduler::new(),
        })
    }

    pub fn is_over(&self) -> bool { self.phase == MatchPhase::MatchOver }

    pub fn pending_transition_ms(&self) -> Option<u64> { self.scheduler.due_ms() }

    /// Feeds one inference result. Returns the outcome this frame produced, which is
    /// `Unresolved` whenever the frame was not judged.
    pub fn on_frame(&mut self, now_ms: u64, frame: &HandFrame) -> RoundOutcome {
        self.tick(now_ms);
        if self.is_over() { return RoundOutcome::Unresolved; }

        if let FrameInput::NoHands = self.players.apply_frame(frame, self.config.split_x) {
            log::trace!("no hands at {now_ms} ms");
            self.status = Status::ShowHands;
            return RoundOutcome::Unresolved;
        }
        if self.phase == MatchPhase::Resolving { return RoundOutcome::Unresolved; }

        self.status = Status::progress(&self.players);
        let outcome = judge_round(self.config.policy, &self.players, self.target, self.config.minute_tolerance);
        if outcome != RoundOutcome::Unresolved {
            self.resolve(now_ms, outcome);
        }
        outcome
    }

    /// Fires every due round transition, each drawing a new target.
    /// Returns true when at least one fired.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.is_over() { return false; }
        let mut fired = false;
        while self.scheduler.fire_due(now_ms).is_some() {
            self.next_target();
            fired = true;
        }
        fired
    }

    /// Manual skip: new target right away, no scoring. Refused once the match is over.
    /// A transition already scheduled is left alone and still fires when due.
    pub fn skip_round(&mut self, now_ms: u64) -> bool {
        if self.is_over() { return false; }
        log::info!("round {} skipped at {now_ms} ms", self.round);
        self.next_target();
        self.status = Status::Skipped;
        true
    }

    pub fn reset_match(&mut self, now_ms: u64) {
        self.scheduler.cancel_all();
        self.players = Players::default();
        self.round = 0;
        self.rounds_completed = 0;
        self.round_results.clear();
        self.next_target();
        self.status = Status::Ready;
        log::info!("match reset at {now_ms} ms");
    }

    /// The capture or tracking side failed; nothing in the match changes.
    pub fn report_capture_failure(&mut self) {
        log::warn!("hand tracking unavailable");
        self.status = Status::CameraUnavailable;
    }

    fn resolve(&mut self, now_ms: u64, outcome: RoundOutcome) {
        match outcome {
            RoundOutcome::Unresolved => return,
            RoundOutcome::Tie => {
                self.status = Status::RoundTie;
                self.begin_transition(now_ms);
            }
            RoundOutcome::Winner(id) => {
                let player = self.players.get_mut(id);
                player.score += 1;
                let score = player.score;
                if score >= self.config.win_points {
                    self.phase = MatchPhase::MatchOver;
                    self.status = Status::MatchWon { winner: id, points: self.config.win_points };
                    log::info!("{id} wins the match {:?}", self.players.scores());
                } else {
                    self.status = Status::RoundWon(id);
                    self.begin_transition(now_ms);
                }
            }
            RoundOutcome::TeamSolved => {
                self.rounds_completed += 1;
                self.status = Status::TeamSolved { round: self.rounds_completed };
                self.begin_transition(now_ms);
            }
        }
        log::info!("round {} target {} resolved as {outcome:?}", self.round, self.target);
        self.round_results.push(RoundRecord {
            round: self.round,
            target: self.target,
            outcome,
            scores: self.players.scores(),
        });
    }

    fn begin_transition(&mut self, now_ms: u64) {
        self.phase = MatchPhase::Resolving;
        self.scheduler.schedule(now_ms, self.config.transition_delay_ms());
    }

    fn next_target(&mut self) {
        self.target = self.targets.next(&mut self.rng);
        self.round += 1;
        self.phase = MatchPhase::Active;
        log::debug!("round {} target {}", self.round, self.target);
    }

    #[cfg(test)]
    pub fn force_target(&mut self, target: ClockTime) { self.target = target; }

    #[cfg(test)]
    pub fn targets(&self) -> &TargetSource { &self.targets }
}
