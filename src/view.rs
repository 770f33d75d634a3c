use serde::Serialize;

use crate::decoder::{dial_angles, DialAngles};
use crate::state_machine::ClockMatch;
use crate::status::{HandProgress, Status};
use crate::tracker::PlayerState;
use crate::types::{ClockTime, MatchPhase, PlayerId};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DialView {
    pub time: ClockTime,
    pub text: String,
    pub angles: DialAngles,
}

impl From<ClockTime> for DialView {
    fn from(time: ClockTime) -> Self {
        Self { time, text: time.to_string(), angles: dial_angles(time) }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct PlayerView {
    pub id: PlayerId,
    pub dial: DialView,
    pub score: u32,
    pub progress: HandProgress,
}

impl PlayerView {
    fn new(id: PlayerId, state: &PlayerState) -> Self {
        Self { id, dial: state.time().into(), score: state.score, progress: state.into() }
    }
}

/// Everything a display needs to draw one frame of the game.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct MatchView {
    pub target: DialView,
    pub players: [PlayerView; 2],
    pub status: Status,
    pub status_text: String,
    pub phase: MatchPhase,
    pub round: u32,
    pub rounds_completed: u32,
}

impl ClockMatch {
    pub fn view(&self) -> MatchView {
        MatchView {
            target: self.target.into(),
            players: [
                PlayerView::new(PlayerId::P1, &self.players.p1),
                PlayerView::new(PlayerId::P2, &self.players.p2),
            ],
            status: self.status,
            status_text: self.status.to_string(),
            phase: self.phase,
            round: self.round,
            rounds_completed: self.rounds_completed,
        }
    }
}
