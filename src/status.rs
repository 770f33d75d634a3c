use core::fmt;
use serde::{Deserialize, Serialize};

use crate::tracker::{PlayerState, Players};
use crate::types::PlayerId;

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandProgress {
    pub hour: bool,
    pub minute: bool,
}

impl From<&PlayerState> for HandProgress {
    fn from(p: &PlayerState) -> Self { Self { hour: p.has_hour, minute: p.has_minute } }
}

/// Status line shown to the players.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Status {
    Ready,
    ShowHands,
    Progress { p1: HandProgress, p2: HandProgress },
    RoundTie,
    RoundWon(PlayerId),
    MatchWon { winner: PlayerId, points: u32 },
    TeamSolved { round: u32 },
    Skipped,
    CameraUnavailable,
}

impl Status {
    pub fn progress(players: &Players) -> Self {
        Status::Progress { p1: (&players.p1).into(), p2: (&players.p2).into() }
    }
}

fn mark(set: bool) -> &'static str { if set { "✓" } else { "…" } }

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ready => write!(f, "Set the clock with your hands."),
            Status::ShowHands => write!(f, "Show your hands to the camera."),
            Status::Progress { p1, p2 } => write!(
                f,
                "{}: hour {}, minute {} | {}: hour {}, minute {}",
                PlayerId::P1, mark(p1.hour), mark(p1.minute),
                PlayerId::P2, mark(p2.hour), mark(p2.minute),
            ),
            Status::RoundTie => write!(f, "Tie this round. New target..."),
            Status::RoundWon(p) => write!(f, "{} was first and takes the point! Next target...", p),
            Status::MatchWon { winner, points } => write!(f, "{} wins the match with {} points!", winner, points),
            Status::TeamSolved { round } => write!(f, "Round {} solved together! Next target...", round),
            Status::Skipped => write!(f, "Target skipped. New target..."),
            Status::CameraUnavailable => write!(f, "Camera unavailable. Allow camera access and reload."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_marks_each_hand() {
        let mut players = Players::default();
        players.p1.has_hour = true;
        players.p2.has_minute = true;
        assert_eq!(
            Status::progress(&players).to_string(),
            "Player 1: hour ✓, minute … | Player 2: hour …, minute ✓"
        );
    }

    #[test]
    fn outcome_lines() {
        assert_eq!(Status::RoundWon(PlayerId::P2).to_string(), "Player 2 was first and takes the point! Next target...");
        assert_eq!(
            Status::MatchWon { winner: PlayerId::P1, points: 10 }.to_string(),
            "Player 1 wins the match with 10 points!"
        );
    }
}
