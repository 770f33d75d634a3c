use crate::tracker::{PlayerState, Players};
use crate::types::{ClockTime, PlayerId, Policy, RoundOutcome};

/// Both hands seen this frame, hour equal on the 12-hour dial, minute within `tolerance`.
pub fn is_player_solved(player: &PlayerState, target: ClockTime, tolerance: u8) -> bool {
    if !player.has_hour || !player.has_minute { return false; }
    let hour_match = player.hour() % 12 == target.hour() % 12;
    let minute_diff = player.minute().abs_diff(target.minute());
    hour_match && minute_diff <= tolerance
}

/// Competitive rounds: first solved player wins, both in the same frame is a tie.
pub fn judge_first_to_solve(players: &Players, target: ClockTime, tolerance: u8) -> RoundOutcome {
    let p1 = is_player_solved(&players.p1, target, tolerance);
    let p2 = is_player_solved(&players.p2, target, tolerance);
    match (p1, p2) {
        (true, true) => RoundOutcome::Tie,
        (true, false) => RoundOutcome::Winner(PlayerId::P1),
        (false, true) => RoundOutcome::Winner(PlayerId::P2),
        (false, false) => RoundOutcome::Unresolved,
    }
}

/// Cooperative rounds only succeed when both players match the target together.
pub fn judge_cooperative(players: &Players, target: ClockTime, tolerance: u8) -> bool {
    PlayerId::ALL
        .iter()
        .all(|&id| is_player_solved(players.get(id), target, tolerance))
}

pub fn judge_round(policy: Policy, players: &Players, target: ClockTime, tolerance: u8) -> RoundOutcome {
    match policy {
        Policy::FirstToSolve => judge_first_to_solve(players, target, tolerance),
        Policy::Cooperative => {
            if judge_cooperative(players, target, tolerance) { RoundOutcome::TeamSolved } else { RoundOutcome::Unresolved }
        }
    }
}
