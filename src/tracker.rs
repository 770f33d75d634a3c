use serde::Serialize;

use crate::decoder::{decode_hand, RawReading};
use crate::types::{ClockTime, HandFrame, Handedness, PlayerId};

/// Per-player dial state. `has_hour`/`has_minute` only describe the current frame.
///
/// The dial values are private: [`Players::apply`] is the only writer and always
/// clamps the hour to 1..=12 and snaps the minute to a 5-minute tick.
#[derive(Copy, Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PlayerState {
    hour: u8,
    minute: u8,
    pub has_hour: bool,
    pub has_minute: bool,
    pub score: u32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self { hour: 12, minute: 0, has_hour: false, has_minute: false, score: 0 }
    }
}

impl PlayerState {
    pub fn hour(&self) -> u8 { self.hour }
    pub fn minute(&self) -> u8 { self.minute }

    pub fn time(&self) -> ClockTime {
        ClockTime::new(self.hour, self.minute).unwrap_or_default()
    }

    /// Raw dial values with both hands seen, bypassing the snap.
    #[cfg(test)]
    pub(crate) fn on_dial(hour: u8, minute: u8) -> Self {
        Self { hour, minute, has_hour: true, has_minute: true, score: 0 }
    }

    pub fn clear_flags(&mut self) {
        self.has_hour = false;
        self.has_minute = false;
    }
}

/// What a frame contributed to the tracker.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameInput {
    NoHands,
    Applied(usize),
}

#[derive(Copy, Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct Players {
    pub p1: PlayerState,
    pub p2: PlayerState,
}

impl Players {
    pub fn get(&self, id: PlayerId) -> &PlayerState {
        match id { PlayerId::P1 => &self.p1, PlayerId::P2 => &self.p2 }
    }

    pub fn get_mut(&mut self, id: PlayerId) -> &mut PlayerState {
        match id { PlayerId::P1 => &mut self.p1, PlayerId::P2 => &mut self.p2 }
    }

    pub fn scores(&self) -> [u32; 2] { [self.p1.score, self.p2.score] }

    pub fn begin_frame(&mut self) {
        self.p1.clear_flags();
        self.p2.clear_flags();
    }

    /// Right hand sets the hour, left hand the minute.
    pub fn apply(&mut self, id: PlayerId, handedness: Handedness, reading: RawReading) {
        let player = self.get_mut(id);
        match handedness {
            Handedness::Right => {
                player.hour = reading.hour.clamp(1, 12);
                player.has_hour = true;
            }
            Handedness::Left => {
                player.minute = snap_minute(reading.minute);
                player.has_minute = true;
            }
        }
    }

    /// Resets the frame flags, then applies every hand in detection order.
    pub fn apply_frame(&mut self, frame: &HandFrame, split_x: f32) -> FrameInput {
        self.begin_frame();
        if frame.hands.is_empty() {
            return FrameInput::NoHands;
        }
        for hand in &frame.hands {
            let id = player_for(hand.center_x(), split_x);
            let reading = decode_hand(&hand.landmarks);
            log::trace!("{id:?} {:?} hand reads {reading:?}", hand.handedness);
            self.apply(id, hand.handedness, reading);
        }
        FrameInput::Applied(frame.hands.len())
    }
}

/// The frame arrives mirrored, so the left half of the image belongs to player 1.
pub fn player_for(center_x: f32, split_x: f32) -> PlayerId {
    if center_x < split_x { PlayerId::P1 } else { PlayerId::P2 }
}

/// Nearest 5-minute tick, with 60 folded back to 0.
pub fn snap_minute(minute: u8) -> u8 {
    let snapped = ((minute as f32 / 5.0).round() as u8) * 5;
    if snapped >= 60 { 0 } else { snapped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::landmarks_pointing;
    use crate::types::HandObservation;

    fn hand(degrees: f32, center_x: f32, handedness: Handedness) -> HandObservation {
        HandObservation { landmarks: landmarks_pointing(degrees, center_x), handedness }
    }

    #[test]
    fn snap_is_idempotent() {
        for m in 0..60u8 {
            let once = snap_minute(m);
            assert_eq!(snap_minute(once), once);
            assert!(once < 60 && once % 5 == 0);
        }
        assert_eq!(snap_minute(57), 55);
        assert_eq!(snap_minute(58), 0);
        assert_eq!(snap_minute(12), 10);
        assert_eq!(snap_minute(13), 15);
    }

    #[test]
    fn screen_half_picks_player() {
        assert_eq!(player_for(hand(0.0, 0.25, Handedness::Left).center_x(), 0.5), PlayerId::P1);
        assert_eq!(player_for(hand(90.0, 0.75, Handedness::Left).center_x(), 0.5), PlayerId::P2);
        assert_eq!(player_for(0.5, 0.5), PlayerId::P2);
    }

    #[test]
    fn hands_fill_their_roles() {
        let mut players = Players::default();
        let frame = HandFrame::new(vec![
            hand(90.0, 0.25, Handedness::Right),
            hand(180.0, 0.25, Handedness::Left),
            hand(300.0, 0.75, Handedness::Left),
        ]);
        assert_eq!(players.apply_frame(&frame, 0.5), FrameInput::Applied(3));
        assert_eq!((players.p1.hour(), players.p1.minute()), (3, 30));
        assert!(players.p1.has_hour && players.p1.has_minute);
        assert_eq!(players.p2.minute(), 50);
        assert!(!players.p2.has_hour && players.p2.has_minute);
    }

    #[test]
    fn decoded_values_land_on_the_dial() {
        let mut players = Players::default();
        for deg in 0..360 {
            let frame = HandFrame::new(vec![
                hand(deg as f32, 0.25, Handedness::Right),
                hand(deg as f32, 0.25, Handedness::Left),
            ]);
            players.apply_frame(&frame, 0.5);
            assert!((1..=12).contains(&players.p1.hour()));
            assert!(players.p1.minute() < 60 && players.p1.minute() % 5 == 0);
            assert_eq!(players.p1.time(), ClockTime::new(players.p1.hour(), players.p1.minute()).unwrap());
        }
    }

    #[test]
    fn last_hand_of_a_role_wins() {
        let mut players = Players::default();
        let frame = HandFrame::new(vec![
            hand(90.0, 0.25, Handedness::Right),
            hand(180.0, 0.3, Handedness::Right),
        ]);
        players.apply_frame(&frame, 0.5);
        assert_eq!(players.p1.hour(), 6);
    }

    #[test]
    fn empty_frame_clears_flags_but_keeps_values() {
        let mut players = Players::default();
        players.apply_frame(&HandFrame::new(vec![hand(90.0, 0.25, Handedness::Right)]), 0.5);
        assert!(players.p1.has_hour);
        assert_eq!(players.apply_frame(&HandFrame::empty(), 0.5), FrameInput::NoHands);
        assert!(!players.p1.has_hour && !players.p1.has_minute);
        assert!(!players.p2.has_hour && !players.p2.has_minute);
        assert_eq!(players.p1.hour(), 3);
    }

    #[test]
    fn time_reflects_the_applied_hands() {
        let mut players = Players::default();
        assert_eq!(players.p2.time(), ClockTime::default());
        let frame = HandFrame::new(vec![
            hand(240.0, 0.75, Handedness::Right),
            hand(88.0, 0.75, Handedness::Left),
        ]);
        players.apply_frame(&frame, 0.5);
        assert_eq!(players.p2.time(), ClockTime::new(8, 15).unwrap());
        assert_eq!(players.p2.time().to_string(), "08:15");
        assert_eq!(players.p1.time(), ClockTime::default());
    }
}
