use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const LANDMARK_COUNT: usize = 21;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClockError {
    #[error("hour {0} is outside 1..=12")]
    Hour(u8),
    #[error("minute {0} is not a 5-minute tick below 60")]
    Minute(u8),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("unknown handedness label {0:?}")]
    Handedness(String),
    #[error("expected 21 landmarks, got {0}")]
    LandmarkCount(usize),
}

/// A dial position with the minute quantized to 5-minute ticks.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "ClockTimeRepr")]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self, ClockError> {
        if !(1..=12).contains(&hour) { return Err(ClockError::Hour(hour)); }
        if minute >= 60 || minute % 5 != 0 { return Err(ClockError::Minute(minute)); }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 { self.hour }
    pub fn minute(&self) -> u8 { self.minute }
}

#[derive(Deserialize)]
struct ClockTimeRepr {
    hour: u8,
    minute: u8,
}

impl TryFrom<ClockTimeRepr> for ClockTime {
    type Error = ClockError;

    fn try_from(r: ClockTimeRepr) -> Result<Self, Self::Error> { ClockTime::new(r.hour, r.minute) }
}

impl Default for ClockTime {
    fn default() -> Self { Self { hour: 12, minute: 0 } }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self { Self { x, y } }
}

/// Handedness as labelled by the tracking feed, from the subject's own view.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Handedness { Left, Right }

impl FromStr for Handedness {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Left" => Ok(Handedness::Left),
            "Right" => Ok(Handedness::Right),
            other => Err(FrameError::Handedness(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HandObservation {
    pub landmarks: [Landmark; LANDMARK_COUNT],
    pub handedness: Handedness,
}

impl HandObservation {
    pub fn from_points(points: &[Landmark], handedness: Handedness) -> Result<Self, FrameError> {
        let landmarks: [Landmark; LANDMARK_COUNT] = points
            .try_into()
            .map_err(|_| FrameError::LandmarkCount(points.len()))?;
        Ok(Self { landmarks, handedness })
    }

    /// Mean x of every landmark, used to tell which half of the frame a hand is in.
    pub fn center_x(&self) -> f32 {
        self.landmarks.iter().map(|p| p.x).sum::<f32>() / LANDMARK_COUNT as f32
    }
}

/// One inference result. An empty frame means no hands (or no landmarks) were reported.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct HandFrame {
    pub hands: Vec<HandObservation>,
}

impl HandFrame {
    pub fn empty() -> Self { Self::default() }
    pub fn new(hands: Vec<HandObservation>) -> Self { Self { hands } }
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PlayerId { P1, P2 }

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::P1, PlayerId::P2];
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlayerId::P1 => "Player 1",
            PlayerId::P2 => "Player 2",
        };
        write!(f, "{}", s)
    }
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Policy { FirstToSolve, Cooperative }

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundOutcome { Unresolved, Winner(PlayerId), Tie, TeamSolved }

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum MatchPhase {
    Active,
    Resolving,
    MatchOver,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundRecord {
    pub round: u32,
    pub target: ClockTime,
    pub outcome: RoundOutcome,
    pub scores: [u32; 2],
}
