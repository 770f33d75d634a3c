//! Hand pose to dial reading.
//!
//! The vector from the wrist to the middle fingertip is read as a clock hand:
//! pointing straight up is 12 o'clock and the angle grows clockwise in image
//! space (x to the right, y down).

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::types::{ClockTime, Landmark, LANDMARK_COUNT};

pub const WRIST: usize = 0;
pub const MIDDLE_TIP: usize = 12;

/// Undecorated reading of one hand. `minute` is not yet snapped to a 5-minute tick.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawReading {
    pub hour: u8,
    pub minute: u8,
}

/// Angle of the wrist to middle fingertip vector, in `[0, 2π)`.
pub fn hand_angle(landmarks: &[Landmark; LANDMARK_COUNT]) -> f32 {
    let wrist = landmarks[WRIST];
    let tip = landmarks[MIDDLE_TIP];
    let dx = tip.x - wrist.x;
    let dy = tip.y - wrist.y;
    let angle = dx.atan2(-dy);
    (angle + TAU) % TAU
}

pub fn decode_hand(landmarks: &[Landmark; LANDMARK_COUNT]) -> RawReading {
    let turn = hand_angle(landmarks) / TAU;
    let minute = ((turn * 60.0).round() as u32 % 60) as u8;
    // raw 0 is the top of the dial and must read 12, not 0
    let hour = (((turn * 12.0).round() as u32 + 11) % 12 + 1) as u8;
    RawReading { hour, minute }
}

/// Hand angles in radians, clockwise from 12 o'clock, for drawing a dial.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DialAngles {
    pub hour: f32,
    pub minute: f32,
}

pub fn dial_angles(time: ClockTime) -> DialAngles {
    let minute = time.minute() as f32;
    let hour = (time.hour() % 12) as f32 + minute / 60.0;
    DialAngles {
        hour: (hour * 30.0).to_radians(),
        minute: (minute * 6.0).to_radians(),
    }
}

#[cfg(test)]
pub(crate) fn landmarks_pointing(degrees: f32, center_x: f32) -> [Landmark; LANDMARK_COUNT] {
    let rad = degrees.to_radians();
    let wrist = Landmark::new(center_x, 0.6);
    let tip = Landmark::new(center_x + 0.2 * rad.sin(), 0.6 - 0.2 * rad.cos());
    let mut pts = [wrist; LANDMARK_COUNT];
    // keep the mean x on center_x by mirroring the fingertip offset on another point
    pts[1] = Landmark::new(center_x - 0.2 * rad.sin(), 0.6);
    pts[MIDDLE_TIP] = tip;
    pts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_directions() {
        assert_eq!(decode_hand(&landmarks_pointing(0.0, 0.5)), RawReading { hour: 12, minute: 0 });
        assert_eq!(decode_hand(&landmarks_pointing(90.0, 0.5)), RawReading { hour: 3, minute: 15 });
        assert_eq!(decode_hand(&landmarks_pointing(180.0, 0.5)), RawReading { hour: 6, minute: 30 });
        assert_eq!(decode_hand(&landmarks_pointing(270.0, 0.5)), RawReading { hour: 9, minute: 45 });
    }

    #[test]
    fn hour_wraps_to_twelve_at_top() {
        // a few degrees either side of straight up still rounds to raw 0
        assert_eq!(decode_hand(&landmarks_pointing(-5.0, 0.5)).hour, 12);
        assert_eq!(decode_hand(&landmarks_pointing(5.0, 0.5)).hour, 12);
        assert_eq!(decode_hand(&landmarks_pointing(30.0, 0.5)).hour, 1);
        assert_eq!(decode_hand(&landmarks_pointing(330.0, 0.5)).hour, 11);
    }

    #[test]
    fn readings_stay_on_the_dial() {
        for deg in 0..720 {
            let r = decode_hand(&landmarks_pointing(deg as f32 * 0.5, 0.5));
            assert!((1..=12).contains(&r.hour), "hour {} at {}", r.hour, deg);
            assert!(r.minute < 60, "minute {} at {}", r.minute, deg);
        }
    }

    #[test]
    fn angle_is_normalized() {
        let a = hand_angle(&landmarks_pointing(270.0, 0.5));
        assert!((a - 1.5 * std::f32::consts::PI).abs() < 1e-4);
    }

    #[test]
    fn dial_angles_follow_the_minute() {
        let d = dial_angles(ClockTime::new(3, 30).unwrap());
        assert!((d.minute - 180f32.to_radians()).abs() < 1e-5);
        assert!((d.hour - 105f32.to_radians()).abs() < 1e-5);
        let d = dial_angles(ClockTime::new(12, 0).unwrap());
        assert_eq!(d.hour, 0.0);
    }
}
