//! Bonus wheel: uniform selection over 37 fixed segments
//!
//! The wheel uses the European roulette layout. The outcome is decided by a
//! single uniformly random resting angle; any spin-down animation a host
//! shows is generated *from* that angle afterwards and cannot influence the
//! result.
//!
//! A fixed pointer at 90 degrees ("pointing up") reads the winning segment
//! off the resting angle.

use std::time::Duration;

use rand::Rng;

pub const SEGMENT_COUNT: usize = 37;
pub const SEGMENT_WIDTH: f64 = 360.0 / SEGMENT_COUNT as f64;
pub const POINTER_ANGLE: f64 = 90.0;

/// European roulette wheel order, starting from the zero pocket.
pub const LAYOUT: [u8; SEGMENT_COUNT] = [
    0, 32, 15, 19, 4, 21, 2, 25, 17, 34, 6, 27, 13, 36, 11, 30, 8, 23, 10, 5, 24, 16, 33, 1, 20,
    14, 31, 9, 22, 18, 29, 7, 28, 12, 35, 3, 26,
];

/// Display-only color class of a segment. Has no effect on selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentColor {
    Green,
    Red,
    Black,
}

/// Color of the segment at `slot` in [`LAYOUT`] order: green for the zero
/// pocket, then alternating red/black by position.
pub fn segment_color(slot: usize) -> SegmentColor {
    if LAYOUT[slot % SEGMENT_COUNT] == 0 {
        SegmentColor::Green
    } else if slot % 2 == 0 {
        SegmentColor::Red
    } else {
        SegmentColor::Black
    }
}

/// The result of one spin: the winning label and the resting angle that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinOutcome {
    pub label: u8,
    pub resting_angle: f64,
}

/// Spin the wheel: draw a resting angle uniformly from [0, 360) and read the
/// label under the pointer.
pub fn spin<R: Rng + ?Sized>(rng: &mut R) -> SpinOutcome {
    let resting_angle = rng.gen_range(0.0..360.0);
    SpinOutcome {
        label: label_at(resting_angle),
        resting_angle,
    }
}

/// The label the upward pointer reads when the wheel rests at `angle`
/// degrees of rotation.
pub fn label_at(angle: f64) -> u8 {
    let adjusted = (POINTER_ANGLE - angle - SEGMENT_WIDTH / 2.0).rem_euclid(360.0);
    let index = (adjusted / SEGMENT_WIDTH) as usize % SEGMENT_COUNT;
    LAYOUT[index]
}

/// A cosmetic deceleration schedule for hosts that animate the spin. Frames
/// are wheel rotations in degrees; the last frame is exactly the outcome's
/// resting angle, so replaying the plan can never change the result.
#[derive(Debug, Clone)]
pub struct SpinPlan {
    pub frames: Vec<f64>,
    pub frame_delay: Duration,
}

impl SpinOutcome {
    /// Build an animation plan ending at this outcome's resting angle.
    /// Initial speed, spin count, and deceleration are randomized for
    /// variety only.
    pub fn plan<R: Rng + ?Sized>(&self, rng: &mut R) -> SpinPlan {
        let deceleration: f64 = rng.gen_range(0.97..0.985);
        let mut speed: f64 = 50.0;
        let mut angle: f64 = rng.gen_range(0.0..360.0);

        let mut frames = Vec::new();
        while speed > 0.3 {
            angle = (angle + speed) % 360.0;
            frames.push(angle);
            speed *= deceleration;
        }

        // Shift the whole path so the final frame lands on the decided angle.
        let offset = match frames.last() {
            Some(last) => self.resting_angle - last,
            None => self.resting_angle,
        };
        for frame in &mut frames {
            *frame = (*frame + offset).rem_euclid(360.0);
        }
        if frames.is_empty() {
            frames.push(self.resting_angle);
        }

        SpinPlan {
            frames,
            frame_delay: Duration::from_millis(16),
        }
    }
}
