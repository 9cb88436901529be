//! Angle math shared by the wheel canvas and the spin engine.
//!
//! Angles follow the canvas convention: 0° points at 3 o'clock and angles grow
//! clockwise. Sector `i` of an un-rotated wheel spans `[i·step, (i+1)·step)`.

/// The fixed pointer sits at 12 o'clock.
pub const POINTER_ANGLE: f64 = 270.0;

const FULL_TURN: f64 = 360.0;

/// Folds any angle into `[0, 360)`. Non-finite input maps to 0.
pub fn normalize_angle(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let angle = degrees.rem_euclid(FULL_TURN);
    // rem_euclid can round up to 360 for tiny negative inputs
    if angle >= FULL_TURN {
        0.0
    } else {
        angle
    }
}

pub fn sector_width(option_count: usize) -> f64 {
    FULL_TURN / option_count.max(1) as f64
}

/// Index of the sector under the pointer after the wheel has rotated by
/// `final_angle` degrees.
///
/// A landing exactly on a boundary picks the sector that starts there. An
/// `option_count` of zero is treated as one.
pub fn resolve(final_angle: f64, option_count: usize) -> usize {
    let count = option_count.max(1);
    let adjusted = (POINTER_ANGLE - normalize_angle(final_angle) + FULL_TURN) % FULL_TURN;
    let index = (adjusted / sector_width(count)).floor() as usize;
    index.min(count - 1)
}

/// Start angle of sector `index` on a wheel rotated by `rotation` degrees.
pub fn sector_start_angle(index: usize, option_count: usize, rotation: f64) -> f64 {
    rotation + index as f64 * sector_width(option_count)
}

pub fn sector_center_angle(index: usize, option_count: usize, rotation: f64) -> f64 {
    sector_start_angle(index, option_count, rotation) + sector_width(option_count) / 2.0
}
