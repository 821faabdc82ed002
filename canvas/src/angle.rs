//! Angle and scale bounds shared by every transform path.

#[cfg(test)]
#[path = "angle_test.rs"]
mod angle_test;

/// Wrap degrees into `[0, 360)`, including negative input.
#[must_use]
pub fn normalize_degrees_360(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Clamp a scale percentage into `[min, max]`.
#[must_use]
pub fn clamp_scale(scale: f64, min: f64, max: f64) -> f64 {
    scale.clamp(min, max)
}

/// Angle of the vector `(dx, dy)` in degrees, measured clockwise from +x in
/// screen space (y grows downward). `None` for a zero-length vector.
#[must_use]
pub fn vector_angle_deg(dx: f64, dy: f64) -> Option<f64> {
    if dx.abs() < f64::EPSILON && dy.abs() < f64::EPSILON {
        return None;
    }
    let deg = dy.atan2(dx).to_degrees();
    deg.is_finite().then_some(deg)
}

/// Sign of a discrete adjustment request: `+1`, `-1`, or `0` for no movement.
#[must_use]
pub fn step_sign(delta: f64) -> f64 {
    if !delta.is_finite() || delta == 0.0 { 0.0 } else { delta.signum() }
}
