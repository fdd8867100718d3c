use crate::state::HouseOrientation;

/// Number of rays drawn around the sun disc
pub const RAY_COUNT: usize = 8;

/// Angular spacing between rays, degrees
pub const RAY_STEP: f64 = 45.0;

/// Wraps an angle into `[0, 360)`
pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

/// Places an angle on a circular path around `center`.
///
/// 0° lands left of the center at the same height and 90° at the top of the
/// circle (screen y grows downward). Negative angles continue below the
/// center line; nothing is clamped.
pub fn project_on_path(center: [f64; 2], radius: f64, angle_deg: f64) -> [f64; 2] {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    [center[0] - radius * cos, center[1] - radius * sin]
}

/// Sun azimuth expressed in the house frame, where the house front is 0°
pub fn top_view_angle(azimuth: f64, orientation: HouseOrientation) -> f64 {
    normalize_angle(azimuth - orientation.degrees())
}

/// Angle of the South marker in the house frame
pub fn south_marker_angle(orientation: HouseOrientation) -> f64 {
    180.0 - orientation.degrees()
}

/// Start and end points of the rays around a sun disc
pub fn ray_segments(
    center: [f64; 2],
    sun_radius: f64,
    ray_length: f64,
) -> [[[f64; 2]; 2]; RAY_COUNT] {
    let mut rays = [[[0.0; 2]; 2]; RAY_COUNT];
    for (i, ray) in rays.iter_mut().enumerate() {
        let (sin, cos) = (RAY_STEP * i as f64).to_radians().sin_cos();
        let outer = sun_radius + ray_length;
        *ray = [
            [center[0] + sun_radius * cos, center[1] + sun_radius * sin],
            [center[0] + outer * cos, center[1] + outer * sin],
        ];
    }
    rays
}

/// Formats an angle readout with two decimals and a degree sign
pub fn format_angle(angle: f64) -> String {
    format!("{:.2}°", angle)
}

/// Euclidean distance between two points
pub fn distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)).sqrt()
}
