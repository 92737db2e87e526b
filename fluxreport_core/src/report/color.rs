//! Row background colors for flux tables

/// Map a normalized flux value in [-1, 1] to a six digit hex RGB color
///
/// Positive values fade white to red, negative values white to green, and
/// exactly zero (the separator row) is a fixed gray. The channel value
/// stays positive for the whole input range (220 - 80 = 140).
pub fn flux_color(x: f64) -> String {
    let grad = (220.0 - x.abs() * 80.0).round() as u8;
    if x > 0.0 {
        format!("{:02x}{:02x}{:02x}", 255, grad, grad)
    } else if x < 0.0 {
        format!("{:02x}{:02x}{:02x}", grad, 255, grad)
    } else {
        format!("{:02x}{:02x}{:02x}", 100, 100, 100)
    }
}
