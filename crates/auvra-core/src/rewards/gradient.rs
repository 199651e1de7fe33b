use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradientStop {
    pub color: &'static str,
    pub position: f64,
}

/// Five-stop brand gradient used for progress fills.
pub const BRAND_GRADIENT: [GradientStop; 5] = [
    GradientStop { color: "#A29AEA", position: 0.0 },
    GradientStop { color: "#C17EC9", position: 0.3 },
    GradientStop { color: "#D482B9", position: 0.6 },
    GradientStop { color: "#E98BAC", position: 0.8 },
    GradientStop { color: "#FDC6D1", position: 1.0 },
];

/// Stops of the brand gradient visible in a bar filled to `fraction`.
///
/// Positions are rescaled to the filled width and clamped to `[0, 1]`.
/// At least two stops are always returned.
pub fn gradient_stops(fraction: f64) -> Vec<GradientStop> {
    let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };

    let mut stops: Vec<GradientStop> = BRAND_GRADIENT
        .iter()
        .filter(|s| s.position <= fraction)
        .map(|s| GradientStop {
            color: s.color,
            position: if fraction > 0.0 {
                (s.position / fraction).clamp(0.0, 1.0)
            } else {
                0.0
            },
        })
        .collect();

    if stops.len() < 2 {
        stops.push(GradientStop {
            color: BRAND_GRADIENT[1].color,
            position: 1.0,
        });
    }
    stops
}
