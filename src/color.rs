use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Renderer-neutral colour
// ---------------------------------------------------------------------------

/// An sRGB colour with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    fn to_linear(self) -> LinSrgb {
        Srgb::new(self.r, self.g, self.b)
            .into_format::<f32>()
            .into_linear()
    }

    fn from_linear(lin: LinSrgb) -> Self {
        let srgb: Srgb = lin.into_color();
        let srgb: Srgb<u8> = srgb.into_format();
        Rgb::new(srgb.red, srgb.green, srgb.blue)
    }
}

/// Named colours used by the dashboard charts.
pub mod named {
    use super::Rgb;

    pub const CRIMSON: Rgb = Rgb::new(220, 20, 60);
    pub const ORANGE: Rgb = Rgb::new(255, 165, 0);
    pub const GREEN: Rgb = Rgb::new(0, 128, 0);
    pub const PURPLE: Rgb = Rgb::new(128, 0, 128);
    pub const DARK_GRAY: Rgb = Rgb::new(169, 169, 169);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    /// Page background (`#0e1726`).
    pub const NAVY: Rgb = Rgb::new(0x0e, 0x17, 0x26);
}

// ---------------------------------------------------------------------------
// Categorical palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Rgb::new(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Sequential colour scales: numeric value → colour
// ---------------------------------------------------------------------------

/// Continuous colour scales for value-encoded charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColorScale {
    /// White through red to dark red.
    Reds,
}

const REDS: [(f32, Rgb); 9] = [
    (0.0, Rgb::new(255, 245, 240)),
    (0.125, Rgb::new(254, 224, 210)),
    (0.25, Rgb::new(252, 187, 161)),
    (0.375, Rgb::new(252, 146, 114)),
    (0.5, Rgb::new(251, 106, 74)),
    (0.625, Rgb::new(239, 59, 44)),
    (0.75, Rgb::new(203, 24, 29)),
    (0.875, Rgb::new(165, 15, 21)),
    (1.0, Rgb::new(103, 0, 13)),
];

impl ColorScale {
    fn stops(self) -> &'static [(f32, Rgb)] {
        match self {
            ColorScale::Reds => &REDS,
        }
    }

    /// Colour at position `t` in `[0, 1]` (clamped), interpolated in
    /// linear RGB between the two neighbouring stops.
    pub fn sample(self, t: f64) -> Rgb {
        let stops = self.stops();
        let t = if t.is_finite() { t.clamp(0.0, 1.0) as f32 } else { 0.0 };
        for pair in stops.windows(2) {
            let (t0, c0) = pair[0];
            let (t1, c1) = pair[1];
            if t <= t1 {
                let local = if t1 > t0 { (t - t0) / (t1 - t0) } else { 0.0 };
                return Rgb::from_linear(c0.to_linear().mix(c1.to_linear(), local));
            }
        }
        stops[stops.len() - 1].1
    }

    /// Colour for `value` normalised against `[min, max]`.  A degenerate
    /// range maps everything to the top of the scale.
    pub fn color_for(self, value: f64, min: f64, max: f64) -> Rgb {
        let span = max - min;
        if span.abs() < f64::EPSILON {
            return self.sample(1.0);
        }
        self.sample((value - min) / span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_colors() {
        let colors = generate_palette(6);
        assert_eq!(colors.len(), 6);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn reds_scale_hits_its_end_stops() {
        assert_eq!(ColorScale::Reds.sample(0.0), Rgb::new(255, 245, 240));
        assert_eq!(ColorScale::Reds.sample(1.0), Rgb::new(103, 0, 13));
        assert_eq!(ColorScale::Reds.sample(7.0), Rgb::new(103, 0, 13));
        assert_eq!(ColorScale::Reds.sample(f64::NAN), Rgb::new(255, 245, 240));
    }

    #[test]
    fn reds_scale_darkens_monotonically() {
        let luminance = |c: Rgb| c.r as u32 + c.g as u32 + c.b as u32;
        let samples: Vec<u32> = (0..=20)
            .map(|i| luminance(ColorScale::Reds.sample(i as f64 / 20.0)))
            .collect();
        assert!(samples.windows(2).all(|w| w[0] >= w[1]), "{samples:?}");
    }

    #[test]
    fn degenerate_range_uses_top_color() {
        assert_eq!(
            ColorScale::Reds.color_for(5.0, 5.0, 5.0),
            ColorScale::Reds.sample(1.0)
        );
    }
}
