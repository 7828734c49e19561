// Simple color struct in the hue/saturation/lightness model, formatted as a CSS hsla() string
// for the canvas fill style

use std::fmt;

use crate::config::FieldConfig;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hsla {
    // Degrees, not wrapped; CSS takes care of values past 360
    pub h: f64,
    // Percent
    pub s: f64,
    // Percent
    pub l: f64,
    pub a: f64,
}

impl Hsla {
    pub fn new(h: f64, s: f64, l: f64, a: f64) -> Hsla {
        Hsla { h, s, l, a }
    }

    // Faster particles are shifted further around the color wheel
    pub fn for_particle(hue: f64, speed: f64, opacity: f64, config: &FieldConfig) -> Hsla {
        Hsla {
            h: hue + speed * config.hue_per_speed,
            s: config.saturation,
            l: config.lightness,
            a: opacity,
        }
    }

    pub fn with_alpha(self, a: f64) -> Hsla {
        Hsla { a, ..self }
    }
}

impl fmt::Display for Hsla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsla({}, {}%, {}%, {})", self.h, self.s, self.l, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_as_css_hsla() {
        let color = Hsla::new(120.5, 70.0, 50.0, 0.25);
        assert_eq!(color.to_string(), "hsla(120.5, 70%, 50%, 0.25)");
    }

    #[test]
    fn particle_hue_shifts_with_speed() {
        let config = FieldConfig::default();
        let color = Hsla::for_particle(30.0, 2.0, 0.8, &config);
        assert_eq!(color.h, 50.0);
        assert_eq!(color.s, 70.0);
        assert_eq!(color.l, 50.0);
        assert_eq!(color.a, 0.8);
        assert_eq!(color.with_alpha(0.1).a, 0.1);
        assert_eq!(color.with_alpha(0.1).h, 50.0);
    }
}
