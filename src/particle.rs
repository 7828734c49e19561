// Particle struct to keep track of position, velocity, fade and the short trail
// of positions it leaves behind

use std::collections::VecDeque;

use rand::Rng;
use vecmath::{vec2_add, vec2_len, vec2_scale, Vector2};

use crate::config::FieldConfig;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    Circle,
    Star,
}

// Bounded history of recent positions, oldest first
#[derive(Clone, Debug, Default)]
pub struct Trail {
    points: VecDeque<Vector2<f64>>,
}

impl Trail {
    pub fn with_capacity(capacity: usize) -> Trail {
        Trail {
            points: VecDeque::with_capacity(capacity + 1),
        }
    }

    pub fn record(&mut self, pos: Vector2<f64>, capacity: usize) {
        self.points.push_back(pos);
        while self.points.len() > capacity {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vector2<f64>> {
        self.points.iter()
    }
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    // Drives the circular drift, in radians
    pub angle: f64,
    pub size: f64,
    pub opacity: f64,
    pub shape: Shape,
    pub glow: bool,
    pub trail: Trail,
}

impl Particle {
    pub fn new(pos: Vector2<f64>, vel: Vector2<f64>, angle: f64, size: f64, shape: Shape) -> Particle {
        Particle {
            pos,
            vel,
            angle,
            size,
            opacity: 1.0,
            shape,
            glow: false,
            trail: Trail::default(),
        }
    }

    /// Rolls a particle at `pos` with velocity components in [-1, 1), size in [1, 4),
    /// a random drift angle and an even chance of being a star.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, pos: Vector2<f64>, config: &FieldConfig) -> Particle {
        let vel_x = rng.gen::<f64>() * 2.0 - 1.0;
        let vel_y = rng.gen::<f64>() * 2.0 - 1.0;
        let size = rng.gen::<f64>() * 3.0 + 1.0;
        let angle = rng.gen::<f64>() * std::f64::consts::PI * 2.0;
        let shape = if rng.gen::<f64>() > 0.5 {
            Shape::Circle
        } else {
            Shape::Star
        };
        let mut particle = Particle::new(pos, [vel_x, vel_y], angle, size, shape);
        particle.trail = Trail::with_capacity(config.trail_len);
        particle
    }

    pub fn speed(&self) -> f64 {
        vec2_len(self.vel)
    }

    pub fn step(&mut self, config: &FieldConfig) {
        let drift = vec2_scale([self.angle.cos(), self.angle.sin()], config.drift_radius);
        self.pos = vec2_add(self.pos, vec2_add(self.vel, drift));
        self.opacity -= config.fade_step;
        self.angle += config.spin_step;
    }

    pub fn is_faded(&self, config: &FieldConfig) -> bool {
        self.opacity < config.fade_out_below
    }
}
