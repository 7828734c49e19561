// The particle field owns the live particles and the global hue, advances them once per
// display refresh and draws them onto any 2D surface.

use rand::Rng;
use wasm_bindgen::JsValue;

use crate::color::Hsla;
use crate::config::FieldConfig;
use crate::geometry;
use crate::particle::{Particle, Shape};
use crate::surface::Surface;
#[cfg(feature = "frame-timing")]
use crate::utils::Timer;

// Number of particles a pointer move at `speed` produces. Negative or NaN speeds
// fall back to the smallest batch.
pub fn batch_size(speed: f64, config: &FieldConfig) -> usize {
    let extra = (speed * config.batch_per_speed).floor();
    if !(extra > 0.0) {
        return config.min_batch;
    }
    let wanted = config.min_batch as f64 + extra;
    if wanted >= config.max_batch as f64 {
        config.max_batch
    } else {
        wanted as usize
    }
}

pub struct ParticleField {
    width: u32,
    height: u32,
    hue: f64,
    particles: Vec<Particle>,
    config: FieldConfig,
}

impl ParticleField {
    pub fn new(width: u32, height: u32) -> ParticleField {
        ParticleField::with_config(width, height, FieldConfig::default())
    }

    pub fn with_config(width: u32, height: u32, config: FieldConfig) -> ParticleField {
        ParticleField {
            width,
            height,
            hue: 0.0,
            particles: Vec::new(),
            config,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    // Particles keep their absolute coordinates; only the cleared area changes
    pub fn resize(&mut self, width: u32, height: u32) {
        log::debug!("particle field resized to {}x{}", width, height);
        self.width = width;
        self.height = height;
    }

    pub fn spawn(&mut self, x: f64, y: f64, speed: f64) -> usize {
        let mut rng = rand::thread_rng();
        self.spawn_with(&mut rng, x, y, speed)
    }

    pub fn spawn_with<R: Rng + ?Sized>(&mut self, rng: &mut R, x: f64, y: f64, speed: f64) -> usize {
        let count = batch_size(speed, &self.config);
        let glow = speed > self.config.glow_above;
        self.particles.reserve(count);
        for _ in 0..count {
            let mut particle = Particle::random(rng, [x, y], &self.config);
            particle.glow = glow;
            self.particles.push(particle);
        }
        count
    }

    pub fn advance(&mut self) {
        #[cfg(feature = "frame-timing")]
        let _timer = Timer::new("ParticleField::advance");
        self.hue += self.config.hue_step;
        let config = self.config;
        for particle in &mut self.particles {
            particle.step(&config);
        }
        self.particles.retain(|p| !p.is_faded(&config));
    }

    pub fn render<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<(), JsValue> {
        #[cfg(feature = "frame-timing")]
        let _timer = Timer::new("ParticleField::render");
        surface.clear_rect(0.0, 0.0, self.width as f64, self.height as f64);

        let hue = self.hue;
        let config = self.config;
        for particle in &mut self.particles {
            let color = Hsla::for_particle(hue, particle.speed(), particle.opacity, &config);
            draw_trail(surface, particle, color, &config)?;
            particle.trail.record(particle.pos, config.trail_len);

            let css = color.to_string();
            if particle.glow {
                surface.set_shadow(particle.size * config.glow_blur, &css);
            }
            surface.set_fill_style(&css);
            match particle.shape {
                Shape::Circle => {
                    surface.begin_path();
                    surface.circle(particle.pos[0], particle.pos[1], particle.size)?;
                    surface.fill();
                }
                Shape::Star => draw_star(surface, particle, hue, &config)?,
            }
            if particle.glow {
                surface.set_shadow(0.0, "transparent");
            }
        }
        Ok(())
    }

    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<(), JsValue> {
        self.advance();
        self.render(surface)
    }
}

// Older trail points are drawn smaller and fainter than recent ones
fn draw_trail<S: Surface + ?Sized>(
    surface: &mut S,
    particle: &Particle,
    color: Hsla,
    config: &FieldConfig,
) -> Result<(), JsValue> {
    let newest = particle.trail.len().saturating_sub(1);
    for (i, pos) in particle.trail.iter().enumerate() {
        let age = (newest - i) as f64;
        let alpha = 0.2 * i as f64 / config.trail_len as f64;
        surface.begin_path();
        surface.set_fill_style(&color.with_alpha(alpha).to_string());
        surface.circle(pos[0], pos[1], particle.size * (0.8 - age / 10.0))?;
        surface.fill();
    }
    Ok(())
}

// The star spins with the global hue, read as degrees
fn draw_star<S: Surface + ?Sized>(
    surface: &mut S,
    particle: &Particle,
    hue: f64,
    config: &FieldConfig,
) -> Result<(), JsValue> {
    let vertices = geometry::star_vertices(particle.size, config.star_spikes, config.star_inner_ratio);
    surface.save();
    surface.translate(particle.pos[0], particle.pos[1])?;
    surface.rotate(hue.to_radians())?;
    surface.begin_path();
    for (i, v) in vertices.iter().enumerate() {
        if i == 0 {
            surface.move_to(v.x, v.y);
        } else {
            surface.line_to(v.x, v.y);
        }
    }
    surface.close_path();
    surface.fill();
    surface.restore();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::recording::{Op, RecordingSurface};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn batch_size_scales_with_speed() {
        let config = FieldConfig::default();
        let counts: Vec<usize> = [0.0, 1.0, 2.0, 5.0, 100.0]
            .iter()
            .map(|&s| batch_size(s, &config))
            .collect();
        assert_eq!(counts, vec![5, 8, 11, 15, 15]);
    }

    #[test]
    fn batch_size_clamps_bad_speeds() {
        let config = FieldConfig::default();
        assert_eq!(batch_size(-4.0, &config), 5);
        assert_eq!(batch_size(std::f64::NAN, &config), 5);
        assert_eq!(batch_size(std::f64::INFINITY, &config), 15);
        assert_eq!(batch_size(0.3, &config), 5);
        assert_eq!(batch_size(0.34, &config), 6);
    }

    #[test]
    fn spawn_adds_a_batch_at_the_pointer() {
        let mut field = ParticleField::new(800, 600);
        let mut rng = seeded();
        assert_eq!(field.spawn_with(&mut rng, 12.0, 34.0, 1.0), 8);
        assert_eq!(field.len(), 8);
        assert!(field.particles().iter().all(|p| p.pos == [12.0, 34.0]));
        assert!(field.particles().iter().all(|p| !p.glow));

        field.spawn_with(&mut rng, 0.0, 0.0, 2.5);
        assert_eq!(field.len(), 8 + 12);
        assert!(field.particles()[8..].iter().all(|p| p.glow));
    }

    #[test]
    fn advance_on_empty_field_still_moves_hue() {
        let mut field = ParticleField::new(10, 10);
        field.advance();
        field.advance();
        assert!(field.is_empty());
        assert_eq!(field.hue(), 1.0);
    }

    #[test]
    fn particles_expire_after_fading() {
        let mut field = ParticleField::new(800, 600);
        let mut rng = seeded();
        field.spawn_with(&mut rng, 100.0, 100.0, 0.0);
        field.spawn_with(&mut rng, 200.0, 100.0, 0.0);
        assert_eq!(field.len(), 10);

        for tick in 1..=50 {
            field.advance();
            if tick < 48 {
                assert_eq!(field.len(), 10, "tick {}", tick);
                let expected = 1.0 - 0.02 * tick as f64;
                for p in field.particles() {
                    assert!((p.opacity - expected).abs() < 1e-9);
                }
            }
        }
        assert!(field.is_empty());
    }

    #[test]
    fn expiry_keeps_younger_particles() {
        let mut field = ParticleField::new(800, 600);
        let mut rng = seeded();
        field.spawn_with(&mut rng, 0.0, 0.0, 0.0);
        for _ in 0..30 {
            field.advance();
        }
        field.spawn_with(&mut rng, 0.0, 0.0, 1.0);
        for _ in 0..18 {
            field.advance();
        }
        assert_eq!(field.len(), 8);
        assert!(field.particles().iter().all(|p| p.opacity > 0.6));
    }

    #[test]
    fn resize_keeps_particle_positions() {
        let mut field = ParticleField::new(800, 600);
        let mut rng = seeded();
        field.spawn_with(&mut rng, 700.0, 500.0, 0.0);
        field.resize(320, 240);
        assert_eq!((field.width(), field.height()), (320, 240));
        assert!(field.particles().iter().all(|p| p.pos == [700.0, 500.0]));

        let mut surface = RecordingSurface::default();
        field.render(&mut surface).unwrap();
        assert_eq!(surface.ops[0], Op::Clear(0.0, 0.0, 320.0, 240.0));
    }

    #[test]
    fn trail_never_exceeds_its_cap_after_render() {
        let mut field = ParticleField::new(800, 600);
        let mut rng = seeded();
        field.spawn_with(&mut rng, 50.0, 50.0, 0.0);
        let mut surface = RecordingSurface::default();
        for _ in 0..20 {
            field.tick(&mut surface).unwrap();
            for p in field.particles() {
                assert!(p.trail.len() <= 5);
            }
        }
        assert!(field.particles().iter().all(|p| p.trail.len() == 5));
    }

    #[test]
    fn trail_points_shrink_and_fade_with_age() {
        let mut config = FieldConfig::default();
        config.drift_radius = 0.0;
        let mut field = ParticleField::with_config(100, 100, config);
        field.particles.push(Particle::new([0.0, 0.0], [1.0, 0.0], 0.0, 10.0, Shape::Circle));
        let mut surface = RecordingSurface::default();
        for _ in 0..5 {
            field.tick(&mut surface).unwrap();
        }

        let mut surface = RecordingSurface::default();
        field.render(&mut surface).unwrap();
        let circles = surface.circles();
        // five trail points, then the body
        assert_eq!(circles.len(), 6);
        let radii: Vec<f64> = circles[..5].iter().map(|c| c.2).collect();
        for pair in radii.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert!((radii[4] - 8.0).abs() < 1e-9);
        assert!((radii[0] - 4.0).abs() < 1e-9);
        assert_eq!(circles[5], (5.0, 0.0, 10.0));
    }

    #[test]
    fn star_is_a_closed_ten_vertex_path() {
        let mut field = ParticleField::new(100, 100);
        field.particles.push(Particle::new([30.0, 40.0], [0.0, 0.0], 0.0, 10.0, Shape::Star));
        field.hue = 90.0;
        let mut surface = RecordingSurface::default();
        field.render(&mut surface).unwrap();

        let moves = surface.ops.iter().filter(|op| matches!(op, Op::MoveTo(..))).count();
        let lines = surface.ops.iter().filter(|op| matches!(op, Op::LineTo(..))).count();
        assert_eq!(moves + lines, 10);
        assert_eq!(surface.count(&Op::ClosePath), 1);
        assert_eq!(surface.count(&Op::Save), 1);
        assert_eq!(surface.count(&Op::Restore), 1);
        assert!(surface.ops.contains(&Op::Translate(30.0, 40.0)));
        let rotation = surface.ops.iter().find_map(|op| match *op {
            Op::Rotate(r) => Some(r),
            _ => None,
        });
        assert!((rotation.unwrap() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!(surface.circles().is_empty());
    }

    #[test]
    fn body_uses_hue_shifted_by_speed() {
        let mut field = ParticleField::new(100, 100);
        field.particles.push(Particle::new([1.0, 1.0], [3.0, 4.0], 0.0, 2.0, Shape::Circle));
        field.hue = 10.0;
        let mut surface = RecordingSurface::default();
        field.render(&mut surface).unwrap();
        assert!(surface.ops.contains(&Op::FillStyle("hsla(60, 70%, 50%, 1)".to_owned())));
    }

    #[test]
    fn glowing_particles_toggle_the_shadow() {
        let mut field = ParticleField::new(100, 100);
        let mut rng = seeded();
        field.spawn_with(&mut rng, 10.0, 10.0, 3.0);
        let mut surface = RecordingSurface::default();
        field.render(&mut surface).unwrap();
        let shadows = surface.ops.iter().filter(|op| matches!(op, Op::Shadow(..))).count();
        assert_eq!(shadows, field.len() * 2);
        assert_eq!(surface.ops.last(), Some(&Op::Shadow(0.0, "transparent".to_owned())));
    }
}
