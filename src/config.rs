// Tunable constants for the particle field. Defaults reproduce the cursor trail
// as shipped; tests build custom configs to isolate single behaviors.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConfig {
    // Global hue advance per tick, in degrees
    pub hue_step: f64,
    // Opacity lost per tick
    pub fade_step: f64,
    // Drift angle advance per tick, in radians
    pub spin_step: f64,
    // Radius of the circular drift added to each particle's velocity
    pub drift_radius: f64,
    // Particles are dropped once their opacity falls below this
    pub fade_out_below: f64,
    pub trail_len: usize,
    pub min_batch: usize,
    pub max_batch: usize,
    // Extra particles per unit of pointer speed
    pub batch_per_speed: f64,
    pub glow_above: f64,
    pub hue_per_speed: f64,
    pub saturation: f64,
    pub lightness: f64,
    pub star_spikes: usize,
    pub star_inner_ratio: f64,
    // Shadow blur applied to glowing particles, as a multiple of their size
    pub glow_blur: f64,
    pub pointer_speed_scale: f64,
    pub min_pointer_interval_ms: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            hue_step: 0.5,
            fade_step: 0.02,
            spin_step: 0.02,
            drift_radius: 2.0,
            fade_out_below: 0.05,
            trail_len: 5,
            min_batch: 5,
            max_batch: 15,
            batch_per_speed: 3.0,
            glow_above: 2.0,
            hue_per_speed: 10.0,
            saturation: 70.0,
            lightness: 50.0,
            star_spikes: 5,
            star_inner_ratio: 0.5,
            glow_blur: 4.0,
            pointer_speed_scale: 10.0,
            min_pointer_interval_ms: 1.0,
        }
    }
}
