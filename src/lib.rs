mod utils;

extern crate nalgebra_glm as glm;

pub mod color;
pub mod config;
pub mod converter;
pub mod field;
pub mod geometry;
mod logging;
pub mod overlay;
pub mod particle;
pub mod pointer;
pub mod surface;

use std::str::FromStr;

use log::LevelFilter;
use wasm_bindgen::prelude::*;

pub use config::FieldConfig;
pub use converter::FileConverter;
pub use field::ParticleField;
pub use overlay::CursorParticles;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    logging::init(LevelFilter::Info);
}

// Accepts "off", "error", "warn", "info", "debug" or "trace"
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = LevelFilter::from_str(level)
        .map_err(|_| JsValue::from_str(&format!("unknown log level: {}", level)))?;
    logging::set_level(filter);
    Ok(())
}

// Lays the particle overlay over the page and starts animating it. Keep the returned
// handle alive for as long as the overlay should run.
#[wasm_bindgen]
pub fn init_particle_system() -> Result<CursorParticles, JsValue> {
    let particles = CursorParticles::new()?;
    particles.start()?;
    Ok(particles)
}

#[wasm_bindgen]
pub fn init_file_converter() -> Result<FileConverter, JsValue> {
    FileConverter::new()
}
