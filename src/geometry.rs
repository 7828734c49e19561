// Star outline used for star-shaped particles. Vertices are relative to the star's
// center; the caller translates and rotates the drawing surface first.

use glm::DVec2;

/// Returns `2 * spikes` vertices alternating between the outer radius `size` and the inner
/// radius `size * inner_ratio`, starting straight down from the center (canvas y grows
/// downward) and walking clockwise on screen.
pub fn star_vertices(size: f64, spikes: usize, inner_ratio: f64) -> Vec<DVec2> {
    let step = glm::two_pi::<f64>() / spikes as f64;
    let outer = glm::vec2(size, 0.0);
    let inner = glm::vec2(size * inner_ratio, 0.0);

    let mut vertices = Vec::with_capacity(spikes * 2);
    for i in 0..spikes {
        let angle = glm::half_pi::<f64>() + i as f64 * step;
        vertices.push(glm::rotate_vec2(&outer, angle));
        vertices.push(glm::rotate_vec2(&inner, angle + step / 2.0));
    }
    vertices
}
