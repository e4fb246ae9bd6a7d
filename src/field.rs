//! The drifting, loosely linked point field

use glam::Vec2;
use rand::Rng;

use crate::{
    particle::{generate_particles, Particle},
    surface::{Color, Surface, LINK_COLOR, PALETTE},
};

#[derive(Clone, Debug)]
pub struct FieldConfig {
    pub count: usize,
    /// Each velocity component is drawn from `[-max_speed, max_speed]`
    pub max_speed: f32,
    pub radius: (f32, f32),
    pub opacity: (f32, f32),
    pub palette: [Color; 3],

    /// Pairs closer than this are linked
    pub link_distance: f32,
    /// Alpha of a link between coincident particles
    pub link_alpha: f32,
    pub link_width: f32,
    pub link_color: Color,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: 80,
            max_speed: 0.25,
            radius: (1.0, 3.0),
            opacity: (0.2, 0.7),
            palette: PALETTE,

            link_distance: 100.0,
            link_alpha: 0.2,
            link_width: 0.5,
            link_color: LINK_COLOR,
        }
    }
}

impl FieldConfig {
    /// Alpha of a link between two particles `distance` apart, `None` when they are too far
    /// apart to be linked.
    pub fn link_alpha(&self, distance: f32) -> Option<f32> {
        if distance < 0.0 || distance >= self.link_distance {
            return None;
        }

        Some((1.0 - distance / self.link_distance) * self.link_alpha)
    }
}

pub struct ParticleField {
    config: FieldConfig,
    particles: Vec<Particle>,
    bounds: Vec2,
}

impl ParticleField {
    pub fn initialize<R: Rng + ?Sized>(
        rng: &mut R,
        width: u32,
        height: u32,
        config: FieldConfig,
    ) -> Self {
        let bounds = Vec2::new(width as f32, height as f32);
        let particles = generate_particles(rng, bounds, &config);

        Self {
            config,
            particles,
            bounds,
        }
    }

    /// Builds a field from an existing particle set, used to replay fixed scenes.
    pub fn from_particles(
        particles: Vec<Particle>,
        width: u32,
        height: u32,
        config: FieldConfig,
    ) -> Self {
        Self {
            config,
            particles,
            bounds: Vec2::new(width as f32, height as f32),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn advance(&mut self) {
        let bounds = self.bounds;
        for particle in &mut self.particles {
            particle.advance(bounds);
        }
    }

    /// Every linked pair as `(i, j, alpha)` with `i < j`, in lexicographic order.
    ///
    /// This is a plain pass over all pairs, fine for the few dozen particles the field
    /// is meant for.
    pub fn links(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        let particles = &self.particles;
        (0..particles.len()).flat_map(move |i| {
            (i + 1..particles.len()).filter_map(move |j| {
                let distance = particles[i].position.distance(particles[j].position);
                self.config.link_alpha(distance).map(|alpha| (i, j, alpha))
            })
        })
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear();

        for particle in &self.particles {
            surface.fill_circle(
                particle.position,
                particle.radius,
                particle.color,
                particle.opacity,
            );
        }

        for (i, j, alpha) in self.links() {
            surface.stroke_line(
                self.particles[i].position,
                self.particles[j].position,
                self.config.link_width,
                self.config.link_color,
                alpha,
            );
        }
    }

    /// Resynchronizes the surface and the wraparound bounds to a new size.
    ///
    /// Positions are kept as they are, anything now outside the bounds is wrapped back in on
    /// the next [`advance`](Self::advance).
    pub fn on_surface_resize<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        width: u32,
        height: u32,
    ) {
        surface.resize(width, height);
        self.bounds = Vec2::new(width as f32, height as f32);
    }
}
