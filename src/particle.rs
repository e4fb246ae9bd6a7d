use glam::Vec2;
use rand::Rng;

use crate::{field::FieldConfig, surface::Color};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub opacity: f32,
    pub color: Color,
}

impl Particle {
    /// A particle placed uniformly inside `bounds`, with every other attribute drawn from the
    /// ranges in `config`. Inverted ranges and a negative `max_speed` are taken as their
    /// normalized counterparts.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, bounds: Vec2, config: &FieldConfig) -> Self {
        let position = Vec2::new(
            wrap(rng.gen::<f32>() * bounds.x, bounds.x),
            wrap(rng.gen::<f32>() * bounds.y, bounds.y),
        );
        let speed = config.max_speed.abs();
        let velocity = Vec2::new(sample(rng, -speed, speed), sample(rng, -speed, speed));

        Self {
            position,
            velocity,
            radius: sample(rng, config.radius.0, config.radius.1),
            opacity: sample(rng, config.opacity.0, config.opacity.1),
            color: config.palette[rng.gen_range(0..config.palette.len())],
        }
    }

    /// Moves the particle by its velocity and wraps it back into `[0, bounds)`.
    ///
    /// Velocity is never touched, crossing an edge only teleports the particle to the
    /// opposite one.
    pub fn advance(&mut self, bounds: Vec2) {
        let next = self.position + self.velocity;
        self.position = Vec2::new(wrap(next.x, bounds.x), wrap(next.y, bounds.y));
    }
}

pub fn generate_particles<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: Vec2,
    config: &FieldConfig,
) -> Vec<Particle> {
    (0..config.count)
        .map(|_| Particle::random(rng, bounds, config))
        .collect()
}

/// Uniform in `[a, b]`, whichever way round the bounds are given
fn sample<R: Rng + ?Sized>(rng: &mut R, a: f32, b: f32) -> f32 {
    rng.gen_range(a.min(b)..=a.max(b))
}

/// Wraps a single coordinate into `[0, bound)`.
///
/// Overshoot is carried over (`204` on a `200` bound becomes `4`). A degenerate bound pins
/// the coordinate to `0`.
pub fn wrap(value: f32, bound: f32) -> f32 {
    if bound <= 0.0 || !bound.is_finite() {
        return 0.0;
    }

    let wrapped = if value >= bound {
        value - bound
    } else if value < 0.0 {
        value + bound
    } else {
        return value;
    };

    // Still outside after one step, e.g. the surface shrank under the particle
    let wrapped = if (0.0..bound).contains(&wrapped) {
        wrapped
    } else {
        wrapped.rem_euclid(bound)
    };

    if wrapped >= bound {
        0.0
    } else {
        wrapped
    }
}
