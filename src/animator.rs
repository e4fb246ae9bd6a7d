//! The frame loop: advance, render, repeat.

use log::debug;

use crate::{field::ParticleField, framepace::TickSource, surface::Surface};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameBudget {
    Frames(u64),
    /// Keep going until the process goes away
    Unbounded,
}

impl From<Option<u64>> for FrameBudget {
    fn from(frames: Option<u64>) -> Self {
        frames.map_or(Self::Unbounded, Self::Frames)
    }
}

impl FrameBudget {
    fn allows(&self, frame: u64) -> bool {
        match self {
            Self::Frames(n) => frame < *n,
            Self::Unbounded => true,
        }
    }
}

pub struct Animator {
    pub field: ParticleField,
    frame: u64,
    /// Log loop statistics every this many frames, `0` disables
    pub log_every: u64,
}

impl Animator {
    pub fn new(field: ParticleField) -> Self {
        Self {
            field,
            frame: 0,
            log_every: 0,
        }
    }

    /// Frames completed so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// One frame: move every particle once, then redraw the surface.
    pub fn step<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.field.advance();
        self.field.render(surface);
        self.frame += 1;
    }

    /// Runs frames off `ticks` until `budget` is spent.
    ///
    /// `hook` sees the animator and the freshly rendered surface after every frame. An error
    /// from it stops the loop and is handed back.
    pub fn run<S, T, F, E>(
        &mut self,
        surface: &mut S,
        ticks: &mut T,
        budget: FrameBudget,
        mut hook: F,
    ) -> Result<u64, E>
    where
        S: Surface + ?Sized,
        T: TickSource + ?Sized,
        F: FnMut(&mut Self, &mut S) -> Result<(), E>,
    {
        let mut ran = 0;
        while budget.allows(ran) {
            ticks.begin_frame();
            self.step(surface);
            hook(self, surface)?;

            if self.log_every != 0 && self.frame % self.log_every == 0 {
                debug!("frame {} ({:.1} fps)", self.frame, ticks.framerate());
            }

            ticks.end_frame();
            ran += 1;
        }

        Ok(ran)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{
        field::FieldConfig,
        framepace::Unpaced,
        particle::Particle,
        surface::{recording::RecordingSurface, PALETTE},
    };

    fn animator() -> Animator {
        let mut rng = StdRng::seed_from_u64(1);
        Animator::new(ParticleField::initialize(
            &mut rng,
            200,
            200,
            FieldConfig::default(),
        ))
    }

    #[test]
    fn budget_from_option() {
        assert_eq!(FrameBudget::from(Some(4)), FrameBudget::Frames(4));
        assert_eq!(FrameBudget::from(None), FrameBudget::Unbounded);
    }

    #[test]
    fn runs_exactly_the_budget() {
        let mut animator = animator();
        let mut surface = RecordingSurface::new(200, 200);
        let mut ticks = Unpaced::default();

        let ran = animator
            .run(&mut surface, &mut ticks, FrameBudget::Frames(25), |_, _| {
                Ok::<_, ()>(())
            })
            .unwrap();

        assert_eq!(ran, 25);
        assert_eq!(ticks.frames, 25);
        assert_eq!(animator.frame(), 25);
        assert_eq!(surface.circles(), 80);
    }

    #[test]
    fn zero_budget_does_nothing() {
        let mut animator = animator();
        let before = animator.field.particles().to_vec();
        let mut surface = RecordingSurface::new(200, 200);

        let ran = animator
            .run(
                &mut surface,
                &mut Unpaced::default(),
                FrameBudget::Frames(0),
                |_, _| Ok::<_, ()>(()),
            )
            .unwrap();

        assert_eq!(ran, 0);
        assert_eq!(animator.field.particles(), &before[..]);
        assert!(surface.commands.is_empty());
    }

    #[test]
    fn hook_error_stops_unbounded_loop() {
        let mut animator = animator();
        let mut surface = RecordingSurface::new(200, 200);

        let result = animator.run(
            &mut surface,
            &mut Unpaced::default(),
            FrameBudget::Unbounded,
            |animator, _| {
                if animator.frame() == 10 {
                    Err("done")
                } else {
                    Ok(())
                }
            },
        );

        assert_eq!(result, Err("done"));
        assert_eq!(animator.frame(), 10);
    }

    #[test]
    fn step_advances_then_renders() {
        let particle = Particle {
            position: Vec2::new(199.0, 20.0),
            velocity: Vec2::new(5.0, 0.0),
            radius: 1.0,
            opacity: 0.2,
            color: PALETTE[2],
        };
        let mut animator = Animator::new(ParticleField::from_particles(
            vec![particle],
            200,
            200,
            FieldConfig::default(),
        ));
        let mut surface = RecordingSurface::new(200, 200);

        animator.step(&mut surface);

        assert_eq!(animator.field.particles()[0].position, Vec2::new(4.0, 20.0));
        assert!(matches!(
            surface.commands[1],
            crate::surface::recording::DrawCommand::Circle { center, .. }
                if center == Vec2::new(4.0, 20.0)
        ));
    }

    #[test]
    fn hook_can_resize_mid_run() {
        let mut animator = animator();
        let mut surface = RecordingSurface::new(200, 200);

        animator
            .run(
                &mut surface,
                &mut Unpaced::default(),
                FrameBudget::Frames(20),
                |animator, surface| {
                    if animator.frame() == 10 {
                        animator.field.on_surface_resize(surface, 50, 40);
                    }
                    Ok::<_, ()>(())
                },
            )
            .unwrap();

        assert_eq!(surface.size(), (50, 40));
        for p in animator.field.particles() {
            assert!(p.position.x < 50.0 && p.position.y < 40.0);
        }
    }
}
