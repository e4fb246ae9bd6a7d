use anyhow::Context;
use clap::Parser;
use log::{info, warn};
use rand::{rngs::StdRng, SeedableRng};

use particle_field::{
    animator::{Animator, FrameBudget},
    cli,
    field::{FieldConfig, ParticleField},
    framepace::{Framepacer, TickSource},
    raster::PixelSurface,
};

#[cfg(feature = "capture")]
use particle_field::capture;

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // Collect Arguments
    let args = cli::Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    info!(
        "Particle field: {{ particles: {}, size: {}x{}, framerate: {}, seed: {} }}",
        args.particles, args.width, args.height, args.framerate, seed
    );

    let config = FieldConfig {
        count: args.particles,
        ..FieldConfig::default()
    };
    let field = ParticleField::initialize(&mut rng, args.width, args.height, config);

    let mut surface = PixelSurface::new(args.width, args.height);
    let mut animator = Animator::new(field);
    animator.log_every = u64::from(if args.framerate == 0 { 60 } else { args.framerate });

    let mut pacer = Framepacer::new(args.framerate);
    let budget = FrameBudget::from(args.frames);

    let resize_at = args.resize_at();
    match (args.resize, args.frames) {
        (Some(_), None) => warn!("`--resize` needs a frame budget, ignoring it"),
        (Some(_), Some(0)) => warn!("`--resize` has no frames to apply to, ignoring it"),
        (Some(_), Some(1)) => warn!("`--resize` will only apply after the single frame"),
        _ => (),
    }

    #[cfg(feature = "capture")]
    let mut capture = args
        .capture
        .as_ref()
        .map(|path| capture::CaptureModule::new(path, args.width, args.height))
        .transpose()
        .context("Failed to open capture file")?;

    #[cfg(not(feature = "capture"))]
    if args.capture.is_some() || args.snapshot.is_some() {
        warn!("Built without the `capture` feature, ignoring `--capture` and `--snapshot`");
    }

    let ran = animator.run(
        &mut surface,
        &mut pacer,
        budget,
        |animator, surface| -> anyhow::Result<()> {
            #[cfg(feature = "capture")]
            if let Some(capture) = capture.as_mut() {
                capture
                    .write_frame(surface)
                    .with_context(|| format!("Failed to capture frame {}", animator.frame()))?;
            }

            if let Some((at, (width, height))) = resize_at {
                if animator.frame() == at {
                    info!("Resizing surface to {}x{}", width, height);
                    animator.field.on_surface_resize(surface, width, height);

                    #[cfg(feature = "capture")]
                    if let Some(capture) = capture.as_mut() {
                        capture.resize(width, height);
                    }
                }
            }

            Ok(())
        },
    )?;

    info!("Finished after {} frames ({:.1} fps)", ran, pacer.framerate());

    #[cfg(feature = "capture")]
    {
        if let Some(capture) = capture {
            capture.finish().context("Failed to flush capture file")?;
        }

        if let Some(path) = &args.snapshot {
            capture::save_png(&surface, path).context("Failed to save snapshot")?;
        }
    }

    Ok(())
}
