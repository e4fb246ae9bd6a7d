//! A drifting field of particles linked to their close neighbours, drawn onto any
//! [`Surface`](surface::Surface) one frame at a time.

pub mod animator;
pub mod cli;
pub mod error;
pub mod field;
pub mod framepace;
pub mod particle;
pub mod raster;
pub mod surface;

#[cfg(feature = "capture")]
pub mod capture;
