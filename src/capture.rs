//! Capture the rendered frames to generate a video file

use log::info;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{
    error::{Error, Result},
    raster::PixelSurface,
    surface::Surface,
};

/// Appends raw RGBA8 frames, row-major and without any header, to a single file.
///
/// The result can be fed to e.g. `ffmpeg -f rawvideo -pixel_format rgba -video_size WxH`.
pub struct CaptureModule {
    path: PathBuf,
    width: u32,
    height: u32,
    frames: u64,

    buffer_file: BufWriter<File>,
}

impl CaptureModule {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Result<Self> {
        let path = path.into();
        let file = File::create(&path)?;

        info!(
            "Capture info: {{ path: {}, width: {}, height: {}, format: rgba8 }}",
            path.display(),
            width,
            height
        );

        Ok(Self {
            path,
            width,
            height,
            frames: 0,

            buffer_file: BufWriter::new(file),
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;

        info!(
            "Capture resized: {{ width: {}, height: {}, from frame: {} }}",
            width, height, self.frames
        );
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn write_frame(&mut self, surface: &PixelSurface) -> Result<()> {
        let actual = surface.size();
        if actual != (self.width, self.height) {
            return Err(Error::FrameSize {
                expected: (self.width, self.height),
                actual,
            });
        }

        self.buffer_file.write_all(surface.as_bytes())?;
        self.frames += 1;
        Ok(())
    }

    pub fn finish(mut self) -> Result<u64> {
        self.buffer_file.flush()?;
        info!("Captured {} frames to {}", self.frames, self.path.display());
        Ok(self.frames)
    }
}

/// Writes the surface out as an RGBA PNG
pub fn save_png(surface: &PixelSurface, path: impl AsRef<Path>) -> Result<()> {
    let (width, height) = surface.size();
    image::save_buffer(
        path.as_ref(),
        surface.as_bytes(),
        width,
        height,
        image::ColorType::Rgba8,
    )?;

    info!("Saved snapshot to {}", path.as_ref().display());
    Ok(())
}
