//! CPU rasterizer used when there is no canvas to draw into

use glam::Vec2;

use crate::surface::{Color, Surface};

/// Page background, `#0a0a0a`
pub const BACKGROUND: Rgba = Rgba {
    r: 10,
    g: 10,
    b: 10,
    a: 255,
};

#[repr(C)]
#[derive(bytemuck::Pod, bytemuck::Zeroable, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Source-over compositing of `color` at `alpha` onto `self`, straight alpha
    fn blend(self, color: Color, alpha: f32) -> Self {
        let sa = alpha.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return self;
        }

        let da = self.a as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        let channel = |src: u8, dst: u8| {
            let c = (src as f32 * sa + dst as f32 * da * (1.0 - sa)) / out_a;
            c.round().clamp(0.0, 255.0) as u8
        };

        Self {
            r: channel(color.r, self.r),
            g: channel(color.g, self.g),
            b: channel(color.b, self.b),
            a: (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
        }
    }
}

pub struct PixelSurface {
    width: u32,
    height: u32,
    clear_color: Rgba,
    pixels: Vec<Rgba>,
}

impl PixelSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_clear_color(width, height, BACKGROUND)
    }

    pub fn with_clear_color(width: u32, height: u32, clear_color: Rgba) -> Self {
        Self {
            width,
            height,
            clear_color,
            pixels: vec![clear_color; width as usize * height as usize],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }

        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Row-major RGBA8 bytes
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Pixel index range `[min, max)` covering `[lo, hi]` on one axis, clipped to the surface.
    fn span(lo: f32, hi: f32, size: u32) -> (u32, u32) {
        let min = lo.floor().max(0.0);
        let max = (hi.ceil() + 1.0).min(size as f32);
        if min.is_nan() || max.is_nan() || min >= max {
            return (0, 0);
        }

        (min as u32, max as u32)
    }

    /// Blends every pixel in the clipped box whose center gets a non-zero `coverage`.
    fn paint<F>(&mut self, min: Vec2, max: Vec2, color: Color, alpha: f32, coverage: F)
    where
        F: Fn(Vec2) -> f32,
    {
        let (x0, x1) = Self::span(min.x, max.x, self.width);
        let (y0, y1) = Self::span(min.y, max.y, self.height);

        for y in y0..y1 {
            let row = y as usize * self.width as usize;
            for x in x0..x1 {
                let cover = coverage(Vec2::new(x as f32 + 0.5, y as f32 + 0.5)).clamp(0.0, 1.0);
                if cover > 0.0 {
                    let pixel = &mut self.pixels[row + x as usize];
                    *pixel = pixel.blend(color, alpha * cover);
                }
            }
        }
    }
}

impl Surface for PixelSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![self.clear_color; width as usize * height as usize];
    }

    fn clear(&mut self) {
        self.pixels.fill(self.clear_color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32) {
        if radius <= 0.0 || alpha <= 0.0 {
            return;
        }

        let extent = Vec2::splat(radius + 1.0);
        // Full coverage up to the radius, fading out over the next pixel
        self.paint(center - extent, center + extent, color, alpha, |p| {
            radius + 1.0 - p.distance(center)
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color, alpha: f32) {
        if width <= 0.0 || alpha <= 0.0 {
            return;
        }

        let half = width * 0.5;
        let extent = Vec2::splat(half + 1.0);
        let segment = to - from;
        let length_sq = segment.length_squared();

        self.paint(
            from.min(to) - extent,
            from.max(to) + extent,
            color,
            alpha,
            |p| {
                let t = if length_sq > 0.0 {
                    ((p - from).dot(segment) / length_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                half + 0.5 - p.distance(from + segment * t)
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::PALETTE;

    const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };

    #[test]
    fn new_surface_is_background() {
        let surface = PixelSurface::new(4, 3);
        assert_eq!(surface.as_bytes().len(), 4 * 3 * 4);
        assert_eq!(surface.pixel(3, 2), Some(BACKGROUND));
        assert_eq!(surface.pixel(4, 0), None);
    }

    #[test]
    fn opaque_circle_covers_its_center() {
        let mut surface = PixelSurface::with_clear_color(20, 20, Rgba::TRANSPARENT);
        surface.fill_circle(Vec2::new(10.0, 10.0), 3.0, PALETTE[0], 1.0);

        let c = surface.pixel(10, 10).unwrap();
        assert_eq!((c.r, c.g, c.b, c.a), (0x00, 0xd4, 0xff, 255));
        assert_eq!(surface.pixel(0, 0), Some(Rgba::TRANSPARENT));
        assert_eq!(surface.pixel(17, 10), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn unit_circle_fully_covers_pixels_within_radius() {
        let mut surface = PixelSurface::with_clear_color(20, 20, Rgba::TRANSPARENT);
        surface.fill_circle(Vec2::new(10.0, 10.0), 1.0, WHITE, 1.0);

        for (x, y) in [(9, 9), (10, 9), (9, 10), (10, 10)] {
            assert_eq!(surface.pixel(x, y).unwrap().a, 255);
        }

        // Center 1.58 away, inside the fade-out band
        let edge = surface.pixel(11, 10).unwrap().a;
        assert!(edge > 0 && edge < 255);
        assert_eq!(surface.pixel(12, 10), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn translucent_circle_blends_over_background() {
        let mut surface = PixelSurface::with_clear_color(
            8,
            8,
            Rgba {
                r: 0,
                g: 0,
                b: 0,
                a: 255,
            },
        );
        surface.fill_circle(Vec2::new(4.0, 4.0), 2.0, WHITE, 0.5);

        let c = surface.pixel(4, 4).unwrap();
        assert_eq!(c.a, 255);
        assert!((127..=128).contains(&c.r));
    }

    #[test]
    fn clear_resets_to_clear_color() {
        let mut surface = PixelSurface::new(8, 8);
        surface.fill_circle(Vec2::new(4.0, 4.0), 3.0, WHITE, 1.0);
        assert_ne!(surface.pixel(4, 4), Some(BACKGROUND));

        surface.clear();
        assert!(surface.as_bytes().chunks(4).all(|p| p == [10, 10, 10, 255]));
    }

    #[test]
    fn line_touches_pixels_along_the_segment_only() {
        let mut surface = PixelSurface::with_clear_color(20, 10, Rgba::TRANSPARENT);
        surface.stroke_line(Vec2::new(2.0, 5.0), Vec2::new(18.0, 5.0), 0.5, WHITE, 0.2);

        for x in 3..17 {
            assert!(surface.pixel(x, 4).unwrap().a > 0 || surface.pixel(x, 5).unwrap().a > 0);
        }
        assert_eq!(surface.pixel(10, 0), Some(Rgba::TRANSPARENT));
        assert_eq!(surface.pixel(10, 9), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn drawing_off_surface_is_clipped() {
        let mut surface = PixelSurface::new(10, 10);
        surface.fill_circle(Vec2::new(-50.0, -50.0), 3.0, WHITE, 1.0);
        surface.stroke_line(Vec2::new(-5.0, -5.0), Vec2::new(-1.0, 30.0), 0.5, WHITE, 1.0);
        surface.fill_circle(Vec2::new(9.5, 9.5), 3.0, WHITE, 1.0);

        assert_eq!(surface.pixel(0, 0), Some(BACKGROUND));
        assert_ne!(surface.pixel(9, 9), Some(BACKGROUND));
    }

    #[test]
    fn resize_reallocates_buffer() {
        let mut surface = PixelSurface::new(10, 10);
        surface.resize(3, 2);
        assert_eq!(surface.size(), (3, 2));
        assert_eq!(surface.as_bytes().len(), 3 * 2 * 4);
    }
}
