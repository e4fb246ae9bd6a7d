use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: (hex >> 16) as u8,
            g: (hex >> 8) as u8,
            b: hex as u8,
        }
    }
}

/// Particle colors, the page's two accents plus white
pub const PALETTE: [Color; 3] = [
    Color::from_hex(0x00d4ff),
    Color::from_hex(0xa855f7),
    Color::from_hex(0xffffff),
];

pub const LINK_COLOR: Color = Color::from_hex(0x00d4ff);

/// A 2D drawing target the field clears and paints into every frame.
///
/// Every draw call takes an explicit `alpha` in `[0, 1]` that is composited over what is
/// already there. Nothing outside the surface is ever an error, it is simply clipped.
pub trait Surface {
    fn size(&self) -> (u32, u32);

    /// Resizes the drawing buffer, discarding its contents
    fn resize(&mut self, width: u32, height: u32);

    fn clear(&mut self);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color, alpha: f32);
}
