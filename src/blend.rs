//! Pixel blending

use crate::Pixel;
use crate::buffer::Cursor;
use crate::buffer::Surface;

/// Global opacity plus the compositing and blend modes of a draw
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct Blender<P: Pixel> {
    pub opacity: f64,
    pub compositing: P::Compositing,
    pub blend_mode: P::BlendMode,
}

impl<P: Pixel> Default for Blender<P> {
    fn default() -> Self {
        Blender {
            opacity: 1.0,
            compositing: P::Compositing::default(),
            blend_mode: P::BlendMode::default(),
        }
    }
}

impl<P: Pixel> Blender<P> {
    /// Blend `color` into `dst` at `coverage`
    ///
    /// Writes are skipped when the effective opacity is not positive
    pub fn blend(&self, dst: &mut P, color: P, coverage: f32) {
        let alpha = color.opacity() * self.opacity * f64::from(coverage);
        if !(alpha > 0.0) {
            return;
        }
        // Quantized pixels can round a tiny opacity down to zero
        let src = color.with_opacity(alpha.min(1.0));
        if !(src.opacity() > 0.0) {
            return;
        }
        dst.blend(src, self.compositing, self.blend_mode);
    }
    /// Blend at the cursor, scaled by the surface clip there
    pub fn blend_at(&self, surface: &mut Surface<P>, c: &Cursor, color: P, coverage: f32) {
        let coverage = coverage * surface.clip(c);
        self.blend(surface.pixel_mut(c), color, coverage);
    }
}

/// Offset copy of a drawing in a single color
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct Shadow<P> {
    pub color: P,
    pub dx: i64,
    pub dy: i64,
}

/// Composite a layer onto `surface` as `shadow`
///
/// Every layer pixel contributes the shadow color scaled by its own
/// opacity, moved by the shadow offset.  The blender's opacity is already
/// part of the layer and is not applied again.
pub fn composite_shadow<P: Pixel>(layer: &[P], width: usize, surface: &mut Surface<P>,
                                  shadow: &Shadow<P>, blender: &Blender<P>) {
    let blender = Blender { opacity: 1.0, .. *blender };
    let base = shadow.color.opacity();
    for (i, px) in layer.iter().enumerate() {
        let a = px.opacity();
        if !(a > 0.0) {
            continue;
        }
        let (x, y) = ((i % width) as i64, (i / width) as i64);
        if let Some(c) = surface.cursor(x + shadow.dx, y + shadow.dy) {
            blender.blend_at(surface, &c, shadow.color.with_opacity(base * a), 1.0);
        }
    }
}
