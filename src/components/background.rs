//! Parallax scrolling background

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::geometry::Rect;
use crate::surface::Surface;
use crate::theme::Theme;

/// Decoration drawn repeatedly across a layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayerStyle {
    /// Small dots (stars, dust)
    Dots,
    /// Vertical bars of varying height from the bottom (skyline, hills)
    Skyline,
    /// Thin horizontal lines (ground stripes)
    Stripes,
}

/// One decoration within a tile, relative to the tile origin
///
/// Vertical placement is stored as fractions of the viewport height so the
/// layer follows a resize.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Decoration {
    x: f32,
    top: f32,
    width: f32,
    /// Height as a fraction of the viewport, plus a fixed pixel part
    height_frac: f32,
    height_px: f32,
}

impl Decoration {
    fn rect(&self, origin: f32, view_h: f32) -> Rect {
        Rect::new(
            origin + self.x,
            self.top * view_h,
            self.width,
            self.height_frac * view_h + self.height_px,
        )
    }
}

/// A parallax layer
#[derive(Debug, Clone)]
pub struct ParallaxLayer {
    /// Fraction of the scroll speed this layer moves at (far = small)
    pub factor: f32,
    /// Width of one repeating tile
    pub tile_width: f32,
    pub style: LayerStyle,
    /// Opacity of the decorations
    pub alpha: f32,
    /// Always in [0, tile_width)
    offset: f32,
    decorations: Vec<Decoration>,
}

impl ParallaxLayer {
    pub fn offset(&self) -> f32 {
        self.offset
    }
}

/// Horizontally scrolling, multi-layer background
#[derive(Debug, Clone)]
pub struct ScrollingBackground {
    layers: Vec<ParallaxLayer>,
    size: Vec2,
    /// Base scroll speed in pixels/s (layers scale it by their factor)
    pub speed: f32,
    seed: u64,
}

impl ScrollingBackground {
    pub fn new(width: f32, height: f32, speed: f32, seed: u64) -> Self {
        Self {
            layers: Vec::new(),
            size: Vec2::new(width, height),
            speed,
            seed,
        }
    }

    /// Add a layer with `count` decorations per tile; far layers first
    pub fn with_layer(
        mut self,
        factor: f32,
        tile_width: f32,
        style: LayerStyle,
        count: usize,
    ) -> Self {
        self.add_layer(factor, tile_width, style, count);
        self
    }

    pub fn add_layer(
        &mut self,
        factor: f32,
        tile_width: f32,
        style: LayerStyle,
        count: usize,
    ) {
        let tile_width = tile_width.max(1.0);
        let mut rng = Pcg32::seed_from_u64(self.seed.wrapping_add(self.layers.len() as u64));
        let decorations = (0..count)
            .map(|_| self.decoration(style, tile_width, &mut rng))
            .collect();
        self.layers.push(ParallaxLayer {
            factor,
            tile_width,
            style,
            alpha: 0.25 + 0.5 * factor.clamp(0.0, 1.0),
            offset: 0.0,
            decorations,
        });
    }

    fn decoration(&self, style: LayerStyle, tile_width: f32, rng: &mut Pcg32) -> Decoration {
        let x = rng.random_range(0.0..tile_width);
        match style {
            LayerStyle::Dots => {
                let r = rng.random_range(1.0..3.0);
                Decoration {
                    x,
                    top: rng.random_range(0.0..1.0),
                    width: r,
                    height_frac: 0.0,
                    height_px: r,
                }
            }
            LayerStyle::Skyline => {
                // Bars stand on the bottom edge
                let bar = rng.random_range(0.1..0.4);
                Decoration {
                    x,
                    top: 1.0 - bar,
                    width: rng.random_range(20.0..60.0),
                    height_frac: bar,
                    height_px: 0.0,
                }
            }
            LayerStyle::Stripes => Decoration {
                x,
                top: rng.random_range(0.8..1.0),
                width: rng.random_range(10.0..40.0),
                height_frac: 0.0,
                height_px: 2.0,
            },
        }
    }

    pub fn layers(&self) -> &[ParallaxLayer] {
        &self.layers
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    pub fn update(&mut self, dt: f32) {
        for layer in self.layers.iter_mut() {
            let advanced = layer.offset + self.speed * layer.factor * dt;
            layer.offset = advanced.rem_euclid(layer.tile_width);
            // rem_euclid can round up to the modulus for tiny negatives
            if layer.offset >= layer.tile_width {
                layer.offset = 0.0;
            }
        }
    }

    pub fn reset(&mut self) {
        for layer in self.layers.iter_mut() {
            layer.offset = 0.0;
        }
    }

    /// X positions of the tiles needed to cover the viewport for `layer`
    pub fn tile_origins(&self, layer: usize) -> Vec<f32> {
        let Some(layer) = self.layers.get(layer) else {
            return Vec::new();
        };
        let mut xs = Vec::new();
        let mut x = -layer.offset;
        while x < self.size.x {
            xs.push(x);
            x += layer.tile_width;
        }
        xs
    }

    /// Draw the first `max_layers` layers (quality setting)
    pub fn draw(&self, surface: &mut dyn Surface, theme: &Theme, max_layers: usize) {
        for (idx, layer) in self.layers.iter().enumerate().take(max_layers) {
            let color = match layer.style {
                LayerStyle::Dots => theme.palette.text_muted,
                LayerStyle::Skyline => theme.palette.surface,
                LayerStyle::Stripes => theme.palette.grid,
            }
            .with_alpha(layer.alpha);
            for origin in self.tile_origins(idx) {
                for d in &layer.decorations {
                    let rect = d.rect(origin, self.size.y);
                    match layer.style {
                        LayerStyle::Dots => {
                            surface.fill_circle(Vec2::new(rect.x, rect.y), d.width, color)
                        }
                        _ => surface.fill_rect(rect, color),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};
    use proptest::prelude::*;

    fn background() -> ScrollingBackground {
        ScrollingBackground::new(300.0, 200.0, 100.0, 11)
            .with_layer(0.2, 120.0, LayerStyle::Dots, 5)
            .with_layer(1.0, 200.0, LayerStyle::Skyline, 3)
    }

    #[test]
    fn test_parallax_factors() {
        let mut bg = background();
        bg.update(1.0);
        assert!((bg.layers()[0].offset() - 20.0).abs() < 1e-4);
        assert!((bg.layers()[1].offset() - 100.0).abs() < 1e-4);
        bg.update(1.5);
        // 250 wraps past the 200px tile
        assert!((bg.layers()[1].offset() - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_tiles_cover_viewport() {
        let mut bg = background();
        bg.update(0.5);
        let xs = bg.tile_origins(1);
        assert_eq!(xs, vec![-50.0, 150.0]);
        assert!(xs[0] <= 0.0);
        assert!(xs.last().unwrap() + 200.0 >= 300.0);
        assert!(bg.tile_origins(5).is_empty());
    }

    #[test]
    fn test_draw_respects_layer_limit() {
        let bg = background();
        let theme = Theme::builtin().remove(0);
        let mut one = RecordingSurface::new(300.0, 200.0);
        bg.draw(&mut one, &theme, 1);
        // 3 tiles of 120px x 5 dots
        assert_eq!(one.commands.len(), 15);

        let mut all = RecordingSurface::new(300.0, 200.0);
        bg.draw(&mut all, &theme, 3);
        assert_eq!(all.commands.len(), 15 + 2 * 3);
    }

    #[test]
    fn test_skyline_follows_resize() {
        let mut bg = background();
        let theme = Theme::builtin().remove(0);
        bg.resize(300.0, 500.0);
        let mut surface = RecordingSurface::new(300.0, 500.0);
        // Skip the dots layer
        bg.draw(&mut surface, &theme, 2);
        let bars: Vec<Rect> = surface
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rect(rect, _) => Some(*rect),
                _ => None,
            })
            .collect();
        assert_eq!(bars.len(), 2 * 3);
        for bar in bars {
            assert!((bar.bottom() - 500.0).abs() < 1e-3, "{bar:?}");
            assert!(bar.h >= 50.0 - 1e-3 && bar.h <= 200.0 + 1e-3);
        }
    }

    #[test]
    fn test_decorations_are_deterministic() {
        let theme = Theme::builtin().remove(0);
        let mut a = RecordingSurface::new(300.0, 200.0);
        let mut b = RecordingSurface::new(300.0, 200.0);
        background().draw(&mut a, &theme, 2);
        background().draw(&mut b, &theme, 2);
        assert_eq!(a.commands, b.commands);
    }

    proptest! {
        #[test]
        fn offset_stays_within_tile(
            speed in -500.0f32..500.0,
            steps in proptest::collection::vec(0.0f32..0.2, 1..100),
        ) {
            let mut bg = ScrollingBackground::new(300.0, 200.0, speed, 1)
                .with_layer(0.5, 64.0, LayerStyle::Stripes, 2);
            for dt in steps {
                bg.update(dt);
                let off = bg.layers()[0].offset();
                prop_assert!((0.0..64.0).contains(&off));
            }
        }
    }
}
