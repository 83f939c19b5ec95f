//! Drawing abstraction over a 2D canvas
//!
//! Games draw through `Surface` so the same code renders to a browser canvas
//! or to a `RecordingSurface` in headless runs.

use glam::Vec2;

use crate::geometry::Rect;
use crate::theme::Color;

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Minimal 2D drawing API
pub trait Surface {
    /// Drawable size in CSS pixels
    fn size(&self) -> Vec2;
    /// Translation applied to every following draw call (screen shake)
    fn set_offset(&mut self, offset: Vec2);
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn text(&mut self, text: &str, pos: Vec2, size: f32, color: Color, align: TextAlign);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Rect(Rect, Color),
    Circle(Vec2, f32, Color),
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        color: Color,
    },
}

/// Surface that records commands instead of drawing
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Vec2,
    offset: Vec2,
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            offset: Vec2::ZERO,
            commands: Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// All text drawn so far, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, mut rect: Rect, color: Color) {
        rect.translate(self.offset);
        self.commands.push(DrawCommand::Rect(rect, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands
            .push(DrawCommand::Circle(center + self.offset, radius, color));
    }

    fn text(&mut self, text: &str, pos: Vec2, size: f32, color: Color, _align: TextAlign) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos: pos + self.offset,
            size,
            color,
        });
    }
}

/// Canvas 2D context backed surface
#[cfg(target_arch = "wasm32")]
pub struct CanvasSurface {
    ctx: web_sys::CanvasRenderingContext2d,
    size: Vec2,
    offset: Vec2,
}

#[cfg(target_arch = "wasm32")]
impl CanvasSurface {
    pub fn new(ctx: web_sys::CanvasRenderingContext2d, width: f32, height: f32) -> Self {
        Self {
            ctx,
            size: Vec2::new(width, height),
            offset: Vec2::ZERO,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    /// Set the glow used by subsequent fills (theme effect)
    pub fn set_glow(&self, blur: f32, color: Color) {
        self.ctx.set_shadow_blur(blur as f64);
        self.ctx.set_shadow_color(&color.to_css());
    }
}

#[cfg(target_arch = "wasm32")]
impl Surface for CanvasSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }

    fn clear(&mut self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(0.0, 0.0, self.size.x as f64, self.size.y as f64);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(
            (rect.x + self.offset.x) as f64,
            (rect.y + self.offset.y) as f64,
            rect.w as f64,
            rect.h as f64,
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let c = center + self.offset;
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        if self
            .ctx
            .arc(c.x as f64, c.y as f64, radius as f64, 0.0, std::f64::consts::TAU)
            .is_ok()
        {
            self.ctx.fill();
        }
    }

    fn text(&mut self, text: &str, pos: Vec2, size: f32, color: Color, align: TextAlign) {
        let p = pos + self.offset;
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .set_font(&format!("bold {}px system-ui, sans-serif", size.round()));
        self.ctx.set_text_align(align.as_str());
        self.ctx.set_text_baseline("middle");
        let _ = self.ctx.fill_text(text, p.x as f64, p.y as f64);
    }
}
