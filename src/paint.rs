//! egui-backed drawing surface (enabled with the `egui` feature).
//!
//! Adapts an [`egui::Painter`] clipped to a rect into the [`Surface`] the
//! simulation draws through. Rotated squares and triangles become convex
//! polygons; circles map straight to filled circles.

use crate::surface::Surface;
use crate::visuals::ParticleShape;
use glam::{Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, SQRT_2};

/// A [`Surface`] drawing into an egui painter.
pub struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    rect: egui::Rect,
    background: egui::Color32,
}

impl<'a> PainterSurface<'a> {
    /// Wrap a painter; particle coordinates are relative to `rect.min`.
    pub fn new(painter: &'a egui::Painter, rect: egui::Rect) -> Self {
        Self {
            painter,
            rect,
            background: egui::Color32::BLACK,
        }
    }

    /// Override the clear color.
    pub fn with_background(mut self, background: egui::Color32) -> Self {
        self.background = background;
        self
    }

    fn to_pos(&self, p: Vec2) -> egui::Pos2 {
        egui::Pos2::new(self.rect.min.x + p.x, self.rect.min.y + p.y)
    }
}

fn to_color32(c: Vec3) -> egui::Color32 {
    egui::Color32::from_rgb(
        (c.x.clamp(0.0, 1.0) * 255.0) as u8,
        (c.y.clamp(0.0, 1.0) * 255.0) as u8,
        (c.z.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

impl Surface for PainterSurface<'_> {
    fn size(&self) -> Vec2 {
        Vec2::new(self.rect.width(), self.rect.height())
    }

    fn clear(&mut self) {
        self.painter
            .rect_filled(self.rect, egui::CornerRadius::ZERO, self.background);
    }

    fn draw_shape(
        &mut self,
        shape: ParticleShape,
        pos: Vec2,
        rotation: f32,
        size: f32,
        color: Vec3,
    ) {
        let color = to_color32(color);
        match shape {
            ParticleShape::Circle => {
                self.painter.circle_filled(self.to_pos(pos), size, color);
            }
            ParticleShape::Square => {
                // Corners of a square with half-extent `size`.
                let radius = size * SQRT_2;
                let points: Vec<egui::Pos2> = (0..4)
                    .map(|k| {
                        let angle = rotation + FRAC_PI_4 + k as f32 * FRAC_PI_2;
                        self.to_pos(pos + Vec2::new(angle.cos(), angle.sin()) * radius)
                    })
                    .collect();
                self.painter.add(egui::Shape::convex_polygon(
                    points,
                    color,
                    egui::Stroke::NONE,
                ));
            }
            ParticleShape::Triangle => {
                let local = [
                    Vec2::new(-size, size * 0.5),
                    Vec2::new(size, size * 0.5),
                    Vec2::new(0.0, -size),
                ];
                let (sin, cos) = rotation.sin_cos();
                let points: Vec<egui::Pos2> = local
                    .iter()
                    .map(|v| {
                        self.to_pos(pos + Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos))
                    })
                    .collect();
                self.painter.add(egui::Shape::convex_polygon(
                    points,
                    color,
                    egui::Stroke::NONE,
                ));
            }
        }
    }
}
