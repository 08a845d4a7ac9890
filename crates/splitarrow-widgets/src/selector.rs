//! egui embedding of the selector.

use egui::{pos2, vec2, Color32, Mesh, Painter, Pos2, Response, Sense, Shape, Stroke, Ui, Vec2};
use splitarrow_core::{NotchPolygon, Panel, SelectorFrame, SelectorView};

use crate::sizing;

/// Convert a peniko color to an egui color.
pub fn to_color32(color: peniko::Color) -> Color32 {
    let c = color.to_rgba8();
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

fn to_pos2(p: kurbo::Point) -> Pos2 {
    pos2(p.x as f32, p.y as f32)
}

fn to_kurbo_rect(rect: egui::Rect) -> kurbo::Rect {
    kurbo::Rect::new(
        rect.min.x as f64,
        rect.min.y as f64,
        rect.max.x as f64,
        rect.max.y as f64,
    )
}

/// Fill a polygon by fanning triangles out from its tip.
fn polygon_mesh(polygon: &NotchPolygon, color: Color32) -> Mesh {
    let mut mesh = Mesh::default();
    // Skip the closing vertex
    for p in &polygon.points()[..polygon.points().len() - 1] {
        mesh.colored_vertex(to_pos2(*p), color);
    }
    for [a, b, c] in NotchPolygon::fan_triangles() {
        mesh.add_triangle(a as u32, b as u32, c as u32);
    }
    mesh
}

/// Paint a selector frame. Coordinates are egui points.
pub fn paint_frame(painter: &Painter, frame: &SelectorFrame, outline: Option<Color32>) {
    for panel in &frame.panels {
        if panel.frame.is_zero_area() {
            continue;
        }
        let polygon = panel.scene_polygon();
        painter.add(Shape::mesh(polygon_mesh(&polygon, to_color32(panel.fill))));

        if let Some(color) = outline {
            let points = polygon.points().iter().map(|p| to_pos2(*p)).collect();
            painter.add(Shape::closed_line(points, Stroke::new(1.0, color)));
        }
    }
}

/// Response from showing a selector.
pub struct SelectorResponse {
    /// Panel tapped this frame, if any
    pub tapped: Option<Panel>,
    /// The underlying egui Response
    pub response: Response,
}

/// Shows a [`SelectorView`] inside an egui layout.
///
/// The view is laid out into the allocated rect every frame, clicks are
/// forwarded as taps, and repaints are requested while it animates.
pub struct SelectorWidget<'a> {
    view: &'a mut SelectorView,
    size: Option<Vec2>,
    outline: Option<Color32>,
}

impl<'a> SelectorWidget<'a> {
    /// Create a new selector widget.
    pub fn new(view: &'a mut SelectorView) -> Self {
        Self {
            view,
            size: None,
            outline: None,
        }
    }

    /// Set an exact size (defaults to full width, standard height).
    pub fn size(mut self, size: Vec2) -> Self {
        self.size = Some(size);
        self
    }

    /// Outline both panels.
    pub fn outline(mut self, color: Color32) -> Self {
        self.outline = Some(color);
        self
    }

    /// Show the selector.
    pub fn show(self, ui: &mut Ui) -> SelectorResponse {
        let size = self
            .size
            .unwrap_or_else(|| vec2(ui.available_width(), sizing::SELECTOR_HEIGHT));
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());
        self.view.set_frame(to_kurbo_rect(rect));

        let mut tapped = None;
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                tapped = self
                    .view
                    .tap_at(kurbo::Point::new(pos.x as f64, pos.y as f64));
            }
        }

        if ui.is_rect_visible(rect) {
            paint_frame(ui.painter(), &self.view.frame(), self.outline);
        }

        if self.view.is_animating() {
            ui.ctx().request_repaint();
        }
        self.view.tick();

        SelectorResponse { tapped, response }
    }
}
