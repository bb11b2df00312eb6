use glam::Vec2;

use crate::render::ui::widgets::Widget;

/// Reserves the area a cube canvas is drawn into.
///
/// The canvas paints its own background, so the slot draws nothing; it only remembers where
/// layout placed it.
pub struct CanvasSlot {
    pub position: Vec2,
    pub size: Vec2,
}

impl CanvasSlot {
    pub fn new(size: Vec2) -> Self {
        Self {
            position: Vec2::ZERO,
            size,
        }
    }
}

impl Widget for CanvasSlot {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }

    fn size_hint(&self) -> Vec2 {
        self.size
    }

    fn update(&mut self, _ctx: &crate::other::UpdateContext) {}

    fn layout(&mut self, ctx: &super::LayoutContext) -> Vec2 {
        self.position = ctx.cursor;
        self.size
    }

    fn draw(&self, _ui_renderer: &mut crate::render::ui::uirenderer::UIRenderer) {}
}
