use glam::{Vec2, Vec4};

use crate::render::ui::{
    uirenderer::{DrawCommand, UIRenderer},
    widgets::{Column, Label, LayoutContext, Widget},
};

pub const TITLE_BAR_HEIGHT: f32 = 24.0;
const TITLE_FONT_SIZE: f32 = 16.0;
const TITLE_PADDING: f32 = 8.0;
const TITLE_TEXT_COLOR: Vec4 = Vec4::new(0.9, 0.9, 0.9, 1.0);

/// A fixed-position window with a title bar whose body is a [`Column`].
pub struct Panel {
    pub position: Vec2,
    pub title: Label,
    pub title_color: Vec4,
    pub background: Vec4,
    pub content: Column,
}

impl Panel {
    pub fn new(
        position: Vec2,
        title: &str,
        title_color: Vec4,
        background: Vec4,
        content: Column,
    ) -> Self {
        Self {
            position,
            title: Label::new(title, TITLE_FONT_SIZE, TITLE_TEXT_COLOR),
            title_color,
            background,
            content,
        }
    }

    /// Lays the panel out at its own position.
    pub fn layout_in_place(&mut self) -> Vec2 {
        self.layout(&super::LayoutContext {
            max_size: self.size_hint(),
            cursor: self.position,
        })
    }
}

impl Widget for Panel {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }

    fn size_hint(&self) -> Vec2 {
        let content = self.content.size_hint();
        let title_width = self.title.size_hint().x + 2.0 * TITLE_PADDING;
        Vec2::new(content.x.max(title_width), content.y + TITLE_BAR_HEIGHT)
    }

    fn update(&mut self, ctx: &crate::other::UpdateContext) {
        self.content.update(ctx);
    }

    fn layout(&mut self, ctx: &super::LayoutContext) -> Vec2 {
        self.position = ctx.cursor;
        let size = self.size_hint();

        let title_size = self.title.size_hint();
        let title_top = ((TITLE_BAR_HEIGHT - title_size.y) / 2.0).max(0.0);
        self.title.layout(&LayoutContext {
            max_size: Vec2::new(size.x - 2.0 * TITLE_PADDING, TITLE_BAR_HEIGHT),
            cursor: self.position + Vec2::new(TITLE_PADDING, title_top),
        });

        self.content.layout(&LayoutContext {
            max_size: Vec2::new(size.x, size.y - TITLE_BAR_HEIGHT),
            cursor: self.position + Vec2::new(0.0, TITLE_BAR_HEIGHT),
        });
        size
    }

    fn draw(&self, ui_renderer: &mut UIRenderer) {
        let size = self.size_hint();
        ui_renderer.add_command(DrawCommand::solid(
            [self.position, self.position + size],
            self.background,
        ));
        ui_renderer.add_command(DrawCommand::solid(
            [
                self.position,
                self.position + Vec2::new(size.x, TITLE_BAR_HEIGHT),
            ],
            self.title_color,
        ));
        self.title.draw(ui_renderer);
        self.content.draw(ui_renderer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ui::widgets::{Alignment, CanvasSlot, find_widget};

    #[test]
    fn test_content_starts_below_title_bar() {
        let mut content = Column::new(0.0, Alignment::Start, Vec4::new(8.0, 8.0, 8.0, 8.0));
        content.add_widget(CanvasSlot::new(Vec2::splat(400.0)));
        let mut panel = Panel::new(
            Vec2::new(15.0, 15.0),
            "Textured Cube",
            Vec4::ONE,
            Vec4::ONE,
            content,
        );

        assert_eq!(panel.layout_in_place(), Vec2::new(416.0, 440.0));
        let slot = find_widget::<CanvasSlot>(&panel.content, &[0]).unwrap();
        assert_eq!(slot.position, Vec2::new(23.0, 47.0));
        assert_eq!(panel.title.position, Vec2::new(23.0, 19.0));
    }

    #[test]
    fn test_long_title_widens_panel() {
        let mut content = Column::new(0.0, Alignment::Start, Vec4::ZERO);
        content.add_widget(CanvasSlot::new(Vec2::splat(100.0)));
        let panel = Panel::new(
            Vec2::ZERO,
            "Canvas widget demo",
            Vec4::ONE,
            Vec4::ONE,
            content,
        );

        // 18 glyphs at 16 pixels plus the padding on both sides.
        assert_eq!(panel.size_hint(), Vec2::new(304.0, 124.0));
    }
}
