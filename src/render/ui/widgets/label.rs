use glam::{Vec2, Vec4};
use glcanvas_core::BitmapFont;

use crate::render::ui::{
    uirenderer::{DrawCommand, UIRenderMode, UIRenderer},
    widgets::Widget,
};

/// One glyph quad per drawable character of `text`, starting at `origin`.
///
/// Characters without an atlas cell still advance the cursor.
pub fn text_commands(
    font: &BitmapFont,
    text: &str,
    font_size: f32,
    color: Vec4,
    origin: Vec2,
) -> Vec<DrawCommand> {
    let char_size = font.char_size(font_size);
    let mut commands = Vec::new();
    let mut cursor = origin;

    for line in text.split('\n') {
        for c in line.chars() {
            if let Some(uv_rect) = font.glyph_uvs(c).filter(|_| c != ' ') {
                commands.push(DrawCommand {
                    rect: [cursor, cursor + char_size],
                    uv_rect,
                    mode: UIRenderMode::Text(color),
                });
            }
            cursor.x += char_size.x;
        }
        cursor.x = origin.x;
        cursor.y += char_size.y;
    }

    commands
}

/// A line of text set in the built-in bitmap font.
pub struct Label {
    pub text: String,
    pub position: Vec2,
    pub font_size: f32,
    pub color: Vec4,
    font: BitmapFont,
}

impl Label {
    pub fn new(text: &str, font_size: f32, color: Vec4) -> Self {
        Self {
            text: text.to_string(),
            position: Vec2::ZERO,
            font_size,
            color,
            font: BitmapFont::default(),
        }
    }
}

impl Widget for Label {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }

    fn size_hint(&self) -> Vec2 {
        self.font.measure_text(&self.text, self.font_size)
    }

    fn update(&mut self, _ctx: &crate::other::UpdateContext) {}

    fn layout(&mut self, ctx: &super::LayoutContext) -> Vec2 {
        self.position = ctx.cursor;
        self.size_hint().min(ctx.max_size)
    }

    fn draw(&self, ui_renderer: &mut UIRenderer) {
        let commands = text_commands(
            &self.font,
            &self.text,
            self.font_size,
            self.color,
            self.position,
        );
        for command in commands {
            ui_renderer.add_command(command);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ui::widgets::LayoutContext;

    #[test]
    fn test_glyphs_advance_left_to_right() {
        let font = BitmapFont::default();
        let commands = text_commands(&font, "Ab", 16.0, Vec4::ONE, Vec2::new(10.0, 20.0));

        assert_eq!(commands.len(), 2);
        assert_eq!(
            commands[0].rect,
            [Vec2::new(10.0, 20.0), Vec2::new(26.0, 36.0)]
        );
        assert_eq!(
            commands[1].rect,
            [Vec2::new(26.0, 20.0), Vec2::new(42.0, 36.0)]
        );
        assert_eq!(Some(commands[0].uv_rect), font.glyph_uvs('A'));
        assert_eq!(commands[1].mode, UIRenderMode::Text(Vec4::ONE));
    }

    #[test]
    fn test_spaces_advance_without_a_quad() {
        let font = BitmapFont::default();
        let commands = text_commands(&font, "Random Rotation", 8.0, Vec4::ONE, Vec2::ZERO);

        assert_eq!(commands.len(), 14);
        // 'R' of the second word sits after six letters and one space.
        assert_eq!(commands[6].rect[0], Vec2::new(56.0, 0.0));
    }

    #[test]
    fn test_new_line_returns_to_origin() {
        let font = BitmapFont::default();
        let commands = text_commands(&font, "a\nb", 8.0, Vec4::ONE, Vec2::new(4.0, 4.0));
        assert_eq!(commands[1].rect[0], Vec2::new(4.0, 12.0));
    }

    #[test]
    fn test_layout_places_label_at_cursor() {
        let mut label = Label::new("Textured Cube", 16.0, Vec4::ONE);
        let size = label.layout(&LayoutContext {
            max_size: Vec2::new(1000.0, 1000.0),
            cursor: Vec2::new(15.0, 15.0),
        });
        assert_eq!(size, Vec2::new(208.0, 16.0));
        assert_eq!(label.position, Vec2::new(15.0, 15.0));
    }
}
