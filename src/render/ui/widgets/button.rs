use glam::{Vec2, Vec4};

use crate::render::ui::{
    uirenderer::{DrawCommand, UIRenderer},
    widgets::{Label, LayoutContext, Widget},
};

const HOVER_TINT: f32 = 1.2;
const DOWN_TINT: f32 = 0.8;
const SWATCH_INSET: f32 = 6.0;
const LABEL_FONT_SIZE: f32 = 8.0;
const LABEL_COLOR: Vec4 = Vec4::ONE;

/// A solid-colored push button with an optional caption.
///
/// A button may show a swatch, a small square of a second color on its left edge. The caption
/// is centered in the space right of the swatch.
pub struct Button {
    pub position: Vec2,
    pub size: Vec2,
    pub color: Vec4,
    pub swatch: Option<Vec4>,
    pub label: Option<Label>,
    is_down: bool,
    is_down_last: bool,
    hovered: bool,
}

impl Button {
    pub fn new(size: Vec2, color: Vec4) -> Self {
        Self {
            position: Vec2::ZERO,
            size,
            color,
            swatch: None,
            label: None,
            is_down: false,
            is_down_last: false,
            hovered: false,
        }
    }

    pub fn with_swatch(mut self, swatch: Vec4) -> Self {
        self.swatch = Some(swatch);
        self
    }

    pub fn with_label(mut self, text: &str) -> Self {
        self.label = Some(Label::new(text, LABEL_FONT_SIZE, LABEL_COLOR));
        self
    }

    /// True on the first frame the button is held down.
    pub fn is_pressed(&self) -> bool {
        self.is_down && !self.is_down_last
    }

    fn contains(&self, point: Vec2) -> bool {
        point.x >= self.position.x
            && point.x <= self.position.x + self.size.x
            && point.y >= self.position.y
            && point.y <= self.position.y + self.size.y
    }

    /// Width taken by the swatch and its insets, zero without a swatch.
    fn swatch_width(&self) -> f32 {
        if self.swatch.is_some() {
            self.size.y
        } else {
            0.0
        }
    }

    fn face_color(&self) -> Vec4 {
        let tint = if self.is_down {
            DOWN_TINT
        } else if self.hovered {
            HOVER_TINT
        } else {
            1.0
        };
        (self.color.truncate() * tint)
            .min(glam::Vec3::ONE)
            .extend(self.color.w)
    }
}

impl Widget for Button {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }

    fn size_hint(&self) -> Vec2 {
        self.size
    }

    fn update(&mut self, ctx: &crate::other::UpdateContext) {
        self.is_down_last = self.is_down;
        let mouse_down = ctx.mouse.down.contains(&sdl2::mouse::MouseButton::Left);
        self.hovered = self.contains(ctx.mouse.position);
        self.is_down = mouse_down && self.hovered;
    }

    fn layout(&mut self, ctx: &super::LayoutContext) -> Vec2 {
        self.position = ctx.cursor;

        let text_left = self.swatch_width();
        let free = Vec2::new(self.size.x - text_left, self.size.y);
        let origin = self.position + Vec2::new(text_left, 0.0);
        if let Some(label) = &mut self.label {
            let centering = ((free - label.size_hint()) / 2.0).max(Vec2::ZERO);
            label.layout(&LayoutContext {
                max_size: free,
                cursor: (origin + centering).round(),
            });
        }

        self.size.min(ctx.max_size)
    }

    fn draw(&self, ui_renderer: &mut UIRenderer) {
        ui_renderer.add_command(DrawCommand::solid(
            [self.position, self.position + self.size],
            self.face_color(),
        ));
        if let Some(swatch) = self.swatch {
            let side = (self.size.y - 2.0 * SWATCH_INSET).max(0.0);
            let min = self.position + Vec2::splat(SWATCH_INSET);
            ui_renderer.add_command(DrawCommand::solid([min, min + Vec2::splat(side)], swatch));
        }
        if let Some(label) = &self.label {
            label.draw(ui_renderer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::other::{InputState, UpdateContext};
    use sdl2::mouse::MouseButton;

    fn placed_button() -> Button {
        let mut button = Button::new(Vec2::new(100.0, 30.0), Vec4::new(0.5, 0.5, 0.9, 1.0));
        button.position = Vec2::new(10.0, 10.0);
        button
    }

    #[test]
    fn test_press_fires_once_per_click() {
        let mut button = placed_button();
        let mut input = InputState::default();
        input.mouse.position = Vec2::new(50.0, 20.0);

        button.update(&UpdateContext::new(&input));
        assert!(button.hovered);
        assert!(!button.is_pressed());

        input.mouse.down.insert(MouseButton::Left);
        button.update(&UpdateContext::new(&input));
        assert!(button.is_pressed());

        button.update(&UpdateContext::new(&input));
        assert!(button.is_down);
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_click_outside_is_ignored() {
        let mut button = placed_button();
        let mut input = InputState::default();
        input.mouse.position = Vec2::new(200.0, 20.0);
        input.mouse.down.insert(MouseButton::Left);

        button.update(&UpdateContext::new(&input));
        assert!(!button.hovered);
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_hover_brightens_without_overflow() {
        let mut button = placed_button();
        button.hovered = true;
        let color = button.face_color();
        assert!((color.x - 0.6).abs() < 1e-6);
        assert_eq!(color.z, 1.0);
        assert_eq!(color.w, 1.0);
    }

    #[test]
    fn test_caption_is_centered_right_of_swatch() {
        let mut button = Button::new(Vec2::new(196.0, 32.0), Vec4::ONE)
            .with_swatch(Vec4::ZERO)
            .with_label("Random Background");
        button.layout(&LayoutContext {
            max_size: Vec2::new(196.0, 32.0),
            cursor: Vec2::new(10.0, 10.0),
        });

        // 17 glyphs of 8 pixels in the 164 pixels right of the 32 pixel swatch.
        let label = button.label.as_ref().unwrap();
        assert_eq!(label.size_hint(), Vec2::new(136.0, 8.0));
        assert_eq!(label.position, Vec2::new(56.0, 22.0));
    }

    #[test]
    fn test_caption_without_swatch_uses_full_width() {
        let mut button =
            Button::new(Vec2::new(196.0, 32.0), Vec4::ONE).with_label("Random Rotation");
        button.layout(&LayoutContext {
            max_size: Vec2::new(196.0, 32.0),
            cursor: Vec2::ZERO,
        });
        assert_eq!(button.label.as_ref().unwrap().position, Vec2::new(38.0, 12.0));
    }
}
