//! The demo window: two panels, each holding a cube canvas and two buttons.

use std::sync::Arc;

use glam::{Vec2, Vec4};
use glcanvas_core::{Config, Rect, StateGuard};
use glow::HasContext;
use rand::Rng;
use sdl2::keyboard::Keycode;

use crate::{
    abs::GlState,
    canvas::{CanvasOptions, CubeCanvas},
    other::UpdateContext,
    render::ui::{uirenderer::UIRenderer, widgets::*},
};

const CANVAS_SIZE: u32 = 400;
const BUTTON_SIZE: Vec2 = Vec2::new(196.0, 32.0);
const CLEAR_COLOR: Vec4 = Vec4::new(0.3, 0.3, 0.32, 1.0);
const PANEL_BACKGROUND: Vec4 = Vec4::new(0.17, 0.17, 0.17, 1.0);
const PANEL_TITLE: Vec4 = Vec4::new(0.25, 0.25, 0.28, 1.0);
const BACKGROUND_BUTTON: Vec4 = Vec4::new(0.35, 0.35, 0.4, 1.0);
const ROTATION_BUTTON: Vec4 = Vec4::new(0.3, 0.4, 0.35, 1.0);

const BACKGROUND_BUTTON_PATH: [usize; 2] = [1, 0];
const ROTATION_BUTTON_PATH: [usize; 2] = [1, 1];
const SLOT_PATH: [usize; 1] = [0];

/// A random opaque color with 8 bits per channel.
fn random_background(rng: &mut impl Rng) -> Vec4 {
    let [r, g, b]: [u8; 3] = rng.random();
    Vec4::new(r as f32, g as f32, b as f32, 255.0) / 255.0
}

/// A random tilt in `[0, π]`.
fn random_rotation(rng: &mut impl Rng) -> f32 {
    std::f32::consts::PI * rng.random::<f32>()
}

fn rgb(r: u8, g: u8, b: u8) -> Vec4 {
    Vec4::new(r as f32, g as f32, b as f32, 255.0) / 255.0
}

/// Drawable pixels per window unit. 1 unless the display is HiDPI.
fn pixel_scale(window_size: (u32, u32), drawable_size: (u32, u32)) -> Vec2 {
    if window_size.0 == 0 || window_size.1 == 0 {
        return Vec2::ONE;
    }
    Vec2::new(
        drawable_size.0 as f32 / window_size.0 as f32,
        drawable_size.1 as f32 / window_size.1 as f32,
    )
}

/// The GL rectangle, in drawable pixels, of a canvas laid out at `position` in window units.
fn canvas_pixel_rect(
    position: Vec2,
    size: (u32, u32),
    scale: Vec2,
    drawable_height: u32,
) -> Rect {
    let min = (position * scale).round();
    let extent = (Vec2::new(size.0 as f32, size.1 as f32) * scale).round();
    Rect::from_top_left(
        min.x as i32,
        min.y as i32,
        extent.x as i32,
        extent.y as i32,
        drawable_height as i32,
    )
}

/// A panel and the canvas drawn into its slot.
struct CanvasPanel {
    title: &'static str,
    panel: Panel,
    canvas: Option<CubeCanvas>,
}

impl CanvasPanel {
    fn new(
        title: &'static str,
        position: Vec2,
        background: Vec4,
        canvas: anyhow::Result<CubeCanvas>,
    ) -> Self {
        let canvas = match canvas {
            Ok(mut canvas) => {
                canvas.set_background_color(background);
                Some(canvas)
            }
            Err(e) => {
                log::error!("panel '{title}' has no canvas: {e:#}");
                None
            }
        };

        let mut buttons = Row::new(8.0, Alignment::Center, Vec4::ZERO);
        buttons.add_widget(
            Button::new(BUTTON_SIZE, BACKGROUND_BUTTON)
                .with_swatch(background)
                .with_label("Random Background"),
        );
        buttons.add_widget(
            Button::new(BUTTON_SIZE, ROTATION_BUTTON).with_label("Random Rotation"),
        );

        let mut content = Column::new(8.0, Alignment::Start, Vec4::splat(8.0));
        content.add_widget(CanvasSlot::new(Vec2::splat(CANVAS_SIZE as f32)));
        content.add_widget(buttons);

        let mut panel = Panel::new(position, title, PANEL_TITLE, PANEL_BACKGROUND, content);
        panel.layout_in_place();

        Self {
            title,
            panel,
            canvas,
        }
    }

    fn button_pressed(&self, path: &[usize]) -> bool {
        find_widget::<Button>(&self.panel.content, path).is_some_and(Button::is_pressed)
    }

    fn update(&mut self, ctx: &UpdateContext, rng: &mut impl Rng) {
        self.panel.update(ctx);
        self.panel.layout_in_place();

        let background_pressed = self.button_pressed(&BACKGROUND_BUTTON_PATH);
        let rotation_pressed = self.button_pressed(&ROTATION_BUTTON_PATH);
        let Some(canvas) = self.canvas.as_mut() else {
            return;
        };

        if background_pressed {
            let color = random_background(rng);
            canvas.set_background_color(color);
            if let Some(button) =
                find_widget_mut::<Button>(&mut self.panel.content, &BACKGROUND_BUTTON_PATH)
            {
                button.swatch = Some(color);
            }
            log::debug!("panel '{}': background {color}", self.title);
        }
        if rotation_pressed {
            let angle = random_rotation(rng);
            canvas.set_rotation(angle);
            log::debug!("panel '{}': rotation {angle:.3}", self.title);
        }
    }

    /// The rectangle of the canvas in drawable pixels, in GL coordinates.
    fn canvas_rect(
        &self,
        canvas: &CubeCanvas,
        scale: Vec2,
        drawable_height: u32,
    ) -> Option<Rect> {
        let slot = find_widget::<CanvasSlot>(&self.panel.content, &SLOT_PATH)?;
        Some(canvas_pixel_rect(slot.position, canvas.size(), scale, drawable_height))
    }
}

/// The two panels of the demo and their click handlers.
pub struct DemoScreen {
    gl: Arc<glow::Context>,
    state: GlState,
    panels: Vec<CanvasPanel>,
}

impl DemoScreen {
    /// Builds both panels. A canvas that fails to build is logged and its panel stays empty.
    pub fn new(gl: &Arc<glow::Context>, config: &Config) -> Self {
        let backend = config.backend;
        let color_canvas = CubeCanvas::new(
            gl,
            backend,
            CanvasOptions::default(),
            &config.texture_path,
            CANVAS_SIZE,
            CANVAS_SIZE,
        );
        let textured_canvas = CubeCanvas::new(
            gl,
            backend,
            CanvasOptions {
                textured: true,
                offscreen: config.offscreen_blit,
            },
            &config.texture_path,
            CANVAS_SIZE,
            CANVAS_SIZE,
        );

        let panels = vec![
            CanvasPanel::new(
                "Canvas widget demo",
                Vec2::new(15.0, 15.0),
                rgb(100, 100, 100),
                color_canvas,
            ),
            CanvasPanel::new(
                "Textured Cube",
                Vec2::new(500.0, 15.0),
                rgb(32, 32, 128),
                textured_canvas,
            ),
        ];
        log::info!("press escape to quit");

        Self {
            gl: Arc::clone(gl),
            state: GlState::new(gl),
            panels,
        }
    }

    /// Handles input of one frame. Returns `false` when the application should quit.
    pub fn update(&mut self, ctx: &UpdateContext) -> bool {
        if ctx.keyboard.pressed.contains(&Keycode::Escape) {
            return false;
        }

        let mut rng = rand::rng();
        for panel in &mut self.panels {
            panel.update(ctx, &mut rng);
        }
        true
    }

    /// Draws the widgets, then every canvas confined to its slot.
    ///
    /// Widgets are laid out in window units. Canvases are placed in drawable pixels, which
    /// differ from window units on HiDPI displays.
    pub fn render(
        &self,
        ui: &mut UIRenderer,
        time: f32,
        window_size: (u32, u32),
        drawable_size: (u32, u32),
    ) {
        let scale = pixel_scale(window_size, drawable_size);
        unsafe {
            self.gl
                .clear_color(CLEAR_COLOR.x, CLEAR_COLOR.y, CLEAR_COLOR.z, CLEAR_COLOR.w);
            self.gl
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
            self.gl.disable(glow::DEPTH_TEST);
        }

        for panel in &self.panels {
            panel.panel.draw(ui);
        }
        ui.finish();

        for panel in &self.panels {
            let Some(canvas) = &panel.canvas else {
                continue;
            };
            let Some(rect) = panel.canvas_rect(canvas, scale, drawable_size.1) else {
                continue;
            };
            let _guard = StateGuard::confine(&self.state, rect);
            canvas.draw_contents(time);
        }
    }
}
