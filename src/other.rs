use std::collections::HashSet;

use glam::Vec2;
use sdl2::{event::Event, keyboard::Keycode, mouse::MouseButton};

/// The current state of the keyboard.
#[derive(Default)]
pub struct KeyboardState {
    pub down: HashSet<Keycode>,
    pub pressed: HashSet<Keycode>,
    pub released: HashSet<Keycode>,
}

/// The current state of the mouse.
#[derive(Default)]
pub struct MouseState {
    pub position: Vec2,
    pub down: HashSet<MouseButton>,
    pub pressed: HashSet<MouseButton>,
    pub released: HashSet<MouseButton>,
}

/// Keyboard and mouse state, fed from SDL events once per frame.
#[derive(Default)]
pub struct InputState {
    pub keyboard: KeyboardState,
    pub mouse: MouseState,
}

impl InputState {
    /// Forgets the edge-triggered state of the previous frame.
    pub fn begin_frame(&mut self) {
        self.keyboard.pressed.clear();
        self.keyboard.released.clear();
        self.mouse.pressed.clear();
        self.mouse.released.clear();
    }

    pub fn handle_event(&mut self, event: &Event) {
        match *event {
            Event::MouseMotion { x, y, .. } => {
                self.mouse.position = Vec2::new(x as f32, y as f32);
            }
            Event::MouseButtonDown {
                mouse_btn, x, y, ..
            } => {
                self.mouse.position = Vec2::new(x as f32, y as f32);
                self.mouse.down.insert(mouse_btn);
                self.mouse.pressed.insert(mouse_btn);
            }
            Event::MouseButtonUp {
                mouse_btn, x, y, ..
            } => {
                self.mouse.position = Vec2::new(x as f32, y as f32);
                self.mouse.down.remove(&mouse_btn);
                self.mouse.released.insert(mouse_btn);
            }
            Event::KeyDown {
                keycode: Some(keycode),
                repeat: false,
                ..
            } => {
                self.keyboard.down.insert(keycode);
                self.keyboard.pressed.insert(keycode);
            }
            Event::KeyUp {
                keycode: Some(keycode),
                repeat: false,
                ..
            } => {
                self.keyboard.down.remove(&keycode);
                self.keyboard.released.insert(keycode);
            }
            _ => {}
        }
    }
}

/// Context provided to widgets during the update phase.
pub struct UpdateContext<'a> {
    pub keyboard: &'a KeyboardState,
    pub mouse: &'a MouseState,
}

impl<'a> UpdateContext<'a> {
    /// Creates a new `UpdateContext` from the given input state.
    pub fn new(input: &'a InputState) -> Self {
        Self {
            keyboard: &input.keyboard,
            mouse: &input.mouse,
        }
    }
}
