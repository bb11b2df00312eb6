//! Scoped changes to the ambient render state.
//!
//! Drawing into a sub-rectangle of the window or into an offscreen target means changing the
//! viewport, the scissor box and a few capabilities that the rest of the frame relies on.
//! [`StateGuard`] records those values when it is created and puts them back when it is
//! dropped, so every exit path (including `?` and early returns) restores them.

/// A rectangle in window coordinates, origin at the bottom left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle of the given size anchored at the origin.
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Converts a rectangle given with a top-left origin (as the window system and the widget
    /// layer report it) into one with a bottom-left origin.
    pub fn from_top_left(x: i32, y: i32, width: i32, height: i32, window_height: i32) -> Self {
        Self::new(x, window_height - y - height, width, height)
    }
}

/// Toggleable pipeline capabilities the guard knows how to restore.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    DepthTest,
    StencilTest,
    ScissorTest,
}

/// Read and write access to the parts of the render state the guard restores.
pub trait RenderState {
    fn viewport(&self) -> Rect;
    fn set_viewport(&self, rect: Rect);
    fn scissor(&self) -> Rect;
    fn set_scissor(&self, rect: Rect);
    fn is_enabled(&self, capability: Capability) -> bool;
    fn set_enabled(&self, capability: Capability, enabled: bool);
    /// Makes the window the render target again.
    fn bind_default_framebuffer(&self);
}

/// Restores viewport, scissor box and capabilities when dropped.
#[must_use = "the previous state is restored as soon as the guard is dropped"]
pub struct StateGuard<'a, S: RenderState + ?Sized> {
    state: &'a S,
    viewport: Rect,
    scissor: Rect,
    capabilities: Vec<(Capability, bool)>,
    rebind_default: bool,
}

impl<'a, S: RenderState + ?Sized> StateGuard<'a, S> {
    fn save(state: &'a S, touched: &[Capability], rebind_default: bool) -> Self {
        Self {
            state,
            viewport: state.viewport(),
            scissor: state.scissor(),
            capabilities: touched
                .iter()
                .map(|&cap| (cap, state.is_enabled(cap)))
                .collect(),
            rebind_default,
        }
    }

    /// Confines drawing to `rect`: viewport and scissor box are set to it, scissor and depth
    /// testing are enabled.
    pub fn confine(state: &'a S, rect: Rect) -> Self {
        let guard = Self::save(
            state,
            &[Capability::ScissorTest, Capability::DepthTest],
            false,
        );
        state.set_viewport(rect);
        state.set_scissor(rect);
        state.set_enabled(Capability::ScissorTest, true);
        state.set_enabled(Capability::DepthTest, true);
        guard
    }

    /// Prepares a full-target pass into an offscreen framebuffer of `width`×`height`: viewport
    /// and scissor cover the target, depth and stencil testing are disabled. The caller binds
    /// its framebuffer after this; the default framebuffer is bound again on drop.
    pub fn offscreen(state: &'a S, width: i32, height: i32) -> Self {
        let guard = Self::save(
            state,
            &[Capability::DepthTest, Capability::StencilTest],
            true,
        );
        let rect = Rect::from_size(width, height);
        state.set_viewport(rect);
        state.set_scissor(rect);
        state.set_enabled(Capability::DepthTest, false);
        state.set_enabled(Capability::StencilTest, false);
        guard
    }

    /// The viewport that will be restored.
    pub fn saved_viewport(&self) -> Rect {
        self.viewport
    }

    /// The scissor box that will be restored.
    pub fn saved_scissor(&self) -> Rect {
        self.scissor
    }
}

impl<S: RenderState + ?Sized> Drop for StateGuard<'_, S> {
    fn drop(&mut self) {
        if self.rebind_default {
            self.state.bind_default_framebuffer();
        }
        self.state.set_viewport(self.viewport);
        self.state.set_scissor(self.scissor);
        for &(cap, enabled) in &self.capabilities {
            self.state.set_enabled(cap, enabled);
        }
    }
}
