//! Containers that can hold multiple widgets.

use std::any::Any;

use glam::{Vec2, Vec4};

use crate::render::ui::{uirenderer::UIRenderer, widgets::Widget};

/// Alignment options for widgets within a container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Alignment {
    Start,
    Center,
}

impl Alignment {
    fn offset(self, available: f32, used: f32) -> f32 {
        match self {
            Alignment::Start => 0.0,
            Alignment::Center => (available - used) / 2.0,
        }
    }
}

fn children(widget: &dyn Widget) -> Option<&[Box<dyn Widget>]> {
    let any = widget.as_any();
    if let Some(column) = any.downcast_ref::<Column>() {
        Some(&column.widgets)
    } else if let Some(row) = any.downcast_ref::<Row>() {
        Some(&row.widgets)
    } else {
        None
    }
}

fn children_mut(widget: &mut dyn Widget) -> Option<&mut Vec<Box<dyn Widget>>> {
    let any = widget.as_any_mut();
    if any.is::<Column>() {
        any.downcast_mut::<Column>().map(|column| &mut column.widgets)
    } else if any.is::<Row>() {
        any.downcast_mut::<Row>().map(|row| &mut row.widgets)
    } else {
        None
    }
}

/// Traverses through containers to find a widget of type T and returns a reference.
pub fn find_widget<'a, T: Widget + 'static>(
    root: &'a dyn Widget,
    indices: &[usize],
) -> Option<&'a T> {
    let mut current = root;
    for &index in indices {
        current = children(current)?.get(index)?.as_ref();
    }
    current.as_any().downcast_ref::<T>()
}

/// Traverses through containers to find a widget of type T and returns a mutable reference.
pub fn find_widget_mut<'a, T: Widget + 'static>(
    root: &'a mut dyn Widget,
    indices: &[usize],
) -> Option<&'a mut T> {
    let mut current = root;
    for &index in indices {
        current = children_mut(current)?.get_mut(index)?.as_mut();
    }
    current.as_any_mut().downcast_mut::<T>()
}

/// A vertical column container that arranges its child widgets vertically.
///
/// `padding` is `(left, top, right, bottom)`.
pub struct Column {
    pub widgets: Vec<Box<dyn Widget>>,
    pub spacing: f32,
    pub alignment: Alignment,
    pub padding: Vec4,
}

impl Column {
    /// Creates a new `Column` container with the specified spacing, alignment and padding.
    pub fn new(spacing: f32, alignment: Alignment, padding: Vec4) -> Self {
        Self {
            widgets: Vec::new(),
            spacing,
            alignment,
            padding,
        }
    }

    /// Adds a widget to the column.
    pub fn add_widget<T: Widget + 'static>(&mut self, widget: T) {
        self.widgets.push(Box::new(widget));
    }
}

impl Widget for Column {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn size_hint(&self) -> Vec2 {
        let mut width: f32 = 0.0;
        let mut height: f32 = 0.0;

        for widget in &self.widgets {
            let size = widget.size_hint();
            width = width.max(size.x);
            height += size.y;
        }

        height += self.spacing * (self.widgets.len().saturating_sub(1)) as f32;
        width += self.padding.x + self.padding.z;
        height += self.padding.y + self.padding.w;

        Vec2::new(width, height)
    }

    fn update(&mut self, ctx: &crate::other::UpdateContext) {
        for widget in &mut self.widgets {
            widget.update(ctx);
        }
    }

    fn layout(&mut self, ctx: &super::LayoutContext) -> Vec2 {
        let content_width = ctx.max_size.x - self.padding.x - self.padding.z;
        let mut cursor_y = ctx.cursor.y + self.padding.y;

        for widget in self.widgets.iter_mut() {
            let widget_size = widget.size_hint();
            let offset_x = self.padding.x + self.alignment.offset(content_width, widget_size.x);

            widget.layout(&super::LayoutContext {
                max_size: widget_size,
                cursor: Vec2::new(ctx.cursor.x + offset_x, cursor_y),
            });
            cursor_y += widget_size.y + self.spacing;
        }

        Vec2::new(ctx.max_size.x, self.size_hint().y)
    }

    fn draw(&self, ui_renderer: &mut UIRenderer) {
        for widget in &self.widgets {
            widget.draw(ui_renderer);
        }
    }
}

/// A horizontal row container that arranges its child widgets horizontally.
///
/// `padding` is `(left, top, right, bottom)`.
pub struct Row {
    pub widgets: Vec<Box<dyn Widget>>,
    pub spacing: f32,
    pub alignment: Alignment,
    pub padding: Vec4,
}

impl Row {
    /// Creates a new `Row` container with the specified spacing, alignment and padding.
    pub fn new(spacing: f32, alignment: Alignment, padding: Vec4) -> Self {
        Self {
            widgets: Vec::new(),
            spacing,
            alignment,
            padding,
        }
    }

    /// Adds a widget to the row.
    pub fn add_widget<T: Widget + 'static>(&mut self, widget: T) {
        self.widgets.push(Box::new(widget));
    }
}

impl Widget for Row {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn size_hint(&self) -> Vec2 {
        let mut width: f32 = 0.0;
        let mut height: f32 = 0.0;

        for widget in &self.widgets {
            let size = widget.size_hint();
            width += size.x;
            height = height.max(size.y);
        }

        width += self.spacing * (self.widgets.len().saturating_sub(1)) as f32;
        width += self.padding.x + self.padding.z;
        height += self.padding.y + self.padding.w;

        Vec2::new(width, height)
    }

    fn update(&mut self, ctx: &crate::other::UpdateContext) {
        for widget in &mut self.widgets {
            widget.update(ctx);
        }
    }

    fn layout(&mut self, ctx: &super::LayoutContext) -> Vec2 {
        let content_height = ctx.max_size.y - self.padding.y - self.padding.w;
        let mut cursor_x = ctx.cursor.x + self.padding.x;

        for widget in self.widgets.iter_mut() {
            let widget_size = widget.size_hint();
            let offset_y = self.padding.y + self.alignment.offset(content_height, widget_size.y);

            widget.layout(&super::LayoutContext {
                max_size: widget_size,
                cursor: Vec2::new(cursor_x, ctx.cursor.y + offset_y),
            });
            cursor_x += widget_size.x + self.spacing;
        }

        Vec2::new(self.size_hint().x, ctx.max_size.y)
    }

    fn draw(&self, ui_renderer: &mut UIRenderer) {
        for widget in &self.widgets {
            widget.draw(ui_renderer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ui::widgets::{Button, CanvasSlot, LayoutContext};

    fn layout(widget: &mut dyn Widget, size: Vec2) {
        widget.layout(&LayoutContext {
            max_size: size,
            cursor: Vec2::new(10.0, 20.0),
        });
    }

    #[test]
    fn test_column_stacks_children() {
        let mut column = Column::new(5.0, Alignment::Start, Vec4::new(1.0, 2.0, 3.0, 4.0));
        column.add_widget(CanvasSlot::new(Vec2::new(40.0, 30.0)));
        column.add_widget(Button::new(Vec2::new(20.0, 10.0), Vec4::ONE));
        assert_eq!(column.size_hint(), Vec2::new(44.0, 51.0));

        let size = column.size_hint();
        layout(&mut column, size);
        let slot = find_widget::<CanvasSlot>(&column, &[0]).unwrap();
        assert_eq!(slot.position, Vec2::new(11.0, 22.0));
        let button = find_widget::<Button>(&column, &[1]).unwrap();
        assert_eq!(button.position, Vec2::new(11.0, 57.0));
    }

    #[test]
    fn test_row_centers_children_vertically() {
        let mut row = Row::new(6.0, Alignment::Center, Vec4::ZERO);
        row.add_widget(CanvasSlot::new(Vec2::new(30.0, 30.0)));
        row.add_widget(Button::new(Vec2::new(50.0, 10.0), Vec4::ONE));
        assert_eq!(row.size_hint(), Vec2::new(86.0, 30.0));

        let size = row.size_hint();
        layout(&mut row, size);
        let button = find_widget::<Button>(&row, &[1]).unwrap();
        assert_eq!(button.position, Vec2::new(46.0, 30.0));
    }

    #[test]
    fn test_find_widget_walks_nested_containers() {
        let mut row = Row::new(0.0, Alignment::Start, Vec4::ZERO);
        row.add_widget(Button::new(Vec2::splat(8.0), Vec4::ONE));
        let mut column = Column::new(0.0, Alignment::Start, Vec4::ZERO);
        column.add_widget(CanvasSlot::new(Vec2::splat(4.0)));
        column.add_widget(row);

        assert!(find_widget::<Button>(&column, &[1, 0]).is_some());
        assert!(find_widget::<Button>(&column, &[0]).is_none());
        assert!(find_widget::<Button>(&column, &[1, 1]).is_none());
        assert!(find_widget::<Button>(&column, &[0, 0]).is_none());
        assert!(find_widget::<CanvasSlot>(&column, &[0]).is_some());

        find_widget_mut::<Button>(&mut column, &[1, 0]).unwrap().color = Vec4::ZERO;
        assert_eq!(find_widget::<Button>(&column, &[1, 0]).unwrap().color, Vec4::ZERO);
    }
}
