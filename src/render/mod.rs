//! Module for anything related to rendering that is not a GL object wrapper.
//!
//! This contains the widget layer drawn around the cube canvases.

pub mod ui;
