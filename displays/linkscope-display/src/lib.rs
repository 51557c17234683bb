//! Display side of Linkscope
//!
//! This crate provides:
//! - `Canvas` trait: the drawing primitives the dashboard needs
//! - `WidgetTree` trait and `WidgetTable`, a flat retained widget layer
//!   (panels, title, navigation and block buttons, input queue)
//! - `Dashboard`: applies panel transitions and refreshes the active
//!   panel from decoded telemetry every tick
//! - `GraphicsCanvas`: a `Canvas` over any RGB565 `DrawTarget`
//!
//! # Screen layout
//!
//! ```text
//!   0 +------------------------------------------+
//!     |                 banner                   |
//!  24 +------------------------------------------+
//!     |                                          |
//!     |              active panel                |
//!     |                                          |
//! 190 +------+----------------------------+------+
//!     |  -   |           title            |  +   |
//! 240 +------+----------------------------+------+
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod canvas;
pub mod dashboard;
pub mod graphics;
pub mod layout;
pub mod panels;
pub mod scope;
pub mod widgets;

#[cfg(test)]
mod fake;

pub use canvas::{Canvas, Color, DisplayError, ImageId, Point, Rect, TextAlign};
pub use dashboard::Dashboard;
pub use graphics::GraphicsCanvas;
pub use widgets::{BlockId, WidgetTable, WidgetTree};
