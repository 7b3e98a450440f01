//! coordview renders an interactive 2D Cartesian coordinate system and
//! draws user-supplied geometric marks against it.
//!
//! The crate is toolkit-agnostic: the host feeds pointer/wheel/key/resize
//! events into a [`Controller`], receives notifications through a
//! [`CoordsysObserver`], and replays the produced [`RenderList`] on its own
//! drawing surface.

#![forbid(unsafe_code)]

pub mod axis;
pub mod controller;
pub mod coordsys;
pub mod error;
pub mod geom;
pub mod model;
pub mod render;
pub mod style;

pub use axis::{Axis, AxisRange, DeviceExtent, Direction, Scaling, TickSpec};
pub use controller::{
    Action, AxisLock, Controller, CoordsysObserver, PointerButton, WheelRef,
};
pub use coordsys::Coordsys;
pub use error::AxisError;
pub use geom::{DevicePoint, DeviceRect, Point};
pub use model::{ItemId, LineMark, Model, PointMark, Symbol, Vector, VectorMark};
pub use render::{
    Color, LineKind, LineSegment, LineStyle, RectStyle, RenderCommand, RenderList, TextAlign,
    TextStyle,
};
pub use style::Theme;
