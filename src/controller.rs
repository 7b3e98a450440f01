//! Interaction controller: gestures, undo history, and notifications.
//!
//! The controller consumes host input events as plain method calls carrying
//! primitive device coordinates, translates them into coordinate-system
//! adjustments, and reports state changes through an injected
//! [`CoordsysObserver`]. It owns the active [`Coordsys`], the geometry
//! models, and the undo history of pre-gesture snapshots. Every event
//! handler returns whether the host should repaint.

use log::{debug, warn};

use crate::axis::{AxisRange, Direction, Scaling};
use crate::coordsys::Coordsys;
use crate::geom::{DevicePoint, DeviceRect};
use crate::model::Model;
use crate::render::{RenderCommand, RenderList};
use crate::style::Theme;

/// Maximum number of undo snapshots retained; the oldest is dropped first.
const MAX_UNDO_DEPTH: usize = 64;

/// Fraction of the pointer-to-bound distance scaled per wheel tick.
const WHEEL_TICK_SCALE: f64 = 0.0025;

/// Gesture currently in effect. Actions are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Secondary-button drag shifting the visible window.
    Pan,
    /// Primary-button drag selecting a zoom rectangle.
    Zoom,
    /// Incremental wheel zoom around the pointer.
    WheelZoom,
}

/// Restriction of gestures to a single axis.
///
/// The lock active when a gesture begins applies for that gesture's whole
/// duration; changing it mid-drag only affects later gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisLock {
    /// Gestures affect both axes.
    #[default]
    Both,
    /// Gestures affect only the x axis.
    XOnly,
    /// Gestures affect only the y axis.
    YOnly,
}

/// Pointer button identity as mapped by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Starts the zoom-rectangle gesture.
    Primary,
    /// Starts the pan gesture.
    Secondary,
}

/// Notifications produced by the controller.
///
/// All methods default to no-ops so presenters implement only what they
/// show. Values are re-emitted on events; consumers are expected to redraw
/// only on actual value change.
pub trait CoordsysObserver {
    /// Pointer moved; `x`/`y` are data-space positions in natural units.
    fn pointer_moved(&mut self, hot: bool, x: f64, y: f64) {
        let _ = (hot, x, y);
    }

    /// Current action or axis lock changed.
    fn action_changed(&mut self, action: Action, lock: AxisLock) {
        let _ = (action, lock);
    }

    /// Undo stack depth changed.
    fn undo_depth_changed(&mut self, depth: usize) {
        let _ = depth;
    }

    /// A different geometry model became active.
    fn model_label_changed(&mut self, label: &str) {
        let _ = label;
    }

    /// An axis switched scaling mode.
    fn scaling_changed(&mut self, direction: Direction, scaling: Scaling) {
        let _ = (direction, scaling);
    }
}

/// Range and delta captured when a wheel gesture starts.
///
/// Presentation reference only; the rescaling math anchors to the
/// construction-time target ratios stored in [`Coordsys`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelRef {
    /// X range at gesture start.
    pub x_range: AxisRange,
    /// Y range at gesture start.
    pub y_range: AxisRange,
    /// X major delta at gesture start.
    pub x_delta: f64,
    /// Y major delta at gesture start.
    pub y_delta: f64,
}

#[derive(Debug, Clone, Default)]
struct InteractionState {
    action: Action,
    lock: AxisLock,
    gesture_lock: AxisLock,
    pointer: DevicePoint,
    hot_pointer: DevicePoint,
    hot: bool,
    zoom_anchor: DevicePoint,
    wheel_ref: Option<WheelRef>,
}

/// Gesture state machine driving a [`Coordsys`] and its geometry models.
#[derive(Debug, Clone)]
pub struct Controller {
    cs: Coordsys,
    models: Vec<Model>,
    active_model: usize,
    history: Vec<Coordsys>,
    state: InteractionState,
    device_width: i32,
    device_height: i32,
}

impl Controller {
    /// Create a controller over one geometry model.
    pub fn new(cs: Coordsys, model: Model) -> Self {
        Self::with_models(cs, vec![model])
    }

    /// Create a controller that can switch between several models.
    ///
    /// An empty list is replaced by a single empty model.
    pub fn with_models(cs: Coordsys, mut models: Vec<Model>) -> Self {
        if models.is_empty() {
            models.push(Model::new());
        }
        let device_width = cs.x().extent().total_size;
        let device_height = cs.y().extent().total_size;
        Self {
            cs,
            models,
            active_model: 0,
            history: Vec::new(),
            state: InteractionState::default(),
            device_width,
            device_height,
        }
    }

    /// Access the current coordinate system.
    pub fn coordsys(&self) -> &Coordsys {
        &self.cs
    }

    /// Access the active geometry model.
    pub fn model(&self) -> &Model {
        &self.models[self.active_model]
    }

    /// Access the active geometry model mutably.
    pub fn model_mut(&mut self) -> &mut Model {
        &mut self.models[self.active_model]
    }

    /// Access all geometry models.
    pub fn models(&self) -> &[Model] {
        &self.models
    }

    /// Index of the active geometry model.
    pub fn active_model(&self) -> usize {
        self.active_model
    }

    /// Append a geometry model; returns its index.
    pub fn add_model(&mut self, model: Model) -> usize {
        self.models.push(model);
        self.models.len() - 1
    }

    /// Current undo stack depth.
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    /// Gesture currently in effect.
    pub fn action(&self) -> Action {
        self.state.action
    }

    /// Axis lock that will apply to the next gesture.
    pub fn axis_lock(&self) -> AxisLock {
        self.state.lock
    }

    /// Whether the pointer is inside the data area.
    pub fn hot(&self) -> bool {
        self.state.hot
    }

    /// Wheel-gesture reference state, while a wheel gesture is active.
    pub fn wheel_ref(&self) -> Option<WheelRef> {
        self.state.wheel_ref
    }

    /// Handle a pointer move to device position `(nx, ny)`.
    pub fn on_pointer_move(
        &mut self,
        nx: i32,
        ny: i32,
        observer: &mut dyn CoordsysObserver,
    ) -> bool {
        let position = DevicePoint::new(nx, ny);
        if position == self.state.pointer {
            return false;
        }

        let x_scaled = self.cs.x().device_to_scaled(nx);
        let y_scaled = self.cs.y().device_to_scaled(ny);
        let hot = self.cs.x().range().contains(x_scaled) && self.cs.y().range().contains(y_scaled);
        self.state.hot = hot;
        observer.pointer_moved(
            hot,
            self.cs.x().device_to_unscaled(nx),
            self.cs.y().device_to_unscaled(ny),
        );

        self.state.hot_pointer = self.clamp_to_plot(position);

        let mut redraw = false;
        if self.state.action == Action::Pan && hot {
            let previous = self.state.pointer;
            let dx = x_scaled - self.cs.x().device_to_scaled(previous.x);
            let dy = y_scaled - self.cs.y().device_to_scaled(previous.y);
            let (dx, dy) = match self.state.gesture_lock {
                AxisLock::Both => (dx, dy),
                AxisLock::XOnly => (dx, 0.0),
                AxisLock::YOnly => (0.0, dy),
            };
            match self.cs.panned_by(dx, dy) {
                Ok(next) => self.cs = next,
                Err(err) => warn!("pan step rejected: {err}"),
            }
            redraw = true;
        }

        self.state.pointer = position;

        // repaint tracks the rubber band even outside the hot area
        if self.state.action == Action::Zoom {
            redraw = true;
        }
        redraw
    }

    /// Handle a pointer button press at device position `(nx, ny)`.
    pub fn on_pointer_press(
        &mut self,
        button: PointerButton,
        nx: i32,
        ny: i32,
        observer: &mut dyn CoordsysObserver,
    ) -> bool {
        if !self.state.hot || self.state.action != Action::Idle {
            return false;
        }
        match button {
            PointerButton::Primary => {
                self.state.action = Action::Zoom;
                self.state.gesture_lock = self.state.lock;
                self.state.zoom_anchor = DevicePoint::new(nx, ny);
                observer.action_changed(Action::Zoom, self.state.lock);
                debug!("zoom gesture started at ({nx}, {ny})");
            }
            PointerButton::Secondary => {
                self.state.action = Action::Pan;
                self.state.gesture_lock = self.state.lock;
                // no natural commit point: snapshot before the first step;
                // depth is reported at gesture end
                self.push_history();
                observer.action_changed(Action::Pan, self.state.lock);
                debug!("pan gesture started");
            }
        }
        true
    }

    /// Handle a pointer button release.
    pub fn on_pointer_release(
        &mut self,
        button: PointerButton,
        observer: &mut dyn CoordsysObserver,
    ) -> bool {
        match (button, self.state.action) {
            (PointerButton::Primary, Action::Zoom) => {
                self.state.action = Action::Idle;
                observer.action_changed(Action::Idle, self.state.lock);
                self.commit_zoom(observer);
                true
            }
            (PointerButton::Secondary, Action::Pan) => {
                self.state.action = Action::Idle;
                observer.action_changed(Action::Idle, self.state.lock);
                observer.undo_depth_changed(self.history.len());
                debug!("pan gesture ended");
                true
            }
            _ => false,
        }
    }

    fn commit_zoom(&mut self, observer: &mut dyn CoordsysObserver) {
        let anchor = self.state.zoom_anchor;
        let current = self.state.hot_pointer;

        let ax = self.cs.x().device_to_scaled(anchor.x);
        let cx = self.cs.x().device_to_scaled(current.x);
        let ay = self.cs.y().device_to_scaled(anchor.y);
        let cy = self.cs.y().device_to_scaled(current.y);

        let (x_min, x_max) = (ax.min(cx), ax.max(cx));
        let (y_min, y_max) = (ay.min(cy), ay.max(cy));
        if x_min == x_max || y_min == y_max {
            debug!("degenerate zoom rectangle ignored");
            return;
        }

        let x_range = match self.state.gesture_lock {
            AxisLock::YOnly => self.cs.x().range(),
            _ => AxisRange::new(x_min, x_max),
        };
        let y_range = match self.state.gesture_lock {
            AxisLock::XOnly => self.cs.y().range(),
            _ => AxisRange::new(y_min, y_max),
        };

        self.push_history();
        observer.undo_depth_changed(self.history.len());
        match self.cs.zoomed_to(x_range, y_range) {
            Ok(next) => self.cs = next,
            Err(err) => {
                warn!("zoom rejected: {err}");
                self.history.pop();
                observer.undo_depth_changed(self.history.len());
            }
        }
    }

    /// Handle a wheel event; positive ticks zoom in.
    ///
    /// The first non-zero event while idle and hot starts the wheel gesture
    /// (snapshot + reference capture); the host reports gesture end through
    /// [`Controller::on_wheel_ended`].
    pub fn on_wheel(&mut self, ticks: i32, observer: &mut dyn CoordsysObserver) -> bool {
        if ticks == 0 || !self.state.hot {
            return false;
        }

        if self.state.action == Action::Idle {
            self.state.action = Action::WheelZoom;
            self.state.gesture_lock = self.state.lock;
            self.state.wheel_ref = Some(WheelRef {
                x_range: self.cs.x().range(),
                y_range: self.cs.y().range(),
                x_delta: self.cs.x().major_delta(),
                y_delta: self.cs.y().major_delta(),
            });
            self.push_history();
            observer.action_changed(Action::WheelZoom, self.state.lock);
            observer.undo_depth_changed(self.history.len());
            debug!("wheel zoom gesture started");
        }
        if self.state.action != Action::WheelZoom {
            return false;
        }

        // scale the pointer-to-bound distances around the pointer position
        let scale = 1.0 - WHEEL_TICK_SCALE * f64::from(ticks);
        let pointer = self.state.hot_pointer;
        let px = self.cs.x().device_to_scaled(pointer.x);
        let py = self.cs.y().device_to_scaled(pointer.y);
        let x_current = self.cs.x().range();
        let y_current = self.cs.y().range();

        let x_range = match self.state.gesture_lock {
            AxisLock::YOnly => x_current,
            _ => AxisRange::new(
                px - scale * (px - x_current.min),
                px + scale * (x_current.max - px),
            ),
        };
        let y_range = match self.state.gesture_lock {
            AxisLock::XOnly => y_current,
            _ => AxisRange::new(
                py - scale * (py - y_current.min),
                py + scale * (y_current.max - py),
            ),
        };

        match self.cs.wheel_zoomed_to(x_range, y_range) {
            Ok(next) => self.cs = next,
            Err(err) => warn!("wheel zoom step rejected: {err}"),
        }
        true
    }

    /// Handle the host-reported end of a wheel gesture.
    pub fn on_wheel_ended(&mut self, observer: &mut dyn CoordsysObserver) -> bool {
        if self.state.action != Action::WheelZoom {
            return false;
        }
        self.state.action = Action::Idle;
        self.state.wheel_ref = None;
        observer.action_changed(Action::Idle, self.state.lock);
        debug!("wheel zoom gesture ended");
        true
    }

    /// Change the axis lock applied to subsequent gestures.
    pub fn set_axis_lock(&mut self, lock: AxisLock, observer: &mut dyn CoordsysObserver) {
        if lock != self.state.lock {
            self.state.lock = lock;
            observer.action_changed(self.state.action, lock);
        }
    }

    /// Undo the most recent completed pan/zoom/wheel-zoom.
    ///
    /// Restores the popped snapshot re-fitted to the current device size (a
    /// snapshot may predate a resize). A no-op while a gesture is active or
    /// when the history is empty.
    pub fn on_undo(&mut self, observer: &mut dyn CoordsysObserver) -> bool {
        if self.state.action != Action::Idle {
            return false;
        }
        let Some(snapshot) = self.history.pop() else {
            return false;
        };
        self.cs = snapshot;
        match self.cs.resized_to(self.device_width, self.device_height) {
            Ok(next) => self.cs = next,
            Err(err) => warn!("undo re-fit to current size rejected: {err}"),
        }
        debug!("undo: restored snapshot, {} left", self.history.len());
        observer.undo_depth_changed(self.history.len());
        true
    }

    /// Handle a device resize.
    pub fn on_resize(&mut self, width: i32, height: i32) -> bool {
        if width == self.device_width && height == self.device_height {
            return false;
        }
        self.device_width = width;
        self.device_height = height;
        match self.cs.resized_to(width, height) {
            Ok(next) => {
                self.cs = next;
                true
            }
            Err(err) => {
                warn!("resize to {width}x{height} rejected: {err}");
                false
            }
        }
    }

    /// Switch an axis to a different scaling mode.
    ///
    /// The stored range is reinterpreted in the new mode's scaled units;
    /// target tick ratios are re-captured for the rebuilt pair.
    pub fn set_scaling(
        &mut self,
        direction: Direction,
        scaling: Scaling,
        observer: &mut dyn CoordsysObserver,
    ) -> bool {
        let axis = match direction {
            Direction::Horizontal => self.cs.x(),
            Direction::Vertical => self.cs.y(),
        };
        if axis.scaling() == scaling {
            return false;
        }
        match axis.with_scaling(scaling) {
            Ok(rebuilt) => {
                let (x, y) = match direction {
                    Direction::Horizontal => (rebuilt, self.cs.y().clone()),
                    Direction::Vertical => (self.cs.x().clone(), rebuilt),
                };
                self.cs = Coordsys::new(x, y, self.cs.title().to_string());
                observer.scaling_changed(direction, scaling);
                true
            }
            Err(err) => {
                warn!("scaling switch rejected: {err}");
                false
            }
        }
    }

    /// Make the model at `index` active and report its label.
    ///
    /// Out-of-range indices are ignored.
    pub fn switch_to_model(&mut self, index: usize, observer: &mut dyn CoordsysObserver) -> bool {
        if index >= self.models.len() {
            return false;
        }
        self.active_model = index;
        observer.model_label_changed(self.models[index].label());
        true
    }

    /// Emit the full frame: coordinate system, active model, zoom overlay.
    pub fn render(&self, list: &mut RenderList, theme: &Theme) {
        self.cs.draw(list, theme);
        self.models[self.active_model].draw(list, &self.cs);
        if self.state.action == Action::Zoom {
            list.push(RenderCommand::Rect {
                rect: self.zoom_rect(),
                style: theme.zoom_rect,
            });
        }
        list.push(RenderCommand::ClipEnd);
    }

    fn zoom_rect(&self) -> DeviceRect {
        let plot = self.cs.plot_rect();
        let anchor = self.state.zoom_anchor;
        let current = self.state.hot_pointer;
        match self.state.gesture_lock {
            AxisLock::Both => DeviceRect::from_corners(anchor, current),
            AxisLock::XOnly => DeviceRect::from_corners(
                DevicePoint::new(anchor.x, plot.min.y),
                DevicePoint::new(current.x, plot.max.y),
            ),
            AxisLock::YOnly => DeviceRect::from_corners(
                DevicePoint::new(plot.min.x, anchor.y),
                DevicePoint::new(plot.max.x, current.y),
            ),
        }
    }

    fn clamp_to_plot(&self, position: DevicePoint) -> DevicePoint {
        let plot = self.cs.plot_rect();
        DevicePoint::new(
            position.x.clamp(plot.min.x, plot.max.x),
            position.y.clamp(plot.min.y, plot.max.y),
        )
    }

    fn push_history(&mut self) {
        if self.history.len() == MAX_UNDO_DEPTH {
            self.history.remove(0);
        }
        self.history.push(self.cs.clone());
    }
}
