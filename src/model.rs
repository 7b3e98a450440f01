//! Geometry model: user-supplied marks drawn against a coordinate system.
//!
//! The model owns points, polylines, and vectors together with their visual
//! styling. Drawing places every active item through the axes' natural-unit
//! transforms; it never mutates the coordinate system. Values a scale cannot
//! map (non-positive input on a log axis) are skipped.

use crate::coordsys::Coordsys;
use crate::geom::{DevicePoint, Point};
use crate::render::{Color, LineSegment, LineStyle, RenderCommand, RenderList};

/// Marker symbol for point marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Symbol {
    /// Upright cross.
    #[default]
    Plus,
    /// Diagonal cross.
    Cross,
    /// Circle outline.
    Circle,
    /// Square outline.
    Square,
}

/// Styling for a marked point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMark {
    /// Marker symbol.
    pub symbol: Symbol,
    /// Characteristic symbol size in pixels.
    pub size: i32,
    /// Stroke styling.
    pub style: LineStyle,
    /// User-provided group tag for selection.
    pub group: i32,
}

impl Default for PointMark {
    fn default() -> Self {
        Self {
            symbol: Symbol::Plus,
            size: 3,
            style: LineStyle {
                color: Color::new(0.0, 0.0, 1.0, 1.0),
                width: 2.0,
                ..LineStyle::default()
            },
            group: 0,
        }
    }
}

/// Styling for a polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMark {
    /// Stroke styling.
    pub style: LineStyle,
    /// Also add point marks along the line.
    pub mark_points: bool,
    /// Mark every n-th point (1 marks all points).
    pub every: usize,
    /// Styling for the per-point marks.
    pub point_mark: PointMark,
    /// User-provided group tag for selection.
    pub group: i32,
}

impl Default for LineMark {
    fn default() -> Self {
        Self {
            style: LineStyle::default(),
            mark_points: false,
            every: 1,
            point_mark: PointMark::default(),
            group: 0,
        }
    }
}

/// Styling for a vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorMark {
    /// Stroke styling.
    pub style: LineStyle,
    /// User-provided group tag for selection.
    pub group: i32,
}

impl Default for VectorMark {
    fn default() -> Self {
        Self {
            style: LineStyle::default(),
            group: 0,
        }
    }
}

/// A directed segment; a `from` of `(0, 0)` reads as a position vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    /// Tail point in natural units.
    pub from: Point,
    /// Head point in natural units.
    pub to: Point,
}

impl Vector {
    /// Create a vector between two points.
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }
}

/// Unique identifier of an item within one model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(u64);

#[derive(Debug, Clone, Copy)]
struct ItemMeta {
    id: ItemId,
    linked_to: Option<ItemId>,
    active: bool,
}

impl ItemMeta {
    fn new(id: ItemId) -> Self {
        Self {
            id,
            linked_to: None,
            active: true,
        }
    }

    fn linked(id: ItemId, to: ItemId) -> Self {
        Self {
            id,
            linked_to: Some(to),
            active: true,
        }
    }
}

/// Store of user marks for one view of the coordinate system.
///
/// Items at the same index of the data/mark/meta vectors belong together.
#[derive(Debug, Clone, Default)]
pub struct Model {
    next_id: u64,

    points: Vec<Point>,
    point_marks: Vec<PointMark>,
    point_meta: Vec<ItemMeta>,

    lines: Vec<Vec<Point>>,
    line_marks: Vec<LineMark>,
    line_meta: Vec<ItemMeta>,

    vectors: Vec<Vector>,
    vector_marks: Vec<VectorMark>,
    vector_meta: Vec<ItemMeta>,

    label: String,
}

impl Model {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc_id(&mut self) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a single point.
    pub fn add_point(&mut self, point: Point, mark: PointMark) -> ItemId {
        let id = self.alloc_id();
        self.points.push(point);
        self.point_marks.push(mark);
        self.point_meta.push(ItemMeta::new(id));
        id
    }

    /// Add a polyline.
    ///
    /// With [`LineMark::mark_points`] set, every n-th point of the line also
    /// receives a point mark linked to the line's id.
    pub fn add_line(&mut self, points: Vec<Point>, mark: LineMark) -> ItemId {
        let id = self.alloc_id();
        if mark.mark_points {
            for point in points.iter().copied().step_by(mark.every.max(1)) {
                let point_id = self.alloc_id();
                self.points.push(point);
                self.point_marks.push(mark.point_mark);
                self.point_meta.push(ItemMeta::linked(point_id, id));
            }
        }
        self.lines.push(points);
        self.line_marks.push(mark);
        self.line_meta.push(ItemMeta::new(id));
        id
    }

    /// Add a vector.
    pub fn add_vector(&mut self, vector: Vector, mark: VectorMark) -> ItemId {
        let id = self.alloc_id();
        self.vectors.push(vector);
        self.vector_marks.push(mark);
        self.vector_meta.push(ItemMeta::new(id));
        id
    }

    /// Show or hide an item (and the items linked to it).
    ///
    /// Returns whether the id was found.
    pub fn set_active(&mut self, id: ItemId, active: bool) -> bool {
        let mut found = false;
        for meta in self
            .point_meta
            .iter_mut()
            .chain(self.line_meta.iter_mut())
            .chain(self.vector_meta.iter_mut())
        {
            if meta.id == id || meta.linked_to == Some(id) {
                meta.active = active;
                found = true;
            }
        }
        found
    }

    /// Access the model label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Set the model label (e.g. a time-stamp description).
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Reset to the empty state for reuse.
    pub fn clear(&mut self) {
        self.next_id = 0;
        self.points.clear();
        self.point_marks.clear();
        self.point_meta.clear();
        self.lines.clear();
        self.line_marks.clear();
        self.line_meta.clear();
        self.vectors.clear();
        self.vector_marks.clear();
        self.vector_meta.clear();
        self.label.clear();
    }

    /// Draw all active items against the given coordinate system.
    ///
    /// Order keeps point marks on top: vectors, then lines, then points.
    pub fn draw(&self, list: &mut RenderList, cs: &Coordsys) {
        for ((vector, mark), meta) in self
            .vectors
            .iter()
            .zip(&self.vector_marks)
            .zip(&self.vector_meta)
        {
            if !meta.active {
                continue;
            }
            if let (Some(from), Some(to)) = (
                device_point(cs, vector.from),
                device_point(cs, vector.to),
            ) {
                list.push_line(from, to, mark.style);
            }
        }

        for ((points, mark), meta) in self.lines.iter().zip(&self.line_marks).zip(&self.line_meta)
        {
            if !meta.active {
                continue;
            }
            let mut segments = Vec::new();
            for window in points.windows(2) {
                if let (Some(start), Some(end)) =
                    (device_point(cs, window[0]), device_point(cs, window[1]))
                {
                    segments.push(LineSegment::new(start, end));
                }
            }
            if !segments.is_empty() {
                list.push(RenderCommand::LineSegments {
                    segments,
                    style: mark.style,
                });
            }
        }

        for ((point, mark), meta) in self
            .points
            .iter()
            .zip(&self.point_marks)
            .zip(&self.point_meta)
        {
            if !meta.active {
                continue;
            }
            if let Some(center) = device_point(cs, *point) {
                draw_symbol(list, center, mark);
            }
        }
    }
}

fn device_point(cs: &Coordsys, point: Point) -> Option<DevicePoint> {
    let x = cs.x().unscaled_to_device(point.x)?;
    let y = cs.y().unscaled_to_device(point.y)?;
    Some(DevicePoint::new(x, y))
}

fn draw_symbol(list: &mut RenderList, center: DevicePoint, mark: &PointMark) {
    let DevicePoint { x, y } = center;
    let s = mark.size;
    match mark.symbol {
        Symbol::Plus => {
            list.push(RenderCommand::LineSegments {
                segments: vec![
                    LineSegment::new(DevicePoint::new(x - s, y), DevicePoint::new(x + s, y)),
                    LineSegment::new(DevicePoint::new(x, y - s), DevicePoint::new(x, y + s)),
                ],
                style: mark.style,
            });
        }
        Symbol::Cross => {
            list.push(RenderCommand::LineSegments {
                segments: vec![
                    LineSegment::new(
                        DevicePoint::new(x - s, y - s),
                        DevicePoint::new(x + s, y + s),
                    ),
                    LineSegment::new(
                        DevicePoint::new(x - s, y + s),
                        DevicePoint::new(x + s, y - s),
                    ),
                ],
                style: mark.style,
            });
        }
        Symbol::Circle => {
            list.push(RenderCommand::Circle {
                center,
                radius: s,
                style: mark.style,
            });
        }
        Symbol::Square => {
            list.push(RenderCommand::LineSegments {
                segments: vec![
                    LineSegment::new(
                        DevicePoint::new(x - s, y - s),
                        DevicePoint::new(x + s, y - s),
                    ),
                    LineSegment::new(
                        DevicePoint::new(x + s, y - s),
                        DevicePoint::new(x + s, y + s),
                    ),
                    LineSegment::new(
                        DevicePoint::new(x + s, y + s),
                        DevicePoint::new(x - s, y + s),
                    ),
                    LineSegment::new(
                        DevicePoint::new(x - s, y + s),
                        DevicePoint::new(x - s, y - s),
                    ),
                ],
                style: mark.style,
            });
        }
    }
}
