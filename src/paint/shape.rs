use crate::data::{Color, PathCommand, PathData};
use crate::paint::{Drawable, PaintError, PaintResult, UpdateFlags};
use cgmath::{Vector2, Zero};
use euclid::Rect;
use std::f32::EPSILON;

/// A 2D shape: a vector path with fill and transform attributes.
///
/// Every mutation marks the matching [UpdateFlags] category so a renderer
/// can tell what to re-tessellate or re-composite. Path edits always mark
/// [UpdateFlags::PATH], even when the net geometric effect is empty;
/// dirtiness tracks that an edit was invoked, not that output changed.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    path: PathData,
    fill_color: Color,
    scale: f32,
    rotation: f32,
    translation: Vector2<f32>,
    flags: UpdateFlags,
}

impl Shape {
    /// Creates an empty shape with an identity transform and clear fill.
    pub fn new() -> Shape {
        Shape {
            path: PathData::new(),
            fill_color: Color::CLEAR,
            scale: 1.,
            rotation: 0.,
            translation: Vector2::zero(),
            flags: UpdateFlags::NONE,
        }
    }

    /// Clears the path.
    ///
    /// The shape is marked path-dirty even if the path was already empty.
    pub fn reset(&mut self) {
        self.path.reset();
        self.flags |= UpdateFlags::PATH;
    }

    /// Returns a read-only view of the path command stream.
    pub fn path_commands(&self) -> &[PathCommand] {
        self.path.commands()
    }

    /// Returns a read-only view of the path point stream.
    pub fn path_points(&self) -> &[Vector2<f32>] {
        self.path.points()
    }

    /// Bulk-appends externally built command and point streams.
    ///
    /// Fails without touching the path when the streams do not match up.
    pub fn append_path(
        &mut self,
        cmds: &[PathCommand],
        pts: &[Vector2<f32>],
    ) -> PaintResult<()> {
        self.path.grow(cmds.len(), pts.len());
        if !self.path.append(cmds, pts) {
            return Err(PaintError::InvalidArgument);
        }
        self.flags |= UpdateFlags::PATH;
        Ok(())
    }

    /// Starts a new contour at the given point.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to(x, y);
        self.flags |= UpdateFlags::PATH;
    }

    /// Draws a straight line to the given point.
    pub fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to(x, y);
        self.flags |= UpdateFlags::PATH;
    }

    /// Draws a cubic Bézier curve through two control points to an end point.
    pub fn cubic_to(&mut self, cx1: f32, cy1: f32, cx2: f32, cy2: f32, x: f32, y: f32) {
        self.path.cubic_to(cx1, cy1, cx2, cy2, x, y);
        self.flags |= UpdateFlags::PATH;
    }

    /// Closes the current contour.
    pub fn close(&mut self) {
        self.path.close();
        self.flags |= UpdateFlags::PATH;
    }

    /// Appends an ellipse centered on (cx, cy).
    pub fn append_circle(&mut self, cx: f32, cy: f32, radius_w: f32, radius_h: f32) {
        self.path.append_circle(cx, cy, radius_w, radius_h);
        self.flags |= UpdateFlags::PATH;
    }

    /// Appends a rectangle with optionally rounded corners.
    pub fn append_rect(&mut self, x: f32, y: f32, w: f32, h: f32, corner_radius: f32) {
        self.path.append_rect(x, y, w, h, corner_radius);
        self.flags |= UpdateFlags::PATH;
    }

    /// Sets the fill color. Always succeeds and always marks the fill dirty.
    pub fn fill(&mut self, r: u32, g: u32, b: u32, a: u32) {
        self.fill_color = Color::new(r, g, b, a);
        self.flags |= UpdateFlags::FILL;
    }

    /// Returns the current fill color.
    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    /// Returns the current scale factor.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Returns the current rotation in degrees.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Returns the current translation offset.
    pub fn translation(&self) -> Vector2<f32> {
        self.translation
    }

    /// Returns the pending update flags.
    pub fn update_flags(&self) -> UpdateFlags {
        self.flags
    }

    /// Clears the pending update flags.
    ///
    /// Called by the renderer once it has consumed the changes; the core
    /// never clears flags on its own.
    pub fn clear_update_flags(&mut self) {
        self.flags = UpdateFlags::NONE;
    }
}

impl Drawable for Shape {
    /// Computes the bounding box of the raw path geometry.
    ///
    /// The shape's own transform is not folded in; it is consumed by the
    /// renderer alongside the path.
    fn bounds(&self) -> PaintResult<Rect<f32>> {
        self.path.bounds().ok_or(PaintError::InsufficientCondition)
    }

    /// Sets the uniform scale factor.
    ///
    /// Rejected without any state change when the factor is effectively
    /// zero or indistinguishable from the current factor.
    fn set_scale(&mut self, factor: f32) -> PaintResult<()> {
        if factor.abs() < EPSILON || (factor - self.scale).abs() <= EPSILON {
            return Err(PaintError::NotApplied);
        }
        self.scale = factor;
        self.flags |= UpdateFlags::TRANSFORM;
        Ok(())
    }

    /// Sets the rotation angle in degrees. Any finite angle is acceptable;
    /// only a value indistinguishable from the current one is rejected.
    fn set_rotation(&mut self, degree: f32) -> PaintResult<()> {
        if (degree - self.rotation).abs() <= EPSILON {
            return Err(PaintError::NotApplied);
        }
        self.rotation = degree;
        self.flags |= UpdateFlags::TRANSFORM;
        Ok(())
    }

    /// Sets the translation offset, rejecting a no-op set.
    fn set_translation(&mut self, dx: f32, dy: f32) -> PaintResult<()> {
        if (dx - self.translation.x).abs() <= EPSILON
            && (dy - self.translation.y).abs() <= EPSILON
        {
            return Err(PaintError::NotApplied);
        }
        self.translation = Vector2::new(dx, dy);
        self.flags |= UpdateFlags::TRANSFORM;
        Ok(())
    }
}

#[test]
fn fill_marks_dirty() {
    let mut shape = Shape::new();
    assert!(shape.update_flags().is_empty());

    shape.fill(255, 127, 0, 255);
    assert_eq!(shape.fill_color(), Color::new(255, 127, 0, 255));
    assert!(shape.update_flags().contains(UpdateFlags::FILL));
    assert!(!shape.update_flags().contains(UpdateFlags::PATH));

    // setting the same color again still marks it dirty
    shape.clear_update_flags();
    shape.fill(255, 127, 0, 255);
    assert!(shape.update_flags().contains(UpdateFlags::FILL));
}

#[test]
fn path_edits_mark_dirty() {
    let mut shape = Shape::new();

    // resetting an already empty path is still an edit
    shape.reset();
    assert!(shape.update_flags().contains(UpdateFlags::PATH));

    shape.clear_update_flags();
    shape.append_rect(0., 0., 10., 10., 0.);
    assert!(shape.update_flags().contains(UpdateFlags::PATH));
}

#[test]
fn scale_rejects_noop_and_zero() {
    let mut shape = Shape::new();

    // identical to the current factor
    assert_eq!(shape.set_scale(1.), Err(PaintError::NotApplied));
    assert!(shape.update_flags().is_empty());

    // effectively zero
    assert_eq!(shape.set_scale(0.), Err(PaintError::NotApplied));
    assert_eq!(shape.scale(), 1.);
    assert!(shape.update_flags().is_empty());

    // a materially different factor is applied
    assert_eq!(shape.set_scale(2.5), Ok(()));
    assert_eq!(shape.scale(), 2.5);
    assert!(shape.update_flags().contains(UpdateFlags::TRANSFORM));
}

#[test]
fn rotation_accepts_any_angle() {
    let mut shape = Shape::new();

    assert_eq!(shape.set_rotation(0.), Err(PaintError::NotApplied));
    assert_eq!(shape.set_rotation(720.), Ok(()));
    assert_eq!(shape.rotation(), 720.);
    assert_eq!(shape.set_rotation(-45.), Ok(()));
    assert_eq!(shape.rotation(), -45.);
}

#[test]
fn translation_rejects_noop() {
    let mut shape = Shape::new();

    assert_eq!(shape.set_translation(0., 0.), Err(PaintError::NotApplied));
    assert!(shape.update_flags().is_empty());

    assert_eq!(shape.set_translation(3., -2.), Ok(()));
    assert_eq!(shape.translation(), Vector2::new(3., -2.));
    assert!(shape.update_flags().contains(UpdateFlags::TRANSFORM));
}

#[test]
fn append_path_validates_streams() {
    let mut shape = Shape::new();
    let cmds = [PathCommand::MoveTo, PathCommand::LineTo];
    let pts = [Vector2::new(0., 0.)];

    assert_eq!(shape.append_path(&cmds, &pts), Err(PaintError::InvalidArgument));
    assert!(shape.path_commands().is_empty());
    assert!(shape.update_flags().is_empty());

    let pts = [Vector2::new(0., 0.), Vector2::new(4., 4.)];
    assert_eq!(shape.append_path(&cmds, &pts), Ok(()));
    assert_eq!(shape.path_commands().len(), 2);
    assert!(shape.update_flags().contains(UpdateFlags::PATH));
}

#[test]
fn shape_bounds() {
    let mut shape = Shape::new();
    assert_eq!(shape.bounds(), Err(PaintError::InsufficientCondition));

    shape.append_circle(10., 10., 5., 5.);
    let bounds = shape.bounds().unwrap();
    assert_eq!(bounds.origin.x, 5.);
    assert_eq!(bounds.origin.y, 5.);
    assert_eq!(bounds.size.width, 10.);
    assert_eq!(bounds.size.height, 10.);
}
