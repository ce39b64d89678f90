use crate::paint::{Drawable, PaintError, PaintResult};
use cgmath::{Vector2, Zero};
use euclid::{Point2D, Rect, Size2D};
use std::f32::{EPSILON, INFINITY, NEG_INFINITY};

/// An ordered composite of owned drawables.
///
/// Child order defines the back-to-front paint order. Children are owned
/// exclusively: pushing a drawable moves it into the scene, and dropping
/// the scene drops every child with it. The scene's own transform composes
/// externally on top of each child's transform; children are never mutated
/// by scene transforms.
#[derive(Debug)]
pub struct Scene {
    children: Vec<Box<dyn Drawable>>,
    scale: f32,
    rotation: f32,
    translation: Vector2<f32>,
}

impl Scene {
    /// Creates an empty scene with an identity transform.
    pub fn new() -> Scene {
        Scene {
            children: Vec::new(),
            scale: 1.,
            rotation: 0.,
            translation: Vector2::zero(),
        }
    }

    /// Takes ownership of a drawable and appends it at the back of the
    /// paint order.
    pub fn push(&mut self, drawable: Box<dyn Drawable>) -> PaintResult<()> {
        self.children.push(drawable);
        Ok(())
    }

    /// Reserves capacity for additional children (performance hint).
    pub fn reserve(&mut self, n: usize) {
        self.children.reserve(n);
    }

    /// Returns the number of children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns true if the scene has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
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

    /// Maps an axis-aligned box through the scene transform (scale, then
    /// rotation, then translation) and refolds the corners into an
    /// axis-aligned box.
    fn map_box(&self, b: Rect<f32>) -> Rect<f32> {
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        let corners = [
            (b.min_x(), b.min_y()),
            (b.max_x(), b.min_y()),
            (b.max_x(), b.max_y()),
            (b.min_x(), b.max_y()),
        ];

        let (mut min_x, mut min_y) = (INFINITY, INFINITY);
        let (mut max_x, mut max_y) = (NEG_INFINITY, NEG_INFINITY);
        for &(x, y) in &corners {
            let (sx, sy) = (x * self.scale, y * self.scale);
            let px = sx * cos - sy * sin + self.translation.x;
            let py = sx * sin + sy * cos + self.translation.y;
            min_x = min_x.min(px);
            min_y = min_y.min(py);
            max_x = max_x.max(px);
            max_y = max_y.max(py);
        }

        Rect::new(
            Point2D::new(min_x, min_y),
            Size2D::new(max_x - min_x, max_y - min_y),
        )
    }
}

impl Drawable for Scene {
    /// Computes the union bounding box over all children, recursing into
    /// nested scenes, under the scene's own transform.
    ///
    /// Children without meaningful geometry are skipped; if none is left,
    /// the query reports an insufficient condition. The coordinates are
    /// folded directly so that a zero-size child box (a path that is a
    /// single point) still extends the union.
    fn bounds(&self) -> PaintResult<Rect<f32>> {
        let (mut min_x, mut min_y) = (INFINITY, INFINITY);
        let (mut max_x, mut max_y) = (NEG_INFINITY, NEG_INFINITY);
        let mut has_bounds = false;
        for child in &self.children {
            let child_bounds = match child.bounds() {
                Ok(b) => b,
                Err(PaintError::InsufficientCondition) => continue,
                Err(e) => return Err(e),
            };
            has_bounds = true;
            min_x = min_x.min(child_bounds.min_x());
            min_y = min_y.min(child_bounds.min_y());
            max_x = max_x.max(child_bounds.max_x());
            max_y = max_y.max(child_bounds.max_y());
        }

        if !has_bounds {
            return Err(PaintError::InsufficientCondition);
        }
        Ok(self.map_box(Rect::new(
            Point2D::new(min_x, min_y),
            Size2D::new(max_x - min_x, max_y - min_y),
        )))
    }

    /// Sets the scene's scale factor, with the same degenerate-value and
    /// no-op rejection as a shape.
    fn set_scale(&mut self, factor: f32) -> PaintResult<()> {
        if factor.abs() < EPSILON || (factor - self.scale).abs() <= EPSILON {
            return Err(PaintError::NotApplied);
        }
        self.scale = factor;
        Ok(())
    }

    /// Sets the scene's rotation angle in degrees.
    fn set_rotation(&mut self, degree: f32) -> PaintResult<()> {
        if (degree - self.rotation).abs() <= EPSILON {
            return Err(PaintError::NotApplied);
        }
        self.rotation = degree;
        Ok(())
    }

    /// Sets the scene's translation offset.
    fn set_translation(&mut self, dx: f32, dy: f32) -> PaintResult<()> {
        if (dx - self.translation.x).abs() <= EPSILON
            && (dy - self.translation.y).abs() <= EPSILON
        {
            return Err(PaintError::NotApplied);
        }
        self.translation = Vector2::new(dx, dy);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Shape;
    use std::cell::Cell;
    use std::rc::Rc;

    fn rect_shape(x: f32, y: f32, w: f32, h: f32) -> Box<Shape> {
        let mut shape = Shape::new();
        shape.append_rect(x, y, w, h, 0.);
        Box::new(shape)
    }

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-4, "{} != {}", a, b);
    }

    #[test]
    fn union_of_overlapping_children() {
        let mut scene = Scene::new();
        scene.reserve(2);
        scene.push(rect_shape(0., 0., 10., 10.)).unwrap();
        scene.push(rect_shape(5., 5., 10., 10.)).unwrap();

        let bounds = scene.bounds().unwrap();
        assert_eq!(
            bounds,
            Rect::new(Point2D::new(0., 0.), Size2D::new(15., 15.))
        );
    }

    #[test]
    fn union_of_disjoint_children() {
        let mut scene = Scene::new();
        scene.push(rect_shape(0., 0., 4., 4.)).unwrap();
        scene.push(rect_shape(10., 10., 2., 2.)).unwrap();

        let bounds = scene.bounds().unwrap();
        assert_eq!(
            bounds,
            Rect::new(Point2D::new(0., 0.), Size2D::new(12., 12.))
        );
    }

    #[test]
    fn zero_size_child_boxes_extend_the_union() {
        // a single-point path reports a meaningful zero-size box, which
        // must widen the union like any other child box
        let mut point = Shape::new();
        point.move_to(100., 100.);

        let mut scene = Scene::new();
        scene.push(Box::new(point)).unwrap();
        scene.push(rect_shape(0., 0., 1., 1.)).unwrap();

        let bounds = scene.bounds().unwrap();
        assert_eq!(
            bounds,
            Rect::new(Point2D::new(0., 0.), Size2D::new(100., 100.))
        );
    }

    #[test]
    fn bounds_recurse_into_nested_scenes() {
        let mut inner = Scene::new();
        inner.push(rect_shape(20., 20., 5., 5.)).unwrap();

        let mut outer = Scene::new();
        outer.push(rect_shape(0., 0., 10., 10.)).unwrap();
        outer.push(Box::new(inner)).unwrap();

        let bounds = outer.bounds().unwrap();
        assert_eq!(
            bounds,
            Rect::new(Point2D::new(0., 0.), Size2D::new(25., 25.))
        );
    }

    #[test]
    fn bounds_without_geometry() {
        let mut scene = Scene::new();
        assert_eq!(scene.bounds(), Err(PaintError::InsufficientCondition));

        // a child with no geometry is not a meaningful box either
        scene.push(Box::new(Shape::new())).unwrap();
        assert_eq!(scene.bounds(), Err(PaintError::InsufficientCondition));
    }

    #[test]
    fn empty_children_are_skipped_in_union() {
        let mut scene = Scene::new();
        scene.push(Box::new(Shape::new())).unwrap();
        scene.push(rect_shape(1., 2., 3., 4.)).unwrap();

        let bounds = scene.bounds().unwrap();
        assert_eq!(bounds, Rect::new(Point2D::new(1., 2.), Size2D::new(3., 4.)));
    }

    #[test]
    fn scene_transform_applies_to_bounds() {
        let mut scene = Scene::new();
        scene.push(rect_shape(1., 1., 2., 2.)).unwrap();

        scene.set_scale(2.).unwrap();
        let bounds = scene.bounds().unwrap();
        assert_eq!(bounds, Rect::new(Point2D::new(2., 2.), Size2D::new(4., 4.)));

        scene.set_translation(10., -1.).unwrap();
        let bounds = scene.bounds().unwrap();
        assert_eq!(
            bounds,
            Rect::new(Point2D::new(12., 1.), Size2D::new(4., 4.))
        );
    }

    #[test]
    fn rotated_bounds_refold_to_aabb() {
        let mut scene = Scene::new();
        scene.push(rect_shape(0., 0., 2., 2.)).unwrap();
        scene.set_rotation(90.).unwrap();

        let bounds = scene.bounds().unwrap();
        assert_close(bounds.origin.x, -2.);
        assert_close(bounds.origin.y, 0.);
        assert_close(bounds.size.width, 2.);
        assert_close(bounds.size.height, 2.);
    }

    #[test]
    fn scene_transform_rejects_noop_sets() {
        let mut scene = Scene::new();
        assert_eq!(scene.set_scale(1.), Err(PaintError::NotApplied));
        assert_eq!(scene.set_scale(0.), Err(PaintError::NotApplied));
        assert_eq!(scene.set_rotation(0.), Err(PaintError::NotApplied));
        assert_eq!(scene.set_translation(0., 0.), Err(PaintError::NotApplied));
        assert_eq!(scene.scale(), 1.);
    }

    #[derive(Debug)]
    struct DropCounter(Rc<Cell<u32>>);

    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    impl Drawable for DropCounter {
        fn bounds(&self) -> PaintResult<Rect<f32>> {
            Err(PaintError::InsufficientCondition)
        }
        fn set_scale(&mut self, _factor: f32) -> PaintResult<()> {
            Ok(())
        }
        fn set_rotation(&mut self, _degree: f32) -> PaintResult<()> {
            Ok(())
        }
        fn set_translation(&mut self, _dx: f32, _dy: f32) -> PaintResult<()> {
            Ok(())
        }
    }

    #[test]
    fn dropping_a_scene_drops_each_child_once() {
        let drops = Rc::new(Cell::new(0));

        let mut inner = Scene::new();
        inner.push(Box::new(DropCounter(drops.clone()))).unwrap();

        let mut scene = Scene::new();
        scene.push(Box::new(DropCounter(drops.clone()))).unwrap();
        scene.push(Box::new(DropCounter(drops.clone()))).unwrap();
        scene.push(Box::new(inner)).unwrap();
        assert_eq!(scene.len(), 3);
        assert_eq!(drops.get(), 0);

        drop(scene);
        assert_eq!(drops.get(), 3);
    }
}
