//! Drawable objects: shapes and scene composites.

mod scene;
mod shape;

pub use self::scene::*;
pub use self::shape::*;

use euclid::Rect;
use std::fmt;
use std::ops;

/// A paint operation error.
#[derive(Fail, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintError {
    /// The object being operated on is missing or corrupted.
    ///
    /// Never produced by this crate: exclusive ownership makes a dangling
    /// or shared state record unrepresentable. Available to embedders that
    /// layer their own state checks on top.
    #[fail(display = "paint state is corrupted")]
    CorruptedState,

    /// An argument did not satisfy the operation's preconditions.
    #[fail(display = "invalid argument")]
    InvalidArgument,

    /// The requested value is degenerate or indistinguishable from the
    /// current one; nothing was changed. Benign, not a hard failure.
    #[fail(display = "value was not applied")]
    NotApplied,

    /// The query has no meaningful result on the current geometry.
    #[fail(display = "insufficient condition")]
    InsufficientCondition,

    /// Memory for the operation could not be allocated.
    ///
    /// Never produced by this crate: growth goes through [Vec], where
    /// allocation exhaustion aborts rather than returns. Available to
    /// embedders with fallible allocators.
    #[fail(display = "allocation failed")]
    FailedAllocation,
}

pub type PaintResult<T> = Result<T, PaintError>;

/// Categories of drawable state that changed since a renderer last consumed
/// them.
///
/// The core only ever sets flags; clearing them after consumption is the
/// renderer's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UpdateFlags(u8);

impl UpdateFlags {
    /// No pending changes.
    pub const NONE: UpdateFlags = UpdateFlags(0);
    /// Path geometry was edited.
    pub const PATH: UpdateFlags = UpdateFlags(1 << 0);
    /// The fill color changed.
    pub const FILL: UpdateFlags = UpdateFlags(1 << 1);
    /// Scale, rotation or translation changed.
    pub const TRANSFORM: UpdateFlags = UpdateFlags(1 << 2);

    /// Returns true if all flags in `other` are set.
    pub fn contains(self, other: UpdateFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if no flags are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl ops::BitOr for UpdateFlags {
    type Output = UpdateFlags;
    fn bitor(self, rhs: UpdateFlags) -> UpdateFlags {
        UpdateFlags(self.0 | rhs.0)
    }
}

impl ops::BitOrAssign for UpdateFlags {
    fn bitor_assign(&mut self, rhs: UpdateFlags) {
        self.0 |= rhs.0;
    }
}

/// A drawable object: holds geometry, accepts transforms, and reports
/// bounds.
///
/// Implemented by [Shape] and [Scene]; since a scene owns boxed drawables,
/// scenes may nest to arbitrary depth.
pub trait Drawable: fmt::Debug {
    /// Computes the axis-aligned bounding box of this drawable's geometry.
    fn bounds(&self) -> PaintResult<Rect<f32>>;

    /// Sets the uniform scale factor.
    fn set_scale(&mut self, factor: f32) -> PaintResult<()>;

    /// Sets the rotation angle in degrees.
    fn set_rotation(&mut self, degree: f32) -> PaintResult<()>;

    /// Sets the translation offset.
    fn set_translation(&mut self, dx: f32, dy: f32) -> PaintResult<()>;
}

#[test]
fn update_flag_ops() {
    let mut flags = UpdateFlags::NONE;
    assert!(flags.is_empty());

    flags |= UpdateFlags::PATH;
    flags |= UpdateFlags::FILL;
    assert!(flags.contains(UpdateFlags::PATH));
    assert!(flags.contains(UpdateFlags::FILL));
    assert!(!flags.contains(UpdateFlags::TRANSFORM));
    assert!(flags.contains(UpdateFlags::PATH | UpdateFlags::FILL));
    assert!(!flags.contains(UpdateFlags::PATH | UpdateFlags::TRANSFORM));
}
