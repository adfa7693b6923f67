//! Moves one element onto another by computing a translate transform.
//!
//! A [`PositionBinder`] is a one-shot value: the host creates a fresh one
//! for every transition-complete event, seeds it with the offset that is
//! currently applied to the source element, calls [`PositionBinder::recompute`]
//! and reads back [`PositionBinder::transform`]. The measured source rect
//! already includes that applied offset, so the binder backs it out before
//! computing the new delta.

use std::rc::Rc;

use slide_bind_protocol::{Point, Rect, Translate3d, Translation};

/// Anything that can report its current on-screen bounding rectangle.
///
/// Source and target must report in the same coordinate space. For a
/// transformed element the rect reflects the transform, as the DOM does.
pub trait RectProvider {
    fn bounding_rect(&self) -> Rect;
}

impl RectProvider for Rect {
    fn bounding_rect(&self) -> Rect {
        *self
    }
}

impl<T: RectProvider + ?Sized> RectProvider for &T {
    fn bounding_rect(&self) -> Rect {
        (**self).bounding_rect()
    }
}

impl<T: RectProvider + ?Sized> RectProvider for Box<T> {
    fn bounding_rect(&self) -> Rect {
        (**self).bounding_rect()
    }
}

impl<T: RectProvider + ?Sized> RectProvider for Rc<T> {
    fn bounding_rect(&self) -> Rect {
        (**self).bounding_rect()
    }
}

/// Computes the translation that places `source` on top of `target`.
pub struct PositionBinder<'a> {
    source: Option<&'a dyn RectProvider>,
    target: Option<&'a dyn RectProvider>,
    offset: Translation,
}

impl<'a> PositionBinder<'a> {
    /// A binder starting from rest (no offset applied).
    pub fn new(
        source: Option<&'a dyn RectProvider>,
        target: Option<&'a dyn RectProvider>,
    ) -> Self {
        Self::with_offset(source, target, Translation::ZERO)
    }

    /// A binder seeded with the offset currently applied to `source`, so
    /// that repeated synchronizations compose instead of resetting.
    pub fn with_offset(
        source: Option<&'a dyn RectProvider>,
        target: Option<&'a dyn RectProvider>,
        previous: Translation,
    ) -> Self {
        Self {
            source,
            target,
            offset: previous,
        }
    }

    /// Whether both elements are present.
    pub fn is_ready(&self) -> bool {
        self.source.is_some() && self.target.is_some()
    }

    /// Re-measure both elements and update the accumulated offset.
    ///
    /// No-op while either element is absent.
    pub fn recompute(&mut self) {
        let (Some(source), Some(target)) = (self.source, self.target) else {
            log::debug!("binder not ready, keeping offset {:?}", self.offset);
            return;
        };

        let measured = source.bounding_rect().origin();
        let goal = target.bounding_rect().origin();

        // The measured source rect includes the applied offset.
        let rest = Point::new(measured.x - self.offset.x, measured.y - self.offset.y);

        self.offset = Translation::new(goal.x - rest.x, goal.y - rest.y);
    }

    /// Return to rest without measuring anything.
    pub fn reset(&mut self) {
        self.offset = Translation::ZERO;
    }

    pub fn offset(&self) -> Translation {
        self.offset
    }

    /// The transform to apply to the source element. Depends only on the
    /// accumulated offset.
    pub fn transform(&self) -> Translate3d {
        Translate3d::from(self.offset)
    }
}
