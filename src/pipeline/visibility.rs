use crate::domain::listing::BoundingRect;

/// Fully inside the vertical viewport. Horizontal position is ignored.
pub fn is_visible(rect: BoundingRect, viewport_height: f64) -> bool {
    rect.top >= 0.0 && rect.bottom <= viewport_height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fully_inside() {
        assert!(is_visible(BoundingRect::new(10.0, 200.0), 900.0));
    }

    #[test]
    fn edges_are_inclusive() {
        assert!(is_visible(BoundingRect::new(0.0, 900.0), 900.0));
    }

    #[test]
    fn clipped_at_top() {
        assert!(!is_visible(BoundingRect::new(-1.0, 200.0), 900.0));
    }

    #[test]
    fn clipped_at_bottom() {
        assert!(!is_visible(BoundingRect::new(800.0, 900.5), 900.0));
    }

    #[test]
    fn taller_than_viewport_never_visible() {
        assert!(!is_visible(BoundingRect::new(0.0, 1200.0), 900.0));
    }
}
