// src/types/bounds.rs

use crate::types::Point;

/// 2D Bounding Box (Axis-Aligned Bounding Box)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2D {
    pub min: Point,
    pub max: Point,
}

impl Bounds2D {
    /// Erstellt eine Bounding Box die alle Punkte umschließt
    pub fn from_points_iter<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut points_iter = points.into_iter();
        let first_point = points_iter.next()?;

        let mut min = first_point;
        let mut max = first_point;

        for point in points_iter {
            min.x = min.x.min(point.x);
            min.y = min.y.min(point.y);
            max.x = max.x.max(point.x);
            max.y = max.y.max(point.y);
        }

        Some(Self { min, max })
    }

    /// Breite der Bounding Box
    pub fn width(&self) -> f64 {
        (self.max.x - self.min.x).max(0.0)
    }

    /// Höhe der Bounding Box
    pub fn height(&self) -> f64 {
        (self.max.y - self.min.y).max(0.0)
    }

    /// Vergrößert die Box um `margin` in alle Richtungen.
    pub fn expanded(&self, margin: f64) -> Self {
        Self {
            min: Point::new(self.min.x - margin, self.min.y - margin),
            max: Point::new(self.max.x + margin, self.max.y + margin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bounds_from_points() {
        let bounds = Bounds2D::from_points_iter([
            Point::new(1.0, 5.0),
            Point::new(-2.0, 3.0),
            Point::new(4.0, -1.0),
        ])
        .unwrap();

        assert_eq!(bounds.min, Point::new(-2.0, -1.0));
        assert_eq!(bounds.max, Point::new(4.0, 5.0));
        assert_relative_eq!(bounds.width(), 6.0);
        assert_relative_eq!(bounds.height(), 6.0);
    }

    #[test]
    fn test_empty_iterator_has_no_bounds() {
        assert!(Bounds2D::from_points_iter(std::iter::empty()).is_none());
    }

    #[test]
    fn test_expanded() {
        let bounds = Bounds2D::from_points_iter([Point::new(0.0, 0.0), Point::new(1.0, 1.0)])
            .unwrap()
            .expanded(0.5);
        assert_eq!(bounds.min, Point::new(-0.5, -0.5));
        assert_relative_eq!(bounds.width(), 2.0);
    }
}
