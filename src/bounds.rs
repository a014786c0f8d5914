/// Generic bounding box for N-dimensional space.
#[derive(Clone, Copy, Debug)]
pub struct BoundingBox<const D: usize> {
    pub min: [f64; D],
    pub max: [f64; D],
}

impl<const D: usize> BoundingBox<D> {
    pub fn new(min: [f64; D], max: [f64; D]) -> Self {
        Self { min, max }
    }

    /// Builds a box from the interleaved limit layout `[min0, max0, min1, max1, ...]`.
    ///
    /// # Panics
    ///
    /// Panics unless `limits` holds exactly `2 * D` values.
    pub fn from_limits(limits: &[f64]) -> Self {
        assert!(limits.len() == D * 2, "limit length should be {}*2", D);
        let mut min = [0.0; D];
        let mut max = [0.0; D];
        for axis in 0..D {
            min[axis] = limits[axis * 2];
            max[axis] = limits[axis * 2 + 1];
        }
        Self { min, max }
    }

    /// Checks whether a point lies inside the box, bounds inclusive on every axis.
    pub fn contains(&self, point: &[f64; D]) -> bool {
        for axis in 0..D {
            if point[axis] < self.min[axis] || point[axis] > self.max[axis] {
                return false;
            }
        }
        true
    }
}
