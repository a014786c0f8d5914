use crate::kdtree::KdTree;
use rand::prelude::*;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;

/// The 3-dimensional spatial index exposed to JavaScript and TypeScript.
///
/// This wraps [`KdTree<3>`](crate::KdTree) with the Chebyshev metric and
/// exchanges coordinates as plain numbers or flat `[x, y, z, x, y, z, ...]`
/// arrays across the WASM boundary.
#[wasm_bindgen]
pub struct KdTreeThree {
    inner: KdTree<3>,
}

#[wasm_bindgen]
impl KdTreeThree {
    #[wasm_bindgen(constructor)]
    pub fn new() -> KdTreeThree {
        KdTreeThree {
            inner: KdTree::new(),
        }
    }

    /// Inserts a point. Non-finite coordinates are ignored.
    pub fn insert(&mut self, x: f64, y: f64, z: f64) {
        self.inner.insert([x, y, z]);
    }

    /// Removes the point with exactly these coordinates; no-op when absent.
    pub fn remove(&mut self, x: f64, y: f64, z: f64) {
        self.inner.remove(&[x, y, z]);
    }

    /// The up-to-`count` points closest to `(x, y, z)` as a flat array,
    /// closest first. Ties at the cut-off distance are all returned.
    pub fn nearest(&self, x: f64, y: f64, z: f64, count: usize) -> Vec<f64> {
        flatten(self.inner.nearest(&[x, y, z], count))
    }

    /// Every point inside the interleaved limits
    /// `[min_x, max_x, min_y, max_y, min_z, max_z]`, as a flat array.
    pub fn points_in_range(&self, limits: &[f64]) -> Vec<f64> {
        let mut found = Vec::new();
        self.inner.points_in_limits(limits, &mut found);
        flatten(found)
    }

    /// Rebuilds the tree to minimal height.
    pub fn balance(&mut self) {
        self.inner.balance();
    }

    /// Removes all points.
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    #[wasm_bindgen(getter)]
    pub fn count(&self) -> usize {
        self.inner.len()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> usize {
        self.inner.height()
    }

    #[wasm_bindgen(getter)]
    pub fn balance_factor(&self) -> f64 {
        self.inner.balance_factor()
    }

    /// Inserts `count` random points with every coordinate drawn from
    /// `[min, max)`.
    pub fn random_points(&mut self, count: usize, min: f64, max: f64) {
        let mut rng = StdRng::seed_from_u64(get_seed());
        let span = max - min;
        for _ in 0..count {
            let x = min + rng.r#gen::<f64>() * span;
            let y = min + rng.r#gen::<f64>() * span;
            let z = min + rng.r#gen::<f64>() * span;
            self.inner.insert([x, y, z]);
        }
    }

    /// Serializes the tree as nested JSON (`{point, axis, left, right}` per
    /// node) for display layers; `"null"` for an empty tree.
    pub fn to_json(&self) -> String {
        match self.inner.to_representation() {
            Some(repr) => serde_json::to_string(&repr).unwrap_or_else(|_| "null".to_string()),
            None => "null".to_string(),
        }
    }
}

impl Default for KdTreeThree {
    fn default() -> Self {
        KdTreeThree::new()
    }
}

fn flatten(points: Vec<[f64; 3]>) -> Vec<f64> {
    let mut flat = Vec::with_capacity(points.len() * 3);
    for point in points {
        flat.extend_from_slice(&point);
    }
    flat
}

fn get_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Math::random() * 4294967296.0) as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        123456789 // Fixed seed for tests
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_roundtrip() {
        let mut index = KdTreeThree::new();
        index.insert(1.0, 2.0, 3.0);
        index.insert(1.0, 2.0, 4.0);

        assert_eq!(index.count(), 2);
        assert_eq!(index.nearest(1.0, 2.0, 2.0, 1), vec![1.0, 2.0, 3.0]);

        index.remove(1.0, 2.0, 3.0);
        assert_eq!(index.nearest(1.0, 2.0, 2.0, 1), vec![1.0, 2.0, 4.0]);
    }

    #[test]
    fn test_points_in_range_flat() {
        let mut index = KdTreeThree::new();
        index.insert(1.0, 1.0, 1.0);
        index.insert(5.0, 5.0, 5.0);

        let found = index.points_in_range(&[0.0, 2.0, 0.0, 2.0, 0.0, 2.0]);
        assert_eq!(found, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_random_points_fill() {
        let mut index = KdTreeThree::new();
        index.random_points(100, 0.0, 10.0);
        assert_eq!(index.count(), 100);

        let everything = index.points_in_range(&[0.0, 10.0, 0.0, 10.0, 0.0, 10.0]);
        assert_eq!(everything.len(), 300);
    }

    #[test]
    fn test_empty_tree_serializes_to_null() {
        let index = KdTreeThree::new();
        assert_eq!(index.to_json(), "null");
    }
}
