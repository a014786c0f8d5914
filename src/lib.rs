//! # kdthree
//!
//! `kdthree` is a Rust library providing a mutable k-d tree spatial index over
//! fixed-dimensional points, designed to be used in Rust as well as compiled
//! to WebAssembly (WASM). It supports insertion, deletion, k-nearest-neighbor
//! queries, axis-aligned range queries and on-demand rebalancing.
//!
//! ## Features
//!
//! - **WASM-first**: Built with `wasm-bindgen` for seamless integration with JavaScript and TypeScript.
//! - **Mutable index**: Insert and remove points freely; rebalance on demand when the
//!   balance-factor diagnostic reports degradation.
//! - **Nearest neighbors**: Bounded k-nearest-neighbor search with metric-aware pruning
//!   and a pluggable distance metric (Chebyshev by default).
//! - **Range queries**: Axis-aligned box queries with one-sided subtree pruning.
//! - **Node pooling**: Deleted nodes are recycled through an internal arena to amortize
//!   allocation under insert/delete churn and rebuilds.
//!
//! ## Example
//!
//! See the `demos/` directory for SVG plotting and JSON export.
//!
//! ## Main Interface
//!
//! The primary entry point is the [`KdTree`] struct; [`KdTreeThree`] is the
//! 3-dimensional wrapper exposed over the WASM boundary.

mod bounds;
mod candidates;
mod kdtree;
mod kdtree_three;
mod metric;
mod node;
mod representation;

pub use bounds::BoundingBox;
pub use kdtree::KdTree;
pub use kdtree_three::KdTreeThree;
pub use metric::Chebyshev;
pub use metric::Euclidean;
pub use metric::Metric;
pub use representation::NodeRepr;
