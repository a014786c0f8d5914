use serde::{Serialize, Serializer};

/// Serialize a fixed-size array as a sequence. serde only provides
/// `Serialize` impls for arrays of length 0..=32, not for const-generic
/// `[T; D]`, so the derive on [`NodeRepr`] needs this helper to handle the
/// `point` field. Produces the same JSON array output as serde's built-in
/// fixed-size array impls.
fn serialize_point<S, const D: usize>(point: &[f64; D], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(point.iter())
}

/// Nested, serializable view of a tree: one entry per node with its point,
/// split axis and children. Produced by
/// [`KdTree::to_representation`](crate::KdTree::to_representation) and
/// consumed by display layers; it carries no arena indices and cannot be fed
/// back into a tree.
#[derive(Clone, Debug, Serialize)]
pub struct NodeRepr<const D: usize> {
    #[serde(serialize_with = "serialize_point")]
    pub point: [f64; D],
    pub axis: u8,
    pub left: Option<Box<NodeRepr<D>>>,
    pub right: Option<Box<NodeRepr<D>>>,
}
