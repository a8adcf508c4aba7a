//! Contiguous views over homogeneous tuples.
//!
//! A tuple whose components all share one type is laid out as that many
//! adjacent values, so it can be borrowed as a slice without copying. The
//! impls are generated for every arity from 2 to 101; an arity outside
//! that range, or a tuple mixing component types, simply has no impl and
//! fails to compile at the call site.

use inline_collection_attribute::tuple_views;

/// Zero-copy contiguous views over a homogeneous tuple's components.
pub trait TupleSlice {
    /// The component type shared by every position.
    type Element;

    /// Read-only view of the components in positional order.
    fn as_slice(&self) -> &[Self::Element];

    /// Read-write view of the components in positional order. Mutations
    /// through the slice land in the tuple itself.
    fn as_mut_slice(&mut self) -> &mut [Self::Element];
}

tuple_views!();
