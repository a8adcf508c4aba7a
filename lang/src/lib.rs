//! Fixed-capacity, stack-allocated sequence types generated at compile
//! time.
//!
//! The [`macro@inline_collection`] attribute turns a field-less struct
//! declaration into a value type with a fixed number of storage slots, a
//! positional constructor, zero-copy slice views, indexed access,
//! iteration, and conversion from a homogeneous tuple. The [`TupleSlice`]
//! trait complements it with contiguous views directly over homogeneous
//! tuples of 2 to 101 components.
//!
//! Everything happens during macro expansion; nothing in this crate
//! reflects, allocates, or resizes at runtime.
//!
//! ```
//! use inline_collection::prelude::*;
//!
//! #[inline_collection(3)]
//! #[derive(Clone, Debug, PartialEq)]
//! struct Triple<T>;
//!
//! let mut t = Triple::new(1, 2, 3);
//! t[1] = 20;
//! assert_eq!(t.as_slice(), &[1, 20, 3]);
//! assert_eq!(t.to_array(), [1, 20, 3]);
//!
//! // Homogeneous tuples get the same views without any declaration.
//! let mut pair = (5u8, 6u8);
//! pair.as_mut_slice()[0] = 50;
//! assert_eq!(pair, (50, 6));
//! ```
//!
//! With an explicit element type the declaration needs no type parameter:
//!
//! ```
//! use inline_collection::prelude::*;
//!
//! #[inline_collection(String, 2)]
//! struct NamePair;
//!
//! let pair = NamePair::from(("ada".to_string(), "grace".to_string()));
//! assert_eq!(pair.item1, "grace");
//! ```

pub mod tuple_view;

pub use inline_collection_attribute::inline_collection;
pub use tuple_view::TupleSlice;

/// The single glob import covering the attribute and the tuple view trait.
pub mod prelude {
    pub use crate::inline_collection;
    pub use crate::tuple_view::TupleSlice;
}
