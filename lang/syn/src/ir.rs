//! Intermediate representation for the `#[inline_collection]` attribute.
//!
//! Converting the incoming `syn::ItemStruct` + marker arguments into these
//! plain structures first decouples parsing from code generation and makes
//! both stages unit-testable.

use proc_macro2::Span;
use syn::{Attribute, Generics, Ident, Type, Visibility};

/// The resolved generation request: which element type to store, and how
/// many slots to synthesize.
#[derive(Debug, Clone)]
pub struct Descriptor {
    /// Element type of every storage slot.
    pub elem: Type,
    /// Number of storage slots. Zero is valid and yields a field-less type.
    pub len: usize,
}

/// Identity of the annotated declaration plus its resolved [`Descriptor`].
#[derive(Debug, Clone)]
pub struct CollectionIr {
    /// Attributes written on the declaration (docs, derives, ...). They are
    /// re-emitted verbatim on the synthesized struct.
    pub attrs: Vec<Attribute>,
    pub vis: Visibility,
    pub ident: Ident,
    /// Generic parameters of the declaration, propagated verbatim to every
    /// emitted impl.
    pub generics: Generics,
    pub descriptor: Descriptor,
    /// Span of the original declaration, kept for diagnostics.
    pub span: Span,
}
