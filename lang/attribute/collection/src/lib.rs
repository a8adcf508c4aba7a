extern crate proc_macro;

use proc_macro::TokenStream;
use syn::{parse_macro_input, ItemStruct};

use inline_collection_syn::{codegen, parse, MarkerArgs};

/// Attribute macro that turns a field-less struct declaration into a
/// fixed-capacity, stack-allocated sequence type.
///
/// The marker takes the slot count, and optionally the element type:
///
/// * `#[inline_collection(<len>)]` — the element type is the declaration's
///   sole type parameter;
/// * `#[inline_collection(<ElementType>, <len>)]` — both given explicitly.
///
/// # Generated members
///
/// For a slot count `N` and element type `E` the expansion produces:
///
/// * `N` public fields `item0..item{N-1}` of type `E`, laid out
///   sequentially (`#[repr(C)]`) with nothing in between;
/// * `new(item0, .., item{N-1})` assigning the slots in order;
/// * `LEN`, `len()`, `is_empty()`;
/// * `as_slice()` / `as_mut_slice()` — zero-copy views over all slots;
/// * `get` / `get_mut`, plus `Index`/`IndexMut` that panic on an
///   out-of-range index like any slice access;
/// * `to_array()` (cloning) and `into_array()` (consuming);
/// * `iter()` / `iter_mut()` and `IntoIterator` for owned and borrowed
///   values;
/// * `From<(E, .., E)>` converting a homogeneous tuple of exactly `N`
///   components in positional order.
///
/// Attributes written on the declaration (docs, derives, ...) are kept on
/// the synthesized struct.
///
/// # Examples
///
/// ```ignore
/// use inline_collection::prelude::*;
///
/// #[inline_collection(3)]
/// #[derive(Clone, Debug, PartialEq)]
/// pub struct Triple<T>;
///
/// let mut t = Triple::new(1, 2, 3);
/// t.as_mut_slice()[0] = 10;
/// assert_eq!(t.to_array(), [10, 2, 3]);
/// ```
///
/// With an explicit element type the declaration needs no type parameter:
///
/// ```ignore
/// #[inline_collection(String, 2)]
/// pub struct NamePair;
/// ```
///
/// # Errors
///
/// Misconfiguration is reported as a compile error on the declaration it
/// occurs on and does not affect other declarations: a missing or
/// non-integer length, the length-only form on a declaration with zero or
/// several type parameters, a declaration bringing its own fields, or a
/// declaration carrying its own `#[repr(..)]`.
#[proc_macro_attribute]
pub fn inline_collection(args: TokenStream, input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(args as MarkerArgs);
    let item = parse_macro_input!(input as ItemStruct);

    let ir = match parse::resolve(&item, &args) {
        Ok(ir) => ir,
        Err(e) => return e.to_compile_error().into(),
    };

    codegen::collection::expand(&ir).into()
}

/// Emits the `TupleSlice` impls for every homogeneous-tuple arity in
/// 2..=101. Invoked exactly once, from the module of the runtime crate that
/// declares the trait; arities outside the range get no impl and fail to
/// resolve at their call site.
#[doc(hidden)]
#[proc_macro]
pub fn tuple_views(input: TokenStream) -> TokenStream {
    if !input.is_empty() {
        return syn::Error::new(
            proc_macro2::Span::call_site(),
            "tuple_views! takes no arguments",
        )
        .to_compile_error()
        .into();
    }

    codegen::tuple_view::expand().into()
}
