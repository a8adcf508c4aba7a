//! Code generation for the contiguous-view extensions over homogeneous
//! tuples: one `TupleSlice` impl per arity in [`MIN_ARITY`]..=[`MAX_ARITY`].
//!
//! The impls exist only for same-typed tuples, so a heterogeneous call site
//! fails type-checking, and an arity outside the range fails to resolve the
//! method at all. Neither ever becomes a runtime condition.

use proc_macro2::{Literal, TokenStream};
use quote::quote;

/// Smallest tuple arity that receives a view impl.
pub const MIN_ARITY: usize = 2;

/// Largest tuple arity that receives a view impl. Arities above this bound
/// get no impl at all rather than a truncated one.
pub const MAX_ARITY: usize = 101;

/// Emit the full impl set. Runs once per build of the crate that invokes
/// `tuple_views!`, independent of any annotated declaration.
pub fn expand() -> TokenStream {
    (MIN_ARITY..=MAX_ARITY).map(arity_impl).collect()
}

/// One `impl<T> TupleSlice for (T, ..., T)` with `arity` components.
///
/// Homogeneous components all share one size and alignment, so rustc keeps
/// them in declaration order with no padding; the cast goes through the
/// tuple base pointer, keeping provenance over the whole value. The debug
/// assertion trips if the packed-layout expectation is ever violated.
fn arity_impl(arity: usize) -> TokenStream {
    let components = vec![quote!(T); arity];
    let len = Literal::usize_unsuffixed(arity);

    quote! {
        #[automatically_derived]
        impl<T> TupleSlice for (#(#components,)*) {
            type Element = T;

            fn as_slice(&self) -> &[T] {
                debug_assert!(
                    ::core::mem::size_of::<Self>() == #len * ::core::mem::size_of::<T>()
                );
                let data = self as *const Self as *const T;
                unsafe { ::core::slice::from_raw_parts(data, #len) }
            }

            fn as_mut_slice(&mut self) -> &mut [T] {
                debug_assert!(
                    ::core::mem::size_of::<Self>() == #len * ::core::mem::size_of::<T>()
                );
                let data = self as *mut Self as *mut T;
                unsafe { ::core::slice::from_raw_parts_mut(data, #len) }
            }
        }
    }
}
