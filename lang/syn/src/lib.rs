//! Parsing and code generation tools for the `inline-collection` macros.
//!
//! The pipeline is split the same way across modules: [`parse`] turns an
//! annotated struct plus marker arguments into the plain IR of [`ir`], and
//! [`codegen`] turns that IR into the synthesized member set. Everything is
//! a pure function from input tokens to output tokens, so expansions of
//! distinct declarations are independent of each other and freely
//! parallelizable by the compiler.
//!
//! [`codegen::tuple_view`] is the exception to the per-declaration flow: it
//! emits the homogeneous-tuple view impls once per build of the runtime
//! crate, independent of any annotated declaration.

pub mod codegen;
pub mod ir;
pub mod parse;

pub use ir::{CollectionIr, Descriptor};
pub use parse::MarkerArgs;
