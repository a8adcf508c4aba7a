//! Code generation for the synthesized collection type: storage struct,
//! constructor, contiguous views, iteration and tuple interoperability.

use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};
use syn::{parse_quote, GenericParam, Generics, Ident, Type};

use crate::ir::CollectionIr;

/// Assemble the full supplementary member set for one annotated declaration.
///
/// The output is a pure function of the IR: no environment reads, no
/// randomness, so the host pipeline may cache or re-run expansions freely.
pub fn expand(ir: &CollectionIr) -> TokenStream {
    let attrs = &ir.attrs;
    let vis = &ir.vis;
    let ident = &ir.ident;
    let elem = &ir.descriptor.elem;
    let len = ir.descriptor.len;
    let len_lit = Literal::usize_unsuffixed(len);

    let (impl_generics, ty_generics, where_clause) = ir.generics.split_for_impl();
    let generics = &ir.generics;
    let struct_where = &ir.generics.where_clause;

    let slots: Vec<Ident> = (0..len).map(|i| format_ident!("item{}", i)).collect();
    let phantom = phantom_field_type(&ir.generics, elem, len);

    // -----------------------------------------------------------------
    // Storage struct: slots in declaration order, no intervening members.
    // `repr(C)` + one field type keeps field order == memory order, which
    // the views below rely on. A `PhantomData` tail is appended only when
    // some generic parameter never reaches the element type.
    // -----------------------------------------------------------------
    let marker_field = phantom.as_ref().map(|ty| quote! { _marker: #ty, });
    let storage = quote! {
        #(#attrs)*
        #[repr(C)]
        #vis struct #ident #generics #struct_where {
            #(pub #slots: #elem,)*
            #marker_field
        }
    };

    // -----------------------------------------------------------------
    // Constructor.
    // -----------------------------------------------------------------
    let marker_init = phantom
        .as_ref()
        .map(|_| quote! { _marker: ::core::marker::PhantomData, });
    let new_allows = if len == 0 {
        quote! { #[allow(clippy::new_without_default)] }
    } else {
        quote! { #[allow(clippy::too_many_arguments)] }
    };
    let constructor = quote! {
        /// Builds the collection from one value per slot, in slot order.
        #new_allows
        pub fn new(#(#slots: #elem),*) -> Self {
            Self { #(#slots,)* #marker_init }
        }
    };

    // -----------------------------------------------------------------
    // Contiguous views. The cast goes through the struct base pointer so
    // the produced slice keeps provenance over the whole value; slot 0 sits
    // at offset 0 under `repr(C)`. The layout constant trips at
    // monomorphization time if the slots ever stop being exactly the
    // struct's storage. A field-less type has no base slot to anchor on
    // and gets literal empty slices instead.
    // -----------------------------------------------------------------
    let views = if len == 0 {
        quote! {
            /// Read-only view of the storage. Always empty for this type.
            pub fn as_slice(&self) -> &[#elem] {
                &[]
            }

            /// Read-write view of the storage. Always empty for this type.
            pub fn as_mut_slice(&mut self) -> &mut [#elem] {
                &mut []
            }
        }
    } else {
        quote! {
            const LAYOUT_CHECK: () = assert!(
                ::core::mem::size_of::<Self>() == Self::LEN * ::core::mem::size_of::<#elem>(),
                "collection slots must fill the struct storage exactly",
            );

            /// Zero-copy read-only view of all slots, in slot order.
            pub fn as_slice(&self) -> &[#elem] {
                let () = Self::LAYOUT_CHECK;
                let data = self as *const Self as *const #elem;
                unsafe { ::core::slice::from_raw_parts(data, #len_lit) }
            }

            /// Zero-copy read-write view of all slots, in slot order.
            /// Mutations through the returned slice mutate the collection.
            pub fn as_mut_slice(&mut self) -> &mut [#elem] {
                let () = Self::LAYOUT_CHECK;
                let data = self as *mut Self as *mut #elem;
                unsafe { ::core::slice::from_raw_parts_mut(data, #len_lit) }
            }
        }
    };

    // -----------------------------------------------------------------
    // Inherent surface: length, checked access, copies, iteration.
    // -----------------------------------------------------------------
    let inherent = quote! {
        impl #impl_generics #ident #ty_generics #where_clause {
            /// Number of storage slots.
            pub const LEN: usize = #len_lit;

            #constructor

            pub const fn len(&self) -> usize {
                Self::LEN
            }

            pub const fn is_empty(&self) -> bool {
                Self::LEN == 0
            }

            #views

            /// Returns a reference to the slot at `index`, or `None` if out
            /// of bounds.
            pub fn get(&self, index: usize) -> ::core::option::Option<&#elem> {
                self.as_slice().get(index)
            }

            /// Returns a mutable reference to the slot at `index`, or `None`
            /// if out of bounds.
            pub fn get_mut(&mut self, index: usize) -> ::core::option::Option<&mut #elem> {
                self.as_mut_slice().get_mut(index)
            }

            /// Copies every slot into a freshly built array. The result does
            /// not alias the collection's storage.
            pub fn to_array(&self) -> [#elem; #len_lit]
            where
                #elem: ::core::clone::Clone,
            {
                [#(self.#slots.clone()),*]
            }

            /// Moves the slots out into an array, consuming the collection.
            pub fn into_array(self) -> [#elem; #len_lit] {
                [#(self.#slots),*]
            }

            /// Iterates over the slots in order. Each call starts over.
            pub fn iter(&self) -> ::core::slice::Iter<'_, #elem> {
                self.as_slice().iter()
            }

            /// Mutable counterpart of [`Self::iter`].
            pub fn iter_mut(&mut self) -> ::core::slice::IterMut<'_, #elem> {
                self.as_mut_slice().iter_mut()
            }
        }
    };

    // -----------------------------------------------------------------
    // Indexed access goes through the views, so bounds violations surface
    // as the standard slice panic at the point of use.
    // -----------------------------------------------------------------
    let indexing = quote! {
        #[automatically_derived]
        impl #impl_generics ::core::ops::Index<usize> for #ident #ty_generics #where_clause {
            type Output = #elem;

            fn index(&self, index: usize) -> &Self::Output {
                &self.as_slice()[index]
            }
        }

        #[automatically_derived]
        impl #impl_generics ::core::ops::IndexMut<usize> for #ident #ty_generics #where_clause {
            fn index_mut(&mut self, index: usize) -> &mut Self::Output {
                &mut self.as_mut_slice()[index]
            }
        }
    };

    // Borrowed iteration needs one extra lifetime on the impl generics.
    let ref_generics = with_lifetime(&ir.generics, parse_quote!('col));
    let (ref_impl_generics, _, _) = ref_generics.split_for_impl();
    let iteration = quote! {
        #[automatically_derived]
        impl #impl_generics ::core::iter::IntoIterator for #ident #ty_generics #where_clause {
            type Item = #elem;
            type IntoIter = ::core::array::IntoIter<#elem, #len_lit>;

            fn into_iter(self) -> Self::IntoIter {
                self.into_array().into_iter()
            }
        }

        #[automatically_derived]
        impl #ref_impl_generics ::core::iter::IntoIterator for &'col #ident #ty_generics #where_clause {
            type Item = &'col #elem;
            type IntoIter = ::core::slice::Iter<'col, #elem>;

            fn into_iter(self) -> Self::IntoIter {
                self.iter()
            }
        }

        #[automatically_derived]
        impl #ref_impl_generics ::core::iter::IntoIterator for &'col mut #ident #ty_generics #where_clause {
            type Item = &'col mut #elem;
            type IntoIter = ::core::slice::IterMut<'col, #elem>;

            fn into_iter(self) -> Self::IntoIter {
                self.iter_mut()
            }
        }
    };

    // -----------------------------------------------------------------
    // Tuple interoperability: a homogeneous tuple of exactly `len`
    // components converts into the collection in positional order. The
    // trailing comma keeps arities 0 and 1 well-formed tuple types.
    // -----------------------------------------------------------------
    let elem_repeat = vec![elem; len];
    let tuple_binding = if len == 0 {
        format_ident!("_tuple")
    } else {
        format_ident!("tuple")
    };
    let positions: Vec<syn::Index> = (0..len).map(syn::Index::from).collect();
    let conversion = quote! {
        #[automatically_derived]
        impl #impl_generics ::core::convert::From<(#(#elem_repeat,)*)> for #ident #ty_generics #where_clause {
            fn from(#tuple_binding: (#(#elem_repeat,)*)) -> Self {
                Self::new(#(#tuple_binding.#positions),*)
            }
        }
    };

    let out = quote! {
        #storage
        #inherent
        #indexing
        #iteration
        #conversion
    };

    #[cfg(feature = "collection-debug")]
    eprintln!("[inline-collection] expansion for `{}`:\n{}", ident, out);

    out
}

/// Clone `generics` with `lifetime` inserted at the front of the parameter
/// list, for impls over `&`/`&mut` of the synthesized type.
fn with_lifetime(generics: &Generics, lifetime: GenericParam) -> Generics {
    let mut generics = generics.clone();
    generics.params.insert(0, lifetime);
    generics
}

/// Builds the `PhantomData` type covering every generic parameter of the
/// declaration that the storage fields never mention, or `None` when all
/// parameters are in use. With zero slots nothing mentions anything, so
/// every parameter needs the marker. Unused const parameters are legal on
/// their own and need none.
fn phantom_field_type(generics: &Generics, elem: &Type, len: usize) -> Option<Type> {
    use std::collections::HashSet;
    use syn::visit::Visit;

    #[derive(Default)]
    struct Mentions {
        idents: HashSet<String>,
        lifetimes: HashSet<String>,
    }

    impl<'ast> Visit<'ast> for Mentions {
        fn visit_ident(&mut self, ident: &'ast Ident) {
            self.idents.insert(ident.to_string());
        }

        fn visit_lifetime(&mut self, lifetime: &'ast syn::Lifetime) {
            self.lifetimes.insert(lifetime.ident.to_string());
        }
    }

    let mut mentions = Mentions::default();
    if len > 0 {
        mentions.visit_type(elem);
    }

    let mut entries: Vec<Type> = Vec::new();
    for param in &generics.params {
        match param {
            GenericParam::Type(tp) if !mentions.idents.contains(&tp.ident.to_string()) => {
                let ident = &tp.ident;
                // `fn() -> P` keeps the marker covariant and `Send`/`Sync`
                // independent of `P`.
                entries.push(parse_quote!(fn() -> #ident));
            }
            GenericParam::Lifetime(lt)
                if !mentions.lifetimes.contains(&lt.lifetime.ident.to_string()) =>
            {
                let lifetime = &lt.lifetime;
                entries.push(parse_quote!(&#lifetime ()));
            }
            _ => {}
        }
    }

    if entries.is_empty() {
        None
    } else {
        Some(parse_quote!(::core::marker::PhantomData<(#(#entries,)*)>))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{self, MarkerArgs};
    use syn::{File, Item, ItemStruct};

    fn ir_from(item_src: &str, args_src: &str) -> CollectionIr {
        let item: ItemStruct = syn::parse_str(item_src).unwrap();
        let args: MarkerArgs = syn::parse_str(args_src).unwrap();
        parse::resolve(&item, &args).unwrap()
    }

    fn expand_to_file(ir: &CollectionIr) -> File {
        syn::parse2(expand(ir)).expect("generated tokens parse as items")
    }

    fn storage_struct(file: &File) -> &ItemStruct {
        file.items
            .iter()
            .find_map(|item| match item {
                Item::Struct(s) => Some(s),
                _ => None,
            })
            .expect("storage struct emitted")
    }

    #[test]
    fn emits_one_slot_per_length_unit() {
        let ir = ir_from("pub struct Quad<T>;", "4");
        let file = expand_to_file(&ir);
        let storage = storage_struct(&file);

        let names: Vec<String> = storage
            .fields
            .iter()
            .map(|f| f.ident.as_ref().unwrap().to_string())
            .collect();
        assert_eq!(names, ["item0", "item1", "item2", "item3"]);
    }

    #[test]
    fn emits_expected_impl_set() {
        let ir = ir_from("pub struct Quad<T>;", "4");
        let file = expand_to_file(&ir);

        // Inherent + Index + IndexMut + IntoIterator x3 + From.
        let impls = file
            .items
            .iter()
            .filter(|item| matches!(item, Item::Impl(_)))
            .count();
        assert_eq!(impls, 7);
    }

    #[test]
    fn zero_length_emits_no_slots_and_no_unsafe() {
        let ir = ir_from("struct Empty<T>;", "0");
        let file = expand_to_file(&ir);

        // No slots; only the marker keeping `T` attached to the type.
        let names: Vec<String> = storage_struct(&file)
            .fields
            .iter()
            .map(|f| f.ident.as_ref().unwrap().to_string())
            .collect();
        assert_eq!(names, ["_marker"]);

        let code = expand(&ir).to_string();
        assert!(!code.contains("unsafe"));
        assert!(!code.contains("from_raw_parts"));
    }

    #[test]
    fn zero_length_without_generics_emits_nothing_extra() {
        let ir = ir_from("struct Nothing;", "u8, 0");
        let file = expand_to_file(&ir);
        assert_eq!(storage_struct(&file).fields.len(), 0);
    }

    #[test]
    fn nonzero_length_guards_layout() {
        let ir = ir_from("struct Quad<T>;", "4");
        let code = expand(&ir).to_string();
        assert!(code.contains("LAYOUT_CHECK"));
        assert!(code.contains("repr (C)"));
    }

    #[test]
    fn unused_type_param_gets_phantom_tail() {
        // Explicit element type, `S` never mentioned.
        let ir = ir_from("struct Tagged<S>;", "u32, 2");
        let file = expand_to_file(&ir);
        let storage = storage_struct(&file);

        let last = storage.fields.iter().last().unwrap();
        assert_eq!(last.ident.as_ref().unwrap(), "_marker");
        assert_eq!(storage.fields.len(), 3);
    }

    #[test]
    fn used_params_get_no_phantom_tail() {
        let ir = ir_from("struct Quad<T>;", "4");
        let file = expand_to_file(&ir);
        assert!(storage_struct(&file)
            .fields
            .iter()
            .all(|f| f.ident.as_ref().unwrap() != "_marker"));
    }

    #[test]
    fn retains_declaration_attributes() {
        let ir = ir_from("#[derive(Clone)] pub struct Quad<T>;", "4");
        let file = expand_to_file(&ir);
        let storage = storage_struct(&file);
        assert!(storage.attrs.iter().any(|a| a.path().is_ident("derive")));
        assert!(storage.attrs.iter().any(|a| a.path().is_ident("repr")));
    }

    #[test]
    fn output_is_deterministic() {
        let ir = ir_from("pub struct Quad<T>;", "4");
        assert_eq!(expand(&ir).to_string(), expand(&ir).to_string());
    }
}
