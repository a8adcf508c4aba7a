//! Parsing routines converting an annotated `syn::ItemStruct` plus marker
//! arguments into the crate-internal IR.

use syn::{
    parse::{Parse, ParseStream},
    spanned::Spanned,
    Fields, GenericParam, ItemStruct, LitInt, Token, Type,
};

use crate::ir::{CollectionIr, Descriptor};

/// Arguments of the `#[inline_collection(..)]` marker.
///
/// Two forms are accepted:
///   * `#[inline_collection(<len>)]` — the element type is taken from the
///     declaration's sole type parameter;
///   * `#[inline_collection(<ElementType>, <len>)]` — both given verbatim.
#[derive(Debug, Clone)]
pub struct MarkerArgs {
    /// Explicit element type, if the two-argument form was used.
    pub elem: Option<Type>,
    /// Slot count. Kept as a literal so diagnostics can point at it.
    pub len: LitInt,
}

impl Parse for MarkerArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.is_empty() {
            return Err(input.error(
                "missing collection length: expected `#[inline_collection(<len>)]` \
                 or `#[inline_collection(<ElementType>, <len>)]`",
            ));
        }

        // A leading integer literal can only be the length-only form.
        let elem = if input.peek(LitInt) {
            None
        } else {
            let ty: Type = input.parse().map_err(|e| {
                syn::Error::new(e.span(), "expected an element type or an integer length")
            })?;
            input.parse::<Token![,]>()?;
            Some(ty)
        };

        let len: LitInt = input.parse().map_err(|e| {
            syn::Error::new(e.span(), "expected an unsigned integer collection length")
        })?;

        // Allow a trailing comma, reject anything else.
        if input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
        }
        if !input.is_empty() {
            return Err(input.error("unexpected tokens after the collection length"));
        }

        Ok(Self { elem, len })
    }
}

/// Resolve the annotated declaration + marker arguments into a
/// [`CollectionIr`].
///
/// Every rejection here is a configuration error local to the declaration:
/// the caller turns the `syn::Error` into a compile diagnostic and other
/// declarations keep expanding.
pub fn resolve(item: &ItemStruct, args: &MarkerArgs) -> syn::Result<CollectionIr> {
    let len = args.len.base10_parse::<usize>()?;

    // Storage slots are synthesized; the declaration must not bring fields
    // of its own or the sequential slot layout is forfeit.
    match &item.fields {
        Fields::Unit => {}
        Fields::Named(named) if named.named.is_empty() => {}
        Fields::Unnamed(unnamed) if unnamed.unnamed.is_empty() => {}
        fields => {
            return Err(syn::Error::new(
                fields.span(),
                "a collection declaration must not declare fields; \
                 storage slots are generated from the marker",
            ));
        }
    }

    // Layout is owned by the generator.
    if let Some(repr) = item.attrs.iter().find(|a| a.path().is_ident("repr")) {
        return Err(syn::Error::new(
            repr.span(),
            "remove `#[repr(..)]`: the generated storage defines its own representation",
        ));
    }

    let elem = match &args.elem {
        Some(ty) => ty.clone(),
        None => sole_type_param(item)?,
    };

    Ok(CollectionIr {
        attrs: item.attrs.clone(),
        vis: item.vis.clone(),
        ident: item.ident.clone(),
        generics: item.generics.clone(),
        descriptor: Descriptor { elem, len },
        span: item.span(),
    })
}

/// The implicit one-argument form derives the element type from the
/// declaration's single type parameter. Zero or several parameters cannot be
/// resolved and are rejected rather than guessed at.
fn sole_type_param(item: &ItemStruct) -> syn::Result<Type> {
    let mut type_params = item
        .generics
        .params
        .iter()
        .filter_map(|param| match param {
            GenericParam::Type(tp) => Some(&tp.ident),
            _ => None,
        });

    let first = type_params.next().ok_or_else(|| {
        syn::Error::new(
            item.ident.span(),
            "the length-only form needs a declaration with one type parameter \
             to supply the element type; use `#[inline_collection(<ElementType>, <len>)]`",
        )
    })?;

    if let Some(second) = type_params.next() {
        return Err(syn::Error::new(
            second.span(),
            "the length-only form is ambiguous on a declaration with several \
             type parameters; use `#[inline_collection(<ElementType>, <len>)]`",
        ));
    }

    Ok(syn::parse_quote!(#first))
}
