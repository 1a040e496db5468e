//! Type helper utilities for syn type analysis.

/// Extract the inner type T from Option<T>, or return None if not an Option type.
///
/// Recognizes `Option<T>`, `std::option::Option<T>`, and `core::option::Option<T>`.
pub fn option_inner(ty: &syn::Type) -> Option<&syn::Type> {
    let syn::Type::Path(type_path) = ty else {
        return None;
    };
    let seg = type_path.path.segments.last()?;
    if seg.ident != "Option" {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &seg.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    let syn::GenericArgument::Type(inner) = args.args.first()? else {
        return None;
    };
    Some(inner)
}

/// Source text of a type with the spacing `quote` inserts removed, e.g.
/// `Option<String>`.
pub fn type_name(ty: &syn::Type) -> String {
    quote::quote!(#ty).to_string().replace(' ', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_inner_unwraps_option() {
        let ty: syn::Type = syn::parse_quote!(Option<Base>);
        let inner = option_inner(&ty).unwrap();
        assert_eq!(type_name(inner), "Base");

        let ty: syn::Type = syn::parse_quote!(std::option::Option<i64>);
        assert!(option_inner(&ty).is_some());

        let ty: syn::Type = syn::parse_quote!(Vec<i64>);
        assert!(option_inner(&ty).is_none());
    }

    #[test]
    fn type_name_strips_spaces() {
        let ty: syn::Type = syn::parse_quote!(Option<Vec<u8>>);
        assert_eq!(type_name(&ty), "Option<Vec<u8>>");
    }
}
