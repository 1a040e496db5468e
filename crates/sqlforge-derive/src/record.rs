//! Record derive macro implementation

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Result};

use crate::attrs::{FieldMode, field_attr};
use crate::common::syn_types::{option_inner, type_name};

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Record can only be derived for structs",
            ));
        }
    };

    let mut descriptors = Vec::new();
    let mut value_arms = Vec::new();

    for (idx, field) in fields.iter().enumerate() {
        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };
        let attr = field_attr(field)?;
        let idx = proc_macro2::Literal::usize_unsuffixed(idx);
        let field_name = field_ident.to_string();
        let ty = &field.ty;
        let ty_name = type_name(ty);
        let tags = attr.tags.iter().map(|(ns, value)| quote! { (#ns, #value) });

        let (optional, record_ty) = match option_inner(ty) {
            Some(inner) => (true, inner),
            None => (false, ty),
        };

        let kind = match attr.mode {
            FieldMode::Leaf | FieldMode::Json => quote! { ::sqlforge::FieldKind::Leaf },
            FieldMode::Flatten => quote! {
                ::sqlforge::FieldKind::Embedded {
                    optional: #optional,
                    descriptor: <#record_ty as ::sqlforge::Record>::descriptor,
                }
            },
            FieldMode::Nested => quote! {
                ::sqlforge::FieldKind::Nested {
                    optional: #optional,
                    descriptor: <#record_ty as ::sqlforge::Record>::descriptor,
                }
            },
        };

        descriptors.push(quote! {
            ::sqlforge::FieldDescriptor {
                name: #field_name,
                type_name: #ty_name,
                tags: &[#(#tags),*],
                kind: #kind,
            }
        });

        let arm = match attr.mode {
            FieldMode::Leaf => quote! {
                [#idx] => ::std::result::Result::Ok(::std::option::Option::Some(
                    ::sqlforge::ToValue::to_value(&self.#field_ident),
                )),
            },
            FieldMode::Json => quote! {
                [#idx] => ::sqlforge::Value::json(&self.#field_ident)
                    .map(::std::option::Option::Some),
            },
            FieldMode::Flatten | FieldMode::Nested if optional => quote! {
                [#idx, rest @ ..] => match &self.#field_ident {
                    ::std::option::Option::Some(inner) => ::sqlforge::Record::field_value(inner, rest),
                    ::std::option::Option::None => ::std::result::Result::Ok(::std::option::Option::None),
                },
            },
            FieldMode::Flatten | FieldMode::Nested => quote! {
                [#idx, rest @ ..] => ::sqlforge::Record::field_value(&self.#field_ident, rest),
            },
        };
        value_arms.push(arm);
    }

    let struct_name = name.to_string();

    Ok(quote! {
        impl #impl_generics ::sqlforge::Record for #name #ty_generics #where_clause {
            fn descriptor() -> ::sqlforge::TypeDescriptor {
                ::sqlforge::TypeDescriptor {
                    type_name: ::std::any::type_name::<Self>(),
                    fields: ::std::vec![#(#descriptors),*],
                }
            }

            fn field_value(
                &self,
                path: &[usize],
            ) -> ::sqlforge::BuildResult<::std::option::Option<::sqlforge::Value>> {
                match path {
                    #(#value_arms)*
                    _ => ::std::result::Result::Err(::sqlforge::BuildError::message(
                        ::std::format!("{} has no field at path {:?}", #struct_name, path),
                    )),
                }
            }
        }

        impl #impl_generics ::sqlforge::AsRow for #name #ty_generics #where_clause {
            fn insert_row(&self) -> ::sqlforge::BuildResult<::sqlforge::Row> {
                ::sqlforge::row::record_insert_row(self)
            }

            fn update_row(&self) -> ::sqlforge::BuildResult<::sqlforge::Row> {
                ::sqlforge::row::record_update_row(self)
            }
        }
    })
}
