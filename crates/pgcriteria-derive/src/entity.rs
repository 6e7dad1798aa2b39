//! Entity derive macro implementation
//!
//! ## Module Structure
//!
//! - `attrs`: Struct and field attribute parsing

mod attrs;

use attrs::{get_column_name, get_table_name};

use heck::ToShoutySnakeCase;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Result};

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let type_name = name.unraw().to_string();

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Entity cannot be derived for generic structs",
        ));
    }

    let table_name = get_table_name(&input)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Entity can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Entity can only be derived for structs",
            ));
        }
    };

    let mut field_metas = Vec::with_capacity(fields.len());
    let mut field_consts = Vec::with_capacity(fields.len());

    for field in fields.iter() {
        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };
        let field_name = field_ident.unraw().to_string();
        let column = match get_column_name(field)? {
            Some(column) => quote! { ::core::option::Option::Some(#column) },
            None => quote! { ::core::option::Option::None },
        };

        field_metas.push(quote! {
            pgcriteria::FieldMeta::new(#field_name, #column)
        });

        let const_ident = format_ident!("COL_{}", field_name.to_shouty_snake_case());
        let doc = format!("Typed reference to the `{field_name}` field.");
        field_consts.push(quote! {
            #[doc = #doc]
            pub const #const_ident: pgcriteria::Field<Self> = pgcriteria::Field::new(#field_name);
        });
    }

    let table_option = match &table_name {
        Some(table) => quote! { ::core::option::Option::Some(#table) },
        None => quote! { ::core::option::Option::None },
    };

    Ok(quote! {
        impl pgcriteria::Entity for #name {
            fn meta() -> &'static pgcriteria::EntityMeta {
                static META: pgcriteria::EntityMeta = pgcriteria::EntityMeta::new(
                    #type_name,
                    #table_option,
                    &[#(#field_metas),*],
                );
                &META
            }
        }

        impl #name {
            #(#field_consts)*
        }

        // Register this entity with the schema registry via inventory
        pgcriteria::inventory::submit! {
            pgcriteria::EntityRegistration::new(<#name as pgcriteria::Entity>::meta)
        }
    })
}
