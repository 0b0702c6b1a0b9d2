//! Implementation of `#[derive(Record)]`.
//!
//! Generates the `Record` impl (field accessor and key) plus one
//! SCREAMING_SNAKE_CASE constant per exposed field.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use super::attrs::{parse_record_attrs, FieldKind};

pub fn record_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Record can only be derived for structs",
            ))
        }
    };

    let mut field_matches: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();
    let mut key_field = None;

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attrs = parse_record_attrs(&field.attrs)?;

        if attrs.key {
            if key_field.is_some() {
                return Err(Error::new(
                    field.span(),
                    "only one field can be marked #[record(key)]",
                ));
            }
            key_field = Some(field_name);
        }

        if attrs.skip {
            continue;
        }
        let Some(kind) = attrs.kind else {
            continue;
        };

        let column = attrs.rename.unwrap_or_else(|| field_name.to_string());
        let const_name = format_ident!("{}", to_screaming_snake_case(&column));

        field_constants.push(quote! {
            /// Column name of this field.
            pub const #const_name: &'static str = #column;
        });

        let value_expr = match kind {
            FieldKind::String => quote! {
                match ::listview::RecordText::record_text(&self.#field_name) {
                    ::core::option::Option::Some(text) => ::listview::Value::String(text),
                    ::core::option::Option::None => ::listview::Value::None,
                }
            },
            FieldKind::Number => quote! {
                ::listview::Value::Number(::listview::Number::from(self.#field_name))
            },
            FieldKind::Timestamp => quote! {
                match ::listview::RecordTimestamp::record_timestamp(&self.#field_name) {
                    ::core::option::Option::Some(ts) => ::listview::Value::Timestamp(ts),
                    ::core::option::Option::None => ::listview::Value::None,
                }
            },
            FieldKind::Enum => quote! {
                ::listview::Value::Enum(::listview::RecordEnum::label(&self.#field_name))
            },
            FieldKind::Bool => quote! {
                ::listview::Value::Bool(self.#field_name)
            },
        };

        field_matches.push(quote! {
            #column => #value_expr,
        });
    }

    let key_field = key_field.ok_or_else(|| {
        Error::new(
            input.ident.span(),
            "Record needs exactly one field marked #[record(key)]",
        )
    })?;

    Ok(quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#field_constants)*
        }

        impl #impl_generics ::listview::Record for #struct_name #ty_generics #where_clause {
            fn field_value(&self, field: &str) -> ::listview::Value<'_> {
                match field {
                    #(#field_matches)*
                    _ => ::listview::Value::None,
                }
            }

            fn key(&self) -> ::listview::RecordKey {
                ::listview::RecordKey::new(::std::string::ToString::to_string(&self.#key_field))
            }
        }
    })
}

/// `employeeName` and `employee_name` both become `EMPLOYEE_NAME`.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' || c == ' ' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = c.is_alphanumeric();
        }
    }

    result
}
