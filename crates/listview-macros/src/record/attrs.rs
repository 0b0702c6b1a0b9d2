//! Attribute parsing for the Record derive macro.
//!
//! Parses the `#[record(...)]` field attributes.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Ident, Lit, Meta, Result, Token,
};

/// How a field is exposed to the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `#[record(String)]`: searchable text, `String` or `Option<String>`.
    String,
    /// `#[record(Number)]`: any primitive number.
    Number,
    /// `#[record(Timestamp)]`: read through `RecordTimestamp`.
    Timestamp,
    /// `#[record(Enum)]`: categorical value read through `RecordEnum`.
    Enum,
    /// `#[record(Bool)]`
    Bool,
}

const EXPECTED_KINDS: &str = "String, Number, Timestamp, Enum, Bool";

impl FieldKind {
    pub fn from_ident(ident: &Ident) -> Result<Self> {
        Self::from_name(&ident.to_string(), ident.span())
    }

    pub fn from_name(name: &str, span: Span) -> Result<Self> {
        match name {
            "String" | "string" | "text" => Ok(FieldKind::String),
            "Number" | "number" => Ok(FieldKind::Number),
            "Timestamp" | "timestamp" => Ok(FieldKind::Timestamp),
            "Enum" | "enum" | "enumeration" | "category" => Ok(FieldKind::Enum),
            "Bool" | "bool" | "boolean" => Ok(FieldKind::Bool),
            other => Err(Error::new(
                span,
                format!("unknown record field kind: '{other}'. Expected one of: {EXPECTED_KINDS}"),
            )),
        }
    }
}

/// Field-level attributes from `#[record(...)]`.
#[derive(Debug, Clone)]
pub struct RecordAttr {
    pub kind: Option<FieldKind>,
    /// This field provides the record's identity.
    pub key: bool,
    pub skip: bool,
    /// Column name (default: the field name).
    pub rename: Option<String>,
    pub span: Span,
}

impl Default for RecordAttr {
    fn default() -> Self {
        RecordAttr {
            kind: None,
            key: false,
            skip: false,
            rename: None,
            span: Span::call_site(),
        }
    }
}

impl RecordAttr {
    fn set_kind(&mut self, kind: FieldKind, span: Span) -> Result<()> {
        if self.kind.is_some() {
            return Err(Error::new(span, "field kind specified more than once"));
        }
        self.kind = Some(kind);
        self.span = span;
        Ok(())
    }
}

impl Parse for RecordAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = RecordAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) => {
                    if p.is_ident("skip") {
                        attr.skip = true;
                    } else if p.is_ident("key") {
                        attr.key = true;
                    } else if let Some(ident) = p.get_ident() {
                        attr.set_kind(FieldKind::from_ident(ident)?, ident.span())?;
                    } else {
                        return Err(Error::new(
                            p.span(),
                            format!("expected a field kind ({EXPECTED_KINDS}), key, or skip"),
                        ));
                    }
                }

                Meta::NameValue(nv) => {
                    let syn::Expr::Lit(syn::ExprLit {
                        lit: Lit::Str(s), ..
                    }) = &nv.value
                    else {
                        return Err(Error::new(
                            nv.value.span(),
                            "expected a string literal",
                        ));
                    };

                    if nv.path.is_ident("rename") {
                        attr.rename = Some(s.value());
                    } else if nv.path.is_ident("kind") {
                        // kind = "enum" for names that read better lowercase
                        attr.set_kind(FieldKind::from_name(&s.value(), s.span())?, s.span())?;
                    } else {
                        return Err(Error::new(
                            nv.path.span(),
                            "unknown attribute. Expected: rename or kind",
                        ));
                    }
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown record attribute. Expected a field kind, key, skip, rename = \"...\", or kind = \"...\"",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

/// Extracts `#[record(...)]` from a field's attributes.
pub fn parse_record_attrs(attrs: &[Attribute]) -> Result<RecordAttr> {
    for attr in attrs {
        if attr.path().is_ident("record") {
            return attr.parse_args::<RecordAttr>();
        }
    }
    Ok(RecordAttr::default())
}
