use std::collections::{HashMap, HashSet};

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    Data, DeriveInput, Error, ExprClosure, Field, Fields, GenericArgument, Ident, LitInt, LitStr,
    Pat, PathArguments, Result, Token, Type,
    parse::{Parse, ParseStream},
    spanned::Spanned,
};

pub(crate) fn expand_from_record(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new(
            input.span(),
            "`FromRecord` may only be derived on structs.",
        ))?
    };

    let Fields::Named(fields) = &data.fields else {
        Err(Error::new(
            input.span(),
            "`FromRecord` may only be derived on structs with named fields.",
        ))?
    };

    let fields = fields
        .named
        .iter()
        .map(FieldMetadata::parse)
        .map(Result::transpose)
        .flatten() // Skip fields without an attribute.
        .collect::<Result<Vec<_>>>()?;

    // Method name, to the value type it receives and its match arms.
    let mut methods: HashMap<String, (Type, Vec<TokenStream2>)> = HashMap::new();
    let mut seen = HashSet::new();

    for field in fields {
        if !seen.insert(field.identifier.to_string()) {
            Err(Error::new(
                field.identifier.span(),
                "Field identifiers must be unique.",
            ))?
        }

        let name = &field.name;
        let assignment = if let Some((field_type, handler)) = &field.handler {
            let body = &handler.body;
            let acc = handler.inputs.iter().nth(0).unwrap();
            let val = handler.inputs.iter().nth(1).unwrap();

            quote! {
                (|#acc: &mut #field_type, #val| {#body})(&mut self.#name, value)
            }
        } else {
            quote! {
                self.#name = Some(value)
            }
        };

        let pattern = field.identifier.pattern();
        let method = method_name(&field.primitive)?;

        methods
            .entry(method)
            .or_insert_with(|| (field.primitive.clone(), Vec::new()))
            .1
            .push(quote! { #pattern => { #assignment } });
    }

    let methods = methods.into_iter().map(|(method, (primitive, cases))| {
        let method = format_ident!("{}", method);

        quote! {
            fn #method(&mut self, key: Key, value: #primitive) {
                match key {
                    #(#cases)*
                    _ => {}
                };
            }
        }
    });

    let name = &input.ident;

    let expanded = quote! {
        impl FromRecord for #name {
            #(#methods)*
        }
    };

    Ok(expanded.into())
}

/// The receiver method for values of a type.
fn method_name(primitive: &Type) -> Result<String> {
    let ident = match primitive {
        Type::Path(path) => path.path.segments.last().map(|s| s.ident.to_string()),
        _ => None,
    };

    match ident.as_deref() {
        Some(p @ ("u8" | "u16" | "u32" | "u64" | "f64")) => Ok(format!("add_{p}")),
        Some("Version") => Ok("add_version".into()),
        Some("ConfigFlags") => Ok("add_config_flags".into()),
        Some("PayloadMask") => Ok("add_payload_mask".into()),
        _ => Err(Error::new_spanned(
            primitive,
            "Value type must be one of `u8`, `u16`, `u32`, `u64`, `f64`, `Version`, `ConfigFlags` or `PayloadMask`.",
        )),
    }
}

#[derive(Debug)]
struct FieldMetadata {
    name: Ident,
    primitive: Type,
    identifier: FieldIdentifier,
    handler: Option<(Type, ExprClosure)>,
}

#[derive(Debug)]
enum FieldIdentifier {
    Name(LitStr),
    Index(LitInt),
}

impl FieldIdentifier {
    fn pattern(&self) -> TokenStream2 {
        match self {
            Self::Name(name) => quote! { Key::Name(#name) },
            Self::Index(index) => quote! { Key::Index(#index) },
        }
    }

    fn span(&self) -> proc_macro2::Span {
        match self {
            Self::Name(name) => name.span(),
            Self::Index(index) => index.span(),
        }
    }
}

impl std::fmt::Display for FieldIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(name) => write!(f, "name:{}", name.value()),
            Self::Index(index) => write!(f, "index:{}", index.base10_digits()),
        }
    }
}

impl FieldMetadata {
    fn parse(field: &Field) -> Result<Option<Self>> {
        let name = field.ident.clone().unwrap();

        let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("field")) else {
            return Ok(None);
        };

        let FieldAttribute {
            identifier,
            handler,
        } = attr.meta.require_list()?.parse_args()?;

        let primitive = if let Some(handler) = &handler {
            if handler.inputs.len() != 2 {
                Err(Error::new_spanned(
                    handler,
                    "Handler closure must have two parameters.",
                ))?
            }

            let parameter = &handler.inputs[1];

            let Pat::Type(pat_type) = parameter else {
                Err(Error::new_spanned(
                    parameter,
                    "Handler closure's second parameter must be annotated with the expected value type.",
                ))?
            };

            (*pat_type.ty).clone()
        } else {
            let Type::Path(path) = &field.ty else {
                Err(Error::new_spanned(
                    &field.ty,
                    "Field must have a type annotation.",
                ))?
            };

            let Some(segment) = path.path.segments.last() else {
                Err(Error::new_spanned(
                    &path.path.segments,
                    "Field must have a type annotation.",
                ))?
            };

            if segment.ident != "Option" {
                Err(Error::new_spanned(
                    &segment.ident,
                    "Field without a handler must have type `Option<T>`.",
                ))?
            }

            let PathArguments::AngleBracketed(arguments) = &segment.arguments else {
                Err(Error::new_spanned(
                    &segment.arguments,
                    "Field of type `Option<T>` must have a generic parameter.",
                ))?
            };

            let Some(argument) = arguments.args.first() else {
                Err(Error::new_spanned(
                    &arguments.args,
                    "Field of type `Option<T>` must have a generic parameter.",
                ))?
            };

            let GenericArgument::Type(inner_type) = argument else {
                Err(Error::new_spanned(
                    argument,
                    "Generic argument of a field of type `Option<T>` must be a type.",
                ))?
            };

            inner_type.clone()
        };

        let handler = handler.map(|h| (field.ty.clone(), h));

        Ok(Some(Self {
            name,
            primitive,
            identifier,
            handler,
        }))
    }
}

#[derive(Debug)]
struct FieldAttribute {
    identifier: FieldIdentifier,
    handler: Option<ExprClosure>,
}

impl Parse for FieldAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        let lookahead = input.lookahead1();
        let identifier = if lookahead.peek(LitStr) {
            FieldIdentifier::Name(input.parse()?)
        } else if lookahead.peek(LitInt) {
            FieldIdentifier::Index(input.parse()?)
        } else {
            Err(lookahead.error())?
        };

        let handler = if !input.is_empty() {
            input.parse::<Token![,]>()?;
            Some(input.parse::<ExprClosure>()?)
        } else {
            None
        };

        Ok(Self {
            identifier,
            handler,
        })
    }
}
