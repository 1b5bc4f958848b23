//! Implementation of #[derive(Bind)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Ident, LitStr, Token, Visibility};

pub fn derive_bind_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// One argument inside `#[ogp(...)]`: tag text or a flag.
enum Arg {
    Tag(LitStr),
    Flag(Ident),
}

impl Parse for Arg {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(LitStr) {
            input.parse().map(Arg::Tag)
        } else {
            input.call(Ident::parse_any).map(Arg::Flag)
        }
    }
}

fn ogp_args(attrs: &[Attribute]) -> syn::Result<Vec<Arg>> {
    let mut args = Vec::new();
    for attr in attrs.iter().filter(|a| a.path().is_ident("ogp")) {
        let parsed = attr.parse_args_with(Punctuated::<Arg, Token![,]>::parse_terminated)?;
        args.extend(parsed);
    }
    Ok(args)
}

#[derive(Default)]
struct FieldAttrs {
    tag: Option<LitStr>,
    flatten: bool,
}

impl FieldAttrs {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for arg in ogp_args(attrs)? {
            match arg {
                Arg::Tag(lit) => {
                    if out.tag.is_some() {
                        return Err(syn::Error::new_spanned(lit, "[ogp] duplicate tag"));
                    }
                    out.tag = Some(lit);
                }
                Arg::Flag(flag) if flag == "flatten" => out.flatten = true,
                Arg::Flag(flag) if flag == "skip" => {
                    out.tag = Some(LitStr::new("-", flag.span()));
                }
                Arg::Flag(flag) => {
                    return Err(syn::Error::new_spanned(
                        &flag,
                        format!("[ogp] unknown field attribute `{}`", flag),
                    ));
                }
            }
        }
        Ok(out)
    }

    fn excluded(&self) -> bool {
        self.tag.as_ref().is_some_and(|lit| lit.value().trim() == "-")
    }
}

fn is_from_str(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut from_str = false;
    for arg in ogp_args(attrs)? {
        match arg {
            Arg::Flag(flag) if flag == "from_str" => from_str = true,
            Arg::Flag(flag) => {
                return Err(syn::Error::new_spanned(
                    &flag,
                    format!("[ogp] unknown container attribute `{}`", flag),
                ));
            }
            Arg::Tag(lit) => {
                return Err(syn::Error::new_spanned(
                    lit,
                    "[ogp] tags belong on fields, not on the type",
                ));
            }
        }
    }
    Ok(from_str)
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "[ogp] Bind cannot be derived for generic types",
        ));
    }

    if is_from_str(&input.attrs)? {
        return Ok(quote! {
            ::ogp_parser::text_scalar!(#name);
        });
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "[ogp] Bind requires a struct with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "[ogp] Bind can only be derived for structs; use #[ogp(from_str)] for text values",
            ));
        }
    };

    let mut defs = Vec::new();
    let mut arms = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        let Some(ident) = &field.ident else {
            continue;
        };
        let attrs = FieldAttrs::parse(&field.attrs)?;
        let ident_str = ident.unraw().to_string();
        let settable = !matches!(field.vis, Visibility::Inherited);
        let flatten = attrs.flatten;
        let tag = match &attrs.tag {
            Some(lit) => quote!(::core::option::Option::Some(#lit)),
            None => quote!(::core::option::Option::None),
        };

        // Fields that are never bound do not need to implement Bind.
        let bound = settable && !attrs.excluded();
        let ty = &field.ty;
        let shape = if bound {
            quote!(<#ty as ::ogp_parser::Bind>::shape)
        } else {
            quote!(::ogp_parser::Shape::unbound)
        };

        defs.push(quote! {
            ::ogp_parser::FieldDef {
                ident: #ident_str,
                tag: #tag,
                flatten: #flatten,
                settable: #settable,
                shape: #shape,
            }
        });

        if bound {
            arms.push(quote! {
                #index => ::core::option::Option::Some(&mut self.#ident as &mut dyn ::ogp_parser::Bind)
            });
        }
    }

    let name_str = name.to_string();

    Ok(quote! {
        impl ::ogp_parser::Bind for #name {
            fn shape() -> ::ogp_parser::Shape {
                static FIELDS: &[::ogp_parser::FieldDef] = &[#(#defs),*];
                ::ogp_parser::Shape::Record(::ogp_parser::RecordShape {
                    name: #name_str,
                    fields: FIELDS,
                })
            }

            fn location(
                &mut self,
            ) -> ::core::result::Result<::ogp_parser::Location<'_>, ::ogp_parser::LocationError> {
                ::core::result::Result::Ok(::ogp_parser::Location::Record(self))
            }

            fn vacant(
                slot: &mut ::core::option::Option<Self>,
            ) -> ::core::result::Result<::ogp_parser::Location<'_>, ::ogp_parser::LocationError> {
                <Self as ::ogp_parser::Bind>::location(
                    slot.get_or_insert_with(<Self as ::core::default::Default>::default),
                )
            }
        }

        impl ::ogp_parser::Record for #name {
            fn field(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<&mut dyn ::ogp_parser::Bind> {
                match index {
                    #(#arms,)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}
