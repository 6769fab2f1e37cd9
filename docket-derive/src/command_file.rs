use darling::{
    FromAttributes as _, FromMeta,
    util::{Override, SpannedValue},
};
use proc_macro2::TokenStream as TokenStream2;
use quote::{ToTokens, quote};
use syn::{
    Attribute, Expr, ExprLit, ExprUnary, FnArg, ImplItem, ImplItemFn, ItemImpl, Lit, LitInt, Pat,
    PatType, Type, UnOp, Visibility, spanned::Spanned as _,
};

use crate::common::{
    IdentString, compute_command_name, compute_docs, compute_long, compute_short, split_docs,
};

/// A default value, taken as an arbitrary expression. An array expression
/// gives the defaults of a variadic argument.
#[derive(Debug)]
struct DefaultExpr(Expr);

impl FromMeta for DefaultExpr {
    fn from_expr(expr: &Expr) -> darling::Result<Self> {
        Ok(Self(expr.clone()))
    }
}

#[derive(darling::FromMeta, Debug)]
struct UsageAttr {
    example: String,
    #[darling(default)]
    description: String,
}

#[derive(darling::FromAttributes, Debug)]
#[darling(attributes(docket))]
struct RawCommandAttr {
    name: Option<SpannedValue<String>>,
    #[darling(multiple)]
    alias: Vec<String>,
    #[darling(multiple)]
    usage: Vec<UsageAttr>,
    skip: Option<()>,
}

#[derive(darling::FromAttributes, Debug)]
#[darling(attributes(docket))]
struct RawParameterAttr {
    option: Option<()>,
    long: Option<SpannedValue<String>>,
    short: Option<Override<SpannedValue<char>>>,
    default: Option<SpannedValue<DefaultExpr>>,
    help: Option<String>,
}

/// The parts of a parameter type that decide how it is declared.
enum Shape {
    Bool,
    Sequence,
    Maybe,
    Plain,
}

impl Shape {
    fn of(ty: &Type) -> Self {
        match *ty {
            Type::Reference(ref reference) => Self::of(&reference.elem),
            Type::Paren(ref paren) => Self::of(&paren.elem),
            Type::Group(ref group) => Self::of(&group.elem),
            Type::Slice(_) | Type::Array(_) => Self::Sequence,
            Type::Path(ref path) => match path.path.segments.last() {
                Some(segment) if segment.ident == "bool" => Self::Bool,
                Some(segment) if segment.ident == "Vec" => Self::Sequence,
                Some(segment) if segment.ident == "Option" => Self::Maybe,
                _ => Self::Plain,
            },
            _ => Self::Plain,
        }
    }
}

fn is_docket_attr(attr: &Attribute) -> bool {
    attr.path().is_ident("docket")
}

/// Unsuffixed integer literals are read as `i64`, so that a large literal
/// doesn't fall back to `i32`.
fn widen_literal(expr: &Expr) -> Option<Expr> {
    match *expr {
        Expr::Lit(ref lit) => match lit.lit {
            Lit::Int(ref int) if int.suffix().is_empty() => {
                let widened = LitInt::new(&format!("{}i64", int.base10_digits()), int.span());
                Some(Expr::Lit(ExprLit {
                    attrs: lit.attrs.clone(),
                    lit: Lit::Int(widened),
                }))
            }
            _ => None,
        },
        Expr::Unary(ref unary) if matches!(unary.op, UnOp::Neg(_)) => {
            widen_literal(&unary.expr).map(|inner| {
                Expr::Unary(ExprUnary {
                    expr: Box::new(inner),
                    ..unary.clone()
                })
            })
        }
        Expr::Paren(ref paren) => widen_literal(&paren.expr),
        _ => None,
    }
}

fn scalar(expr: &Expr) -> TokenStream2 {
    let expr = widen_literal(expr).unwrap_or_else(|| expr.clone());
    quote! { ::docket::Scalar::from(#expr) }
}

/// Compute the `.with_argument(...)` or `.with_option(...)` call for a
/// single method parameter.
fn parameter_info(parameter: &PatType) -> syn::Result<TokenStream2> {
    let parsed = RawParameterAttr::from_attributes(&parameter.attrs)?;

    let ident = match *parameter.pat {
        Pat::Ident(ref pat) if pat.subpat.is_none() => IdentString::new(&pat.ident),
        ref pat => {
            return Err(syn::Error::new(
                pat.span(),
                "command parameters must be plain identifiers",
            ));
        }
    };

    let help = parsed.help.unwrap_or_default();
    let shape = Shape::of(&parameter.ty);

    match parsed.option {
        Some(()) => {
            let long = compute_long(parsed.long, &ident)?;

            let specifier = match parsed.short {
                None => String::clone(&long),
                Some(short) => format!("{}|{}", *long, *compute_short(short.explicit(), &long)?),
            };

            let kind = match (shape, parsed.default) {
                (Shape::Bool, None) => quote! { ::docket::info::OptionKind::Flag },
                (Shape::Bool, Some(default)) => {
                    return Err(syn::Error::new(
                        default.span(),
                        "flags don't take a default; they are either present or absent",
                    ));
                }
                (_, Some(default)) => match default.0 {
                    Expr::Array(_) => {
                        return Err(syn::Error::new(
                            default.span(),
                            "options take a single default value",
                        ));
                    }
                    ref expr => {
                        let value = scalar(expr);
                        quote! { ::docket::info::OptionKind::Valued(#value) }
                    }
                },
                (_, None) => quote! {
                    ::docket::info::OptionKind::Valued(::docket::Scalar::Null)
                },
            };

            Ok(quote! { .with_option(#specifier, #kind, #help) })
        }
        None => {
            if let Some(long) = parsed.long {
                return Err(syn::Error::new(
                    long.span(),
                    "`long` only applies to options; add `option`",
                ));
            }

            if let Some(short) = parsed.short {
                return Err(syn::Error::new(
                    short.explicit().map_or_else(|| parameter.span(), |short| short.span()),
                    "`short` only applies to options; add `option`",
                ));
            }

            let name = ident.as_str().trim_start_matches('_');

            let kind = match (shape, parsed.default) {
                (shape, Some(default)) => match (shape, &default.0) {
                    (_, Expr::Array(array)) => {
                        let values = array.elems.iter().map(scalar);
                        quote! {
                            ::docket::info::ArgumentKind::Variadic(::std::vec![#(#values),*])
                        }
                    }
                    (Shape::Sequence, _) => {
                        return Err(syn::Error::new(
                            default.span(),
                            "variadic arguments take a list of defaults, like `default = [\"a\"]`",
                        ));
                    }
                    (_, expr) => {
                        let value = scalar(expr);
                        quote! { ::docket::info::ArgumentKind::Optional(#value) }
                    }
                },
                (Shape::Sequence, None) => quote! {
                    ::docket::info::ArgumentKind::Variadic(::std::vec::Vec::new())
                },
                (Shape::Maybe, None) => quote! {
                    ::docket::info::ArgumentKind::Optional(::docket::Scalar::Null)
                },
                (Shape::Bool | Shape::Plain, None) => quote! {
                    ::docket::info::ArgumentKind::Required
                },
            };

            Ok(quote! { .with_argument(#name, #kind, #help) })
        }
    }
}

/// A public method with a `self` receiver. These are the candidate commands.
fn is_candidate(method: &ImplItemFn) -> bool {
    matches!(method.vis, Visibility::Public(_)) && method.sig.receiver().is_some()
}

/// Compute the metadata record expression for a single method, or `None` if
/// the method is skipped.
fn method_info(method: &ImplItemFn) -> syn::Result<Option<(String, TokenStream2)>> {
    let parsed = RawCommandAttr::from_attributes(&method.attrs)?;

    if parsed.skip.is_some() {
        return Ok(None);
    }

    let ident = IdentString::new(&method.sig.ident);
    let method_name = ident.as_str().to_owned();
    let name = compute_command_name(parsed.name, &ident)?;
    let (description, help) = split_docs(&compute_docs(&method.attrs)?);

    let aliases = parsed.alias.iter();
    let examples = parsed.usage.iter().map(|usage| usage.example.as_str());
    let example_descriptions = parsed.usage.iter().map(|usage| usage.description.as_str());

    let parameters = method
        .sig
        .inputs
        .iter()
        .filter_map(|input| match input {
            FnArg::Typed(parameter) => Some(parameter_info(parameter)),
            FnArg::Receiver(_) => None,
        })
        .collect::<syn::Result<Vec<_>>>()?;

    let info = quote! {
        ::docket::info::CommandInfo::new(#name, #method_name)
            .with_description(#description)
            .with_help(#help)
            #(.with_alias(#aliases))*
            #(.with_usage(#examples, #example_descriptions))*
            #(#parameters)*
    };

    Ok(Some((method_name, info)))
}

/// Remove every `#[docket]` attribute from the method and its parameters, so
/// that the impl block compiles without them. `#[docket]` on anything other
/// than a candidate method is an error.
fn strip_attrs(method: &mut ImplItemFn) -> syn::Result<()> {
    if !is_candidate(method) {
        let misplaced = method.attrs.iter().chain(
            method
                .sig
                .inputs
                .iter()
                .filter_map(|input| match input {
                    FnArg::Typed(parameter) => Some(parameter.attrs.iter()),
                    FnArg::Receiver(_) => None,
                })
                .flatten(),
        );

        if let Some(attr) = misplaced.into_iter().find(|attr| is_docket_attr(attr)) {
            return Err(syn::Error::new(
                attr.span(),
                "#[docket] attributes only apply to public methods that take `self`",
            ));
        }
    }

    method.attrs.retain(|attr| !is_docket_attr(attr));
    method.sig.inputs.iter_mut().for_each(|input| {
        if let FnArg::Typed(parameter) = input {
            parameter.attrs.retain(|attr| !is_docket_attr(attr));
        }
    });

    Ok(())
}

pub fn command_file_result(attr: TokenStream2, item: TokenStream2) -> syn::Result<TokenStream2> {
    if !attr.is_empty() {
        return Err(syn::Error::new(
            attr.span(),
            "#[command_file] doesn't take any arguments",
        ));
    }

    let mut item: ItemImpl = syn::parse2(item)?;

    if let Some((_, ref path, _)) = item.trait_ {
        return Err(syn::Error::new(
            path.span(),
            "#[command_file] goes on an inherent impl block, not a trait impl",
        ));
    }

    let (methods, infos): (Vec<String>, Vec<TokenStream2>) = item
        .items
        .iter()
        .filter_map(|item| match item {
            ImplItem::Fn(method) if is_candidate(method) => Some(method),
            _ => None,
        })
        .filter_map(|method| method_info(method).transpose())
        .collect::<syn::Result<Vec<_>>>()?
        .into_iter()
        .unzip();

    item.items.iter_mut().try_for_each(|item| match item {
        ImplItem::Fn(method) => strip_attrs(method),
        _ => Ok(()),
    })?;

    let self_ty = &item.self_ty;
    let (impl_generics, _, where_clause) = item.generics.split_for_impl();

    let command_file_impl = quote! {
        impl #impl_generics ::docket::CommandFile for #self_ty #where_clause {
            const METHODS: &'static [&'static str] = &[ #(#methods,)* ];

            fn command_info(
                method: &str,
            ) -> ::core::result::Result<::docket::info::CommandInfo, ::docket::errors::InfoError> {
                match method {
                    #( #methods => ::core::result::Result::Ok(#infos), )*
                    _ => ::core::result::Result::Err(
                        ::docket::errors::InfoError::unknown_method(method)
                    ),
                }
            }
        }
    };

    let mut tokens = item.into_token_stream();
    tokens.extend(command_file_impl);
    Ok(tokens)
}
