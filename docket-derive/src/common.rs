use darling::util::SpannedValue;
use heck::ToKebabCase as _;
use itertools::Itertools as _;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::ToTokens;
use syn::{Attribute, Expr, Ident, ext::IdentExt as _, spanned::Spanned as _};

pub struct IdentString<'a> {
    raw: &'a Ident,
    string: String,
}

impl<'a> IdentString<'a> {
    /// The string form drops any `r#` prefix.
    pub fn new(ident: &'a Ident) -> Self {
        Self {
            string: ident.unraw().to_string(),
            raw: ident,
        }
    }

    pub fn as_str(&self) -> &str {
        self.string.as_str()
    }

    pub fn span(&self) -> Span {
        self.raw.span()
    }
}

impl ToTokens for IdentString<'_> {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        self.raw.to_tokens(tokens);
    }
}

pub fn compute_docs(attrs: &[Attribute]) -> syn::Result<String> {
    attrs
        .iter()
        .filter_map(|attr| match attr.meta {
            syn::Meta::NameValue(ref meta) => Some(meta),
            _ => None,
        })
        .filter(|meta| meta.path.is_ident("doc"))
        .map(|meta| match meta.value {
            Expr::Lit(ref lit) => match lit.lit {
                syn::Lit::Str(ref lit) => Ok(lit.value()),
                _ => Err(syn::Error::new(meta.span(), "malformed #[doc] attribute")),
            },
            Expr::Macro(ref expr) => Err(syn::Error::new(
                expr.span(),
                "macro #[doc] attributes aren't supported",
            )),
            _ => Err(syn::Error::new(meta.span(), "malformed #[doc] attribute")),
        })
        .map_ok(|mut doc| {
            doc.push('\n');
            doc
        })
        .collect()
}

/// Split doc comments into the description (the first paragraph, joined
/// into a single line) and the help (every later paragraph, as written).
pub fn split_docs(docs: &str) -> (String, String) {
    let lines = docs
        .lines()
        .map(|line| line.strip_prefix(' ').unwrap_or(line).trim_end())
        .collect_vec();

    let mut paragraphs = lines
        .split(|line| line.trim().is_empty())
        .filter(|paragraph| !paragraph.is_empty());

    let description = paragraphs
        .next()
        .map(|paragraph| paragraph.iter().map(|line| line.trim()).join(" "))
        .unwrap_or_default();

    let help = paragraphs.map(|paragraph| paragraph.join("\n")).join("\n\n");

    (description, help)
}

/// Compute the public name of a command, which is either explicitly given
/// or the method name in kebab-case.
pub fn compute_command_name(
    name: Option<SpannedValue<String>>,
    method: &IdentString<'_>,
) -> syn::Result<String> {
    match name {
        None => Ok(method.as_str().trim_start_matches('_').to_kebab_case()),
        Some(name) if name.trim().is_empty() => {
            Err(syn::Error::new(name.span(), "command names can't be empty"))
        }
        Some(name) if name.contains(char::is_whitespace) => Err(syn::Error::new(
            name.span(),
            "command names shouldn't include whitespace",
        )),
        Some(name) => Ok(String::clone(&name)),
    }
}

pub fn compute_long(
    long: Option<SpannedValue<String>>,
    parameter: &IdentString<'_>,
) -> syn::Result<SpannedValue<String>> {
    let long = long.unwrap_or_else(|| {
        SpannedValue::new(
            parameter.as_str().trim_start_matches('_').to_kebab_case(),
            parameter.span(),
        )
    });

    if long.starts_with("--") {
        Err(syn::Error::new(
            long.span(),
            "long options don't need to start with --; this is handled automatically",
        ))
    } else if long.starts_with('-') {
        Err(syn::Error::new(long.span(), "long options don't start with '-'"))
    } else if !long.starts_with(|c: char| c.is_alphabetic()) {
        Err(syn::Error::new(
            long.span(),
            "long options should start with something alphabetic",
        ))
    } else if long.contains('=') {
        Err(syn::Error::new(
            long.span(),
            "long options must not include an '=', as it is the argument separator",
        ))
    } else if long.contains('|') {
        Err(syn::Error::new(
            long.span(),
            "long options must not include a '|'; use `short` for a shortcut",
        ))
    } else if long.contains(|c: char| c.is_whitespace()) {
        Err(syn::Error::new(
            long.span(),
            "long options shouldn't include whitespace",
        ))
    } else {
        Ok(long)
    }
}

pub fn compute_short(
    short: Option<SpannedValue<char>>,
    long: &SpannedValue<String>,
) -> syn::Result<SpannedValue<char>> {
    let c = match short {
        Some(short) => short,
        None => match long.chars().next() {
            Some(c) => SpannedValue::new(c, long.span()),
            None => return Err(syn::Error::new(long.span(), "long option is empty")),
        },
    };

    if *c == '-' {
        Err(syn::Error::new(c.span(), "shortcut must not be '-'"))
    } else if *c == '|' {
        Err(syn::Error::new(c.span(), "shortcut must not be '|'"))
    } else if !c.is_ascii_graphic() {
        Err(syn::Error::new(
            c.span(),
            "shortcut should be an ascii printable",
        ))
    } else {
        Ok(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_paragraph_is_the_description() {
        let docs = " Deploy the site\n to a server.\n\n Pushes the build.\n Then restarts.\n\n\n Done.\n";
        let (description, help) = split_docs(docs);

        assert_eq!(description, "Deploy the site to a server.");
        assert_eq!(help, "Pushes the build.\nThen restarts.\n\nDone.");
    }

    #[test]
    fn no_docs() {
        assert_eq!(split_docs(""), (String::new(), String::new()));
    }

    #[test]
    fn indentation_inside_paragraphs_is_kept() {
        let (description, help) = split_docs(" Summary\n\n Example:\n     deploy prod\n");

        assert_eq!(description, "Summary");
        assert_eq!(help, "Example:\n    deploy prod");
    }
}
