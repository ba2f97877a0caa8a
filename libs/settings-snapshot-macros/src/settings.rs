//! `#[derive(Settings)]` expansion

use proc_macro2::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Field, Fields, Ident, LitStr, Path, Visibility};

/// Parsed `#[setting(...)]` options of one field
#[derive(Default)]
struct FieldOptions {
    rename: Option<LitStr>,
    skip: bool,
    readonly: bool,
    flatten: bool,
    setter: Option<Path>,
}

impl FieldOptions {
    fn parse(field: &Field) -> syn::Result<Self> {
        let mut options = FieldOptions::default();

        for attr in field.attrs.iter().filter(|a| a.path().is_ident("setting")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    options.skip = true;
                } else if meta.path.is_ident("readonly") {
                    options.readonly = true;
                } else if meta.path.is_ident("flatten") {
                    options.flatten = true;
                } else if meta.path.is_ident("rename") {
                    options.rename = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("setter") {
                    let value = meta.value()?;
                    let path = if value.peek(LitStr) {
                        value.parse::<LitStr>()?.parse::<Path>()?
                    } else {
                        value.parse::<Path>()?
                    };
                    options.setter = Some(path);
                } else {
                    return Err(meta.error("unsupported setting attribute"));
                }
                Ok(())
            })?;
        }

        if options.flatten && (options.rename.is_some() || options.readonly || options.setter.is_some()) {
            return Err(syn::Error::new(
                field.span(),
                "`flatten` cannot be combined with `rename`, `readonly` or `setter`",
            ));
        }
        if options.readonly && options.setter.is_some() {
            return Err(syn::Error::new(
                field.span(),
                "`readonly` and `setter` are mutually exclusive",
            ));
        }

        Ok(options)
    }
}

pub fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new(
            input.generics.span(),
            "derive(Settings) does not support generic types",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new(
                    name.span(),
                    "derive(Settings) requires a struct with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new(
                name.span(),
                "derive(Settings) can only be used on structs",
            ))
        }
    };

    let mut pushes = Vec::with_capacity(fields.len());
    for field in fields {
        let options = FieldOptions::parse(field)?;
        if options.skip {
            continue;
        }
        pushes.push(member_tokens(name, field, options));
    }

    let type_name = name.to_string();
    Ok(quote! {
        impl ::settings_snapshot::Settings for #name {
            const TYPE_NAME: &'static str = ::core::concat!(::core::module_path!(), "::", #type_name);

            fn members() -> &'static [::settings_snapshot::MemberDescriptor<Self>] {
                static MEMBERS: ::settings_snapshot::__private::Lazy<
                    ::std::vec::Vec<::settings_snapshot::MemberDescriptor<#name>>,
                > = ::settings_snapshot::__private::Lazy::new(|| {
                    let mut members: ::std::vec::Vec<::settings_snapshot::MemberDescriptor<#name>> =
                        ::std::vec::Vec::new();
                    #(#pushes)*
                    members
                });
                &MEMBERS
            }
        }
    })
}

fn member_tokens(owner: &Ident, field: &Field, options: FieldOptions) -> TokenStream {
    // Named fields always carry an identifier
    let Some(ident) = field.ident.as_ref() else {
        return syn::Error::new(field.span(), "expected a named field").into_compile_error();
    };
    let ty = &field.ty;

    if options.flatten {
        return quote! {
            members.extend(
                <#ty as ::settings_snapshot::Settings>::members()
                    .iter()
                    .map(|m| m.project(|s: &#owner| &s.#ident, |s: &mut #owner| &mut s.#ident)),
            );
        };
    }

    let member_name = options
        .rename
        .map(|lit| lit.value())
        .unwrap_or_else(|| ident.to_string().trim_start_matches("r#").to_string());

    let visibility = match field.vis {
        Visibility::Public(_) => quote!(::settings_snapshot::Visibility::Public),
        _ => quote!(::settings_snapshot::Visibility::Private),
    };

    let write = if options.readonly {
        quote!()
    } else if let Some(setter) = options.setter {
        let setter = resolve_self(setter, owner);
        quote!(.with_setter(|s: &mut #owner, value: #ty| #setter(s, value)))
    } else {
        quote!(.writable(|s: &mut #owner| &mut s.#ident))
    };

    quote! {
        members.push(
            ::settings_snapshot::MemberDescriptor::builder(#member_name, |s: &#owner| &s.#ident)
                .declared_by(<#owner as ::settings_snapshot::Settings>::TYPE_NAME)
                .visibility(#visibility)
                #write
                .build(),
        );
    }
}

/// `Self` is not nameable inside the generated static, so `Self::f` becomes
/// `Owner::f`
fn resolve_self(mut path: Path, owner: &Ident) -> Path {
    if let Some(first) = path.segments.first_mut() {
        if first.ident == "Self" {
            first.ident = owner.clone();
        }
    }
    path
}
