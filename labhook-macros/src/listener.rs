//! `#[derive(Listener)]`.

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::{
    DeriveInput, Ident, LitStr, Path, Token,
    ext::IdentExt,
    parse::ParseStream,
};

/// Capability key (also the accessor prefix) and payload type, in declaration order.
const CAPABILITIES: &[(&str, &str)] = &[
    ("push", "PushEvent"),
    ("tag_push", "TagPushEvent"),
    ("issue", "IssueEvent"),
    ("comment", "NoteEvent"),
    ("merge_request", "MergeRequestEvent"),
    ("wiki_page", "WikiPageEvent"),
    ("pipeline", "PipelineEvent"),
    ("build", "JobEvent"),
    ("deployment", "DeploymentEvent"),
    ("release", "ReleaseEvent"),
    ("subgroup", "SubgroupEvent"),
    ("feature_flag", "FeatureFlagEvent"),
    ("member", "MemberEvent"),
    ("emoji", "EmojiEvent"),
    ("access_token", "AccessTokenEvent"),
];

enum ListenerName {
    Literal(LitStr),
    Field(Ident),
}

/// Parsed contents of every `#[listener(...)]` attribute on the type.
#[derive(Default)]
struct ListenerArgs {
    capabilities: Vec<(Ident, Ident)>,
    name: Option<ListenerName>,
    krate: Option<Path>,
}

impl ListenerArgs {
    fn declare(&mut self, key: &Ident) -> syn::Result<()> {
        let Some((_, payload)) = CAPABILITIES.iter().find(|(k, _)| key == k) else {
            return Err(syn::Error::new(
                key.span(),
                format!("unknown capability `{key}`"),
            ));
        };
        self.declare_known(key, payload);
        Ok(())
    }

    fn declare_known(&mut self, key: &Ident, payload: &str) {
        if self.capabilities.iter().any(|(k, _)| k == key) {
            return;
        }
        self.capabilities
            .push((key.clone(), Ident::new(payload, key.span())));
    }

    fn parse_into(&mut self, input: ParseStream) -> syn::Result<()> {
        while !input.is_empty() {
            // `crate` is a keyword, so accept any identifier here.
            let ident = input.call(Ident::parse_any)?;

            match ident.to_string().as_str() {
                "all" => {
                    for (key, payload) in CAPABILITIES {
                        self.declare_known(&Ident::new(key, ident.span()), payload);
                    }
                }
                "name" => {
                    input.parse::<Token![=]>()?;
                    self.set_name(&ident, ListenerName::Literal(input.parse()?))?;
                }
                "name_field" => {
                    input.parse::<Token![=]>()?;
                    self.set_name(&ident, ListenerName::Field(input.parse()?))?;
                }
                "crate" => {
                    input.parse::<Token![=]>()?;
                    let lit: LitStr = input.parse()?;
                    self.krate = Some(lit.parse()?);
                }
                _ => self.declare(&ident)?,
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }
        Ok(())
    }

    fn set_name(&mut self, key: &Ident, name: ListenerName) -> syn::Result<()> {
        if self.name.is_some() {
            return Err(syn::Error::new(
                key.span(),
                "listener name given more than once",
            ));
        }
        self.name = Some(name);
        Ok(())
    }
}

pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let mut args = ListenerArgs::default();
    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("listener")) {
        attr.parse_args_with(|stream: ParseStream| args.parse_into(stream))?;
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let krate = args
        .krate
        .clone()
        .unwrap_or_else(|| syn::parse_quote!(::labhook));

    let name_fn = match &args.name {
        Some(ListenerName::Literal(lit)) => quote! {
            fn name(&self) -> &str {
                #lit
            }
        },
        Some(ListenerName::Field(field)) => quote! {
            fn name(&self) -> &str {
                ::core::convert::AsRef::<str>::as_ref(&self.#field)
            }
        },
        None => {
            let lit = LitStr::new(&name.to_string(), Span::call_site());
            quote! {
                fn name(&self) -> &str {
                    #lit
                }
            }
        }
    };

    let accessors = args.capabilities.iter().map(|(key, payload)| {
        let accessor = format_ident!("{}_subscriber", key);
        quote! {
            fn #accessor(&self) -> ::core::option::Option<&dyn #krate::DynSubscriber<#krate::event::#payload>> {
                ::core::option::Option::Some(self)
            }
        }
    });

    Ok(quote! {
        impl #impl_generics #krate::Listener for #name #ty_generics #where_clause {
            #name_fn

            #(#accessors)*
        }
    })
}
