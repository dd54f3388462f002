//! Derive macros for labhook.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod listener;

/// Derive macro for implementing `Listener`.
///
/// The `#[listener(...)]` attribute lists the capabilities the type declares.
/// For every capability listed the type must implement `Subscriber` for that
/// capability's payload, or the generated accessor will not compile.
///
/// ```rust,ignore
/// #[derive(Listener)]
/// #[listener(push, comment, name = "notifier")]
/// struct Notifier { /* ... */ }
///
/// impl Subscriber<PushEvent> for Notifier { /* ... */ }
/// impl Subscriber<NoteEvent> for Notifier { /* ... */ }
/// ```
///
/// Keys:
/// - capability keys: `push`, `tag_push`, `issue`, `comment`, `merge_request`,
///   `wiki_page`, `pipeline`, `build`, `deployment`, `release`, `subgroup`,
///   `feature_flag`, `member`, `emoji`, `access_token`
/// - `all`: every capability
/// - `name = "..."`: a fixed listener name
/// - `name_field = field`: take the name from a `String` or `&str` field
/// - `crate = "path"`: where the contracts live (default `::labhook`)
#[proc_macro_derive(Listener, attributes(listener))]
pub fn derive_listener(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    listener::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
