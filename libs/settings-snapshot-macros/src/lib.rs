//! Procedural macros for settings-snapshot
//!
//! * `#[derive(Settings)]` - generates the member descriptor list of a
//!   settings struct

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod settings;

/// Derives `settings_snapshot::Settings` for a struct with named fields.
///
/// Every named field becomes a member descriptor, in declaration order.
/// `pub` fields are public, all others private (and therefore never
/// surfaced as settings).
///
/// Field attributes:
/// * `#[setting(rename = "name")]` - member name other than the field name
/// * `#[setting(skip)]` - no descriptor for this field
/// * `#[setting(readonly)]` - readable but not writable
/// * `#[setting(setter = path)]` - write through `fn(&mut Self, FieldTy) -> anyhow::Result<()>`
/// * `#[setting(flatten)]` - inline the members of a nested `Settings` type
///
/// ```ignore
/// #[derive(Settings)]
/// pub struct Network {
///     #[setting(flatten)]
///     pub base: SettingsBase,
///     #[setting(setter = Self::set_port)]
///     pub port: u32,
///     #[setting(rename = "host_name")]
///     pub host: String,
/// }
/// ```
#[proc_macro_derive(Settings, attributes(setting))]
pub fn derive_settings(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    settings::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
