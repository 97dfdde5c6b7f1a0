//! Derive macros for shopping list action enums
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Classifies action variants so the reducer and the
//!   runtime can tell persisted mutations apart from lifecycle and view actions
//!
//! # Example
//!
//! ```ignore
//! use shopping_list_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! enum ListAction {
//!     #[mutation]
//!     AddItem { text: String },
//!
//!     #[lifecycle]
//!     Hydrate,
//!
//!     SetFilter { filter: Filter },
//! }
//!
//! // Generated methods:
//! assert!(ListAction::AddItem { text: "Milk".into() }.is_mutation());
//! assert!(ListAction::Hydrate.is_lifecycle());
//! assert_eq!(ListAction::Hydrate.name(), "Hydrate");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Ident};

/// Derive macro for Action enums
///
/// Generates helper methods for action enums:
/// - `is_mutation()` - true if the variant changes the persisted collection
/// - `is_lifecycle()` - true if the variant belongs to the load lifecycle
/// - `name()` - the variant name, used as a structured log field
///
/// Variants with neither attribute are view actions: they touch state but are
/// never persisted.
///
/// # Attributes
///
/// - `#[mutation]` - Mark a variant as a persisted mutation
/// - `#[lifecycle]` - Mark a variant as part of hydration
///
/// # Panics
///
/// This macro will produce a compile error (not a runtime panic) if:
/// - Applied to a non-enum type
/// - A variant has both `#[mutation]` and `#[lifecycle]` attributes
#[proc_macro_derive(Action, attributes(mutation, lifecycle))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(input, "#[derive(Action)] can only be used on enums")
            .to_compile_error()
            .into();
    };

    let mut mutation_arms = Vec::new();
    let mut lifecycle_arms = Vec::new();
    let mut name_arms = Vec::new();

    for variant in &data_enum.variants {
        let variant_name = &variant.ident;
        let is_mutation = has_attribute(&variant.attrs, "mutation");
        let is_lifecycle = has_attribute(&variant.attrs, "lifecycle");

        if is_mutation && is_lifecycle {
            return syn::Error::new_spanned(
                variant,
                "Variant cannot be both #[mutation] and #[lifecycle]",
            )
            .to_compile_error()
            .into();
        }

        let pattern = variant_pattern(variant_name, &variant.fields);

        if is_mutation {
            mutation_arms.push(quote! { #pattern => true, });
        }

        if is_lifecycle {
            lifecycle_arms.push(quote! { #pattern => true, });
        }

        let label = variant_name.to_string();
        name_arms.push(quote! { #pattern => #label, });
    }

    let expanded = quote! {
        impl #name {
            /// Returns true if this action changes the persisted collection
            #[must_use]
            pub const fn is_mutation(&self) -> bool {
                match self {
                    #(#mutation_arms)*
                    _ => false,
                }
            }

            /// Returns true if this action is part of the hydration lifecycle
            #[must_use]
            pub const fn is_lifecycle(&self) -> bool {
                match self {
                    #(#lifecycle_arms)*
                    _ => false,
                }
            }

            /// Returns the variant name for logging
            #[must_use]
            pub const fn name(&self) -> &'static str {
                match self {
                    #(#name_arms)*
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// Build a match pattern that ignores the variant's fields
fn variant_pattern(variant: &Ident, fields: &Fields) -> TokenStream2 {
    match fields {
        Fields::Named(_) => quote! { Self::#variant { .. } },
        Fields::Unnamed(_) => quote! { Self::#variant(..) },
        Fields::Unit => quote! { Self::#variant },
    }
}

/// Helper function to check if an attribute list contains a specific attribute
fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}
