mod entity;
mod key_class;
mod schema;

use crate::schema::{Entity, KeyClass};

use proc_macro2::TokenStream;
use quote::quote;

pub(super) fn entity(entity: &Entity) -> TokenStream {
    let cassette = quote!(_cassette::codegen_support);
    wrap_in_const(entity::expand(entity, &cassette))
}

pub(super) fn key_class(key_class: &KeyClass) -> TokenStream {
    let cassette = quote!(_cassette::codegen_support);
    wrap_in_const(key_class::expand(key_class, &cassette))
}

fn wrap_in_const(code: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            use cassette as _cassette;
            #code
        };
    }
}
