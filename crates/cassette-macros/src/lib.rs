extern crate proc_macro;

use proc_macro::TokenStream;

#[proc_macro_derive(
    Entity,
    attributes(
        table,
        primary_key,
        primary_key_column,
        column,
        table_discriminator,
        transient
    )
)]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    match cassette_codegen::generate_entity(input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

#[proc_macro_derive(
    PrimaryKeyClass,
    attributes(
        table,
        primary_key,
        primary_key_column,
        column,
        table_discriminator,
        transient
    )
)]
pub fn derive_primary_key_class(input: TokenStream) -> TokenStream {
    match cassette_codegen::generate_key_class(input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
