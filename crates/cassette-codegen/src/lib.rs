mod expand;
mod schema;

use proc_macro2::TokenStream;

/// Expands `#[derive(Entity)]`.
pub fn generate_entity(input: TokenStream) -> syn::Result<TokenStream> {
    let item: syn::ItemStruct = syn::parse2(input)?;
    let entity = schema::Entity::from_ast(&item)?;

    Ok(expand::entity(&entity))
}

/// Expands `#[derive(PrimaryKeyClass)]`.
pub fn generate_key_class(input: TokenStream) -> syn::Result<TokenStream> {
    let item: syn::ItemStruct = syn::parse2(input)?;
    let key_class = schema::KeyClass::from_ast(&item)?;

    Ok(expand::key_class(&key_class))
}
