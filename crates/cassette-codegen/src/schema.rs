mod column;
pub(crate) use column::Column;

mod discriminator;
pub(crate) use discriminator::Discriminator;

mod entity;
pub(crate) use entity::Entity;

mod error;
pub(crate) use error::ErrorSet;

mod field;
pub(crate) use field::{Field, FieldRole};

mod key_class;
pub(crate) use key_class::KeyClass;

mod key_column;
pub(crate) use key_column::{KeyColumn, KeyColumnKind};

mod table_attr;
pub(crate) use table_attr::TableAttr;

/// Returns the identifiers of a struct's named fields.
fn named_fields<'a>(
    ast: &'a syn::ItemStruct,
    what: &str,
) -> syn::Result<&'a syn::punctuated::Punctuated<syn::Field, syn::Token![,]>> {
    let syn::Fields::Named(node) = &ast.fields else {
        return Err(syn::Error::new_spanned(
            &ast.fields,
            format!("{what} fields must be named"),
        ));
    };

    // Generics are not supported yet
    if !ast.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &ast.generics,
            format!("{what} generics are not supported"),
        ));
    }

    Ok(&node.named)
}
