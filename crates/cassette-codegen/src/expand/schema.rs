use crate::schema::{Field, FieldRole, KeyColumnKind, TableAttr};

use proc_macro2::TokenStream;
use quote::quote;

/// `PropertyDef` for a stored field.
pub(super) fn property_def(field: &Field, cassette: &TokenStream) -> TokenStream {
    let name = &field.name;
    let ty = &field.ty;

    let column = field.column.as_ref().map(|column| {
        let column = &column.name;
        quote!(.column(#column))
    });

    let kind = match &field.role {
        FieldRole::KeyColumn(key_column) => {
            let ordinal = key_column.ordinal;

            match key_column.kind {
                KeyColumnKind::Partitioned => quote! {
                    .kind(#cassette::PropertyKind::PartitionKey { ordinal: #ordinal })
                },
                KeyColumnKind::Clustered { descending } => {
                    let ordering = if descending {
                        quote!(#cassette::Ordering::Descending)
                    } else {
                        quote!(#cassette::Ordering::Ascending)
                    };

                    quote! {
                        .kind(#cassette::PropertyKind::ClusteringKey {
                            ordinal: #ordinal,
                            ordering: #ordering,
                        })
                    }
                }
            }
        }
        _ => quote!(),
    };

    quote! {
        #cassette::PropertyDef::new(#name, <#ty as #cassette::Primitive>::TYPE)
            .nullable(<#ty as #cassette::Primitive>::NULLABLE)
            #column
            #kind
    }
}

/// `DiscriminatorDef`s for every discriminator field.
pub(super) fn discriminator_defs(fields: &[Field], cassette: &TokenStream) -> TokenStream {
    let defs = fields.iter().filter_map(|field| {
        let discriminator = field.discriminator()?;
        let name = &field.name;
        let ty = &field.ty;
        let values = &discriminator.values;

        let converter = discriminator.converter.as_ref().map(|path| {
            quote!(.converter(<#path as #cassette::Default>::default()))
        });

        Some(quote! {
            #cassette::DiscriminatorDef::new(
                #name,
                <#ty as #cassette::Primitive>::TYPE,
                [#(#values),*],
            )
            #converter
        })
    });

    quote!(vec![#(#defs),*])
}

pub(super) fn table_def(table: Option<&TableAttr>, cassette: &TokenStream) -> TokenStream {
    match table {
        Some(table) => {
            let template = &table.template;
            let force_quote = table.force_quote;

            quote! {
                #cassette::Option::Some(#cassette::TableDef {
                    template: #cassette::ToString::to_string(#template),
                    force_quote: #force_quote,
                })
            }
        }
        None => quote!(#cassette::Option::None),
    }
}

/// Writes every stored field into `out`.
pub(super) fn write_fields<'a>(
    fields: impl Iterator<Item = &'a Field>,
    cassette: &TokenStream,
) -> TokenStream {
    let writes = fields.filter(|field| field.is_stored()).map(|field| {
        let ident = &field.ident;
        let name = &field.name;

        quote! {
            out.insert(#name, #cassette::Primitive::to_value(&self.#ident));
        }
    });

    quote!(#(#writes)*)
}

/// Struct field initializers loading stored and discriminator fields from
/// `record`; transient fields take their default.
pub(super) fn load_field(field: &Field, cassette: &TokenStream) -> TokenStream {
    let ident = &field.ident;
    let name = &field.name;
    let ty = &field.ty;

    match &field.role {
        FieldRole::Transient => quote!(#ident: #cassette::Default::default()),
        _ => quote!(#ident: record.take::<#ty>(#name)?),
    }
}

/// `Discriminable::discriminator_value` match arms.
pub(super) fn discriminator_arms(fields: &[Field], cassette: &TokenStream) -> Vec<TokenStream> {
    fields
        .iter()
        .filter(|field| field.discriminator().is_some())
        .map(|field| {
            let ident = &field.ident;
            let name = &field.name;

            quote! {
                #name => #cassette::Option::Some(#cassette::Primitive::to_value(&self.#ident)),
            }
        })
        .collect()
}
