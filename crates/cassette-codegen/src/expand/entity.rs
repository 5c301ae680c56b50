use super::schema;
use crate::schema::{Entity, FieldRole};

use proc_macro2::TokenStream;
use quote::quote;

pub(super) fn expand(entity: &Entity, cassette: &TokenStream) -> TokenStream {
    let ident = &entity.ident;
    let name = &entity.name;

    let key = entity.primary_key_field();
    let key_ident = &key.ident;
    let key_name = &key.name;
    let key_ty = &key.ty;

    let table = schema::table_def(entity.table.as_ref(), cassette);
    let properties = entity
        .fields
        .iter()
        .filter(|field| field.is_stored())
        .map(|field| schema::property_def(field, cassette));
    let discriminators = schema::discriminator_defs(&entity.fields, cassette);
    let write_fields = schema::write_fields(entity.fields.iter(), cassette);
    let discriminator_arms = schema::discriminator_arms(&entity.fields, cassette);

    let load_fields = entity.fields.iter().map(|field| match &field.role {
        FieldRole::PrimaryKey(_) => quote! {
            #key_ident: <#key_ty as #cassette::PrimaryKey>::load_key(#key_name, record)?
        },
        _ => schema::load_field(field, cassette),
    });

    quote! {
        impl #cassette::Entity for #ident {
            type Key = #key_ty;

            fn schema() -> #cassette::EntityDef {
                #cassette::EntityDef {
                    type_id: #cassette::TypeId::of::<Self>(),
                    name: #cassette::Name::new(#name),
                    table: #table,
                    properties: vec![#(#properties),*],
                    discriminators: #discriminators,
                    key_type_id: #cassette::TypeId::of::<#key_ty>(),
                    key: <#key_ty as #cassette::PrimaryKey>::key_def(#key_name),
                }
            }

            fn key(&self) -> &#key_ty {
                &self.#key_ident
            }

            fn write(&self, out: &mut #cassette::Record) {
                <#key_ty as #cassette::PrimaryKey>::write_key(&self.#key_ident, #key_name, out);
                #write_fields
            }

            fn load(record: &mut #cassette::Record) -> #cassette::Result<Self> {
                #cassette::Result::Ok(Self {
                    #(#load_fields,)*
                })
            }
        }

        impl #cassette::Discriminable for #ident {
            fn discriminator_value(&self, field: &str) -> #cassette::Option<#cassette::Value> {
                match field {
                    #(#discriminator_arms)*
                    _ => #cassette::Discriminable::discriminator_value(&self.#key_ident, field),
                }
            }
        }
    }
}
