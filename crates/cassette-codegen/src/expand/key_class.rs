use super::schema;
use crate::schema::KeyClass;

use proc_macro2::TokenStream;
use quote::quote;

pub(super) fn expand(key_class: &KeyClass, cassette: &TokenStream) -> TokenStream {
    let ident = &key_class.ident;
    let name = &key_class.name;

    let properties = key_class
        .fields
        .iter()
        .filter(|field| field.is_stored())
        .map(|field| schema::property_def(field, cassette));
    let discriminators = schema::discriminator_defs(&key_class.fields, cassette);
    let write_fields = schema::write_fields(key_class.fields.iter(), cassette);
    let load_fields = key_class
        .fields
        .iter()
        .map(|field| schema::load_field(field, cassette));
    let discriminator_arms = schema::discriminator_arms(&key_class.fields, cassette);

    quote! {
        impl #cassette::PrimaryKey for #ident {
            fn key_def(field: &str) -> #cassette::KeyDef {
                #cassette::KeyDef::Composite(#cassette::KeyClassDef {
                    name: #cassette::Name::new(#name),
                    field: #cassette::ToString::to_string(field),
                    properties: vec![#(#properties),*],
                    discriminators: #discriminators,
                })
            }

            fn write_key(&self, _field: &str, out: &mut #cassette::Record) {
                #write_fields
            }

            fn load_key(_field: &str, record: &mut #cassette::Record) -> #cassette::Result<Self> {
                #cassette::Result::Ok(Self {
                    #(#load_fields,)*
                })
            }
        }

        impl #cassette::Discriminable for #ident {
            fn discriminator_value(&self, field: &str) -> #cassette::Option<#cassette::Value> {
                match field {
                    #(#discriminator_arms)*
                    _ => #cassette::Option::None,
                }
            }
        }
    }
}
