use super::{named_fields, ErrorSet, Field, FieldRole};

use syn::ext::IdentExt;

/// A composite primary key type.
#[derive(Debug)]
pub(crate) struct KeyClass {
    pub(crate) ident: syn::Ident,

    pub(crate) name: String,

    pub(crate) fields: Vec<Field>,
}

impl KeyClass {
    pub(crate) fn from_ast(ast: &syn::ItemStruct) -> syn::Result<Self> {
        let named = named_fields(ast, "primary key class")?;

        let mut errs = ErrorSet::new();

        for attr in &ast.attrs {
            if attr.path().is_ident("table") {
                errs.spanned(attr, "#[table] belongs on the entity, not its key class");
            }
        }

        let mut fields = vec![];

        for node in named {
            if let Some(field) = errs.check(Field::from_ast(node)) {
                fields.push(field);
            }
        }

        for field in &fields {
            match &field.role {
                FieldRole::KeyColumn(_) | FieldRole::Discriminator(_) | FieldRole::Transient => {}
                FieldRole::PrimaryKey(attr) => errs.spanned(
                    attr,
                    "#[primary_key] belongs on the entity field holding the key class",
                ),
                FieldRole::Regular => errs.spanned(
                    &field.ident,
                    "key class fields must be #[primary_key_column], #[table_discriminator] \
                     or #[transient]",
                ),
            }
        }

        let has_partition_key = fields.iter().any(|field| {
            matches!(&field.role, FieldRole::KeyColumn(column) if column.is_partitioned())
        });

        if !has_partition_key {
            errs.spanned(
                &ast.ident,
                "primary key class requires at least one #[primary_key_column(partitioned)] field",
            );
        }

        errs.finish()?;

        Ok(KeyClass {
            ident: ast.ident.clone(),
            name: ast.ident.unraw().to_string(),
            fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::KeyColumnKind;

    fn parse(item: syn::ItemStruct) -> syn::Result<KeyClass> {
        KeyClass::from_ast(&item)
    }

    #[test]
    fn key_columns() {
        let key_class = parse(syn::parse_quote! {
            struct EventKey {
                #[primary_key_column(partitioned)]
                tenant: String,

                #[primary_key_column(clustered, ordinal = 1, ordering = desc)]
                seq: i64,

                #[primary_key_column(clustered, ordinal = 0)]
                #[column("day_bucket")]
                bucket: i32,

                #[table_discriminator("A", "B")]
                discriminator: String,
            }
        })
        .unwrap();

        assert_eq!(key_class.name, "EventKey");

        let FieldRole::KeyColumn(seq) = &key_class.fields[1].role else {
            panic!("expected a key column");
        };
        assert_eq!(seq.ordinal, 1);
        assert_eq!(seq.kind, KeyColumnKind::Clustered { descending: true });

        let FieldRole::KeyColumn(bucket) = &key_class.fields[2].role else {
            panic!("expected a key column");
        };
        assert_eq!(bucket.kind, KeyColumnKind::Clustered { descending: false });
        assert_eq!(
            key_class.fields[2].column.as_ref().unwrap().name.value(),
            "day_bucket"
        );

        assert!(key_class.fields[3].discriminator().is_some());
        assert!(!key_class.fields[3].is_stored());
    }

    #[test]
    fn regular_field_rejected() {
        let err = parse(syn::parse_quote! {
            struct ComplexKey {
                #[primary_key_column(partitioned)]
                id: i64,
                note: String,
            }
        })
        .unwrap_err();

        assert!(err.to_string().contains("key class fields must be"));
    }

    #[test]
    fn requires_partition_column() {
        let err = parse(syn::parse_quote! {
            struct ComplexKey {
                #[primary_key_column(clustered)]
                id: i64,
            }
        })
        .unwrap_err();

        assert!(err.to_string().contains("at least one"));
    }

    #[test]
    fn ordering_on_partition_column() {
        let err = parse(syn::parse_quote! {
            struct ComplexKey {
                #[primary_key_column(partitioned, ordering = desc)]
                id: i64,
            }
        })
        .unwrap_err();

        assert!(err
            .to_string()
            .contains("`ordering` only applies to clustered columns"));
    }
}
