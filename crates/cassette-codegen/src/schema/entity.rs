use super::{named_fields, ErrorSet, Field, FieldRole, TableAttr};

use syn::ext::IdentExt;

#[derive(Debug)]
pub(crate) struct Entity {
    /// Type identifier
    pub(crate) ident: syn::Ident,

    /// Entity name, the type name without any `r#` prefix
    pub(crate) name: String,

    /// Table name template
    pub(crate) table: Option<TableAttr>,

    pub(crate) fields: Vec<Field>,

    /// Index of the `#[primary_key]` field
    pub(crate) primary_key: usize,
}

impl Entity {
    pub(crate) fn from_ast(ast: &syn::ItemStruct) -> syn::Result<Self> {
        let named = named_fields(ast, "entity")?;

        let mut errs = ErrorSet::new();
        let mut table = None;

        for attr in &ast.attrs {
            if attr.path().is_ident("table") {
                if table.is_some() {
                    errs.spanned(attr, "duplicate #[table] attribute");
                } else {
                    table = errs.check(TableAttr::from_ast(attr));
                }
            }
        }

        let mut fields = vec![];

        for node in named {
            if let Some(field) = errs.check(Field::from_ast(node)) {
                fields.push(field);
            }
        }

        let mut primary_key = None;

        for (index, field) in fields.iter().enumerate() {
            match &field.role {
                FieldRole::PrimaryKey(attr) => {
                    if primary_key.is_some() {
                        errs.spanned(
                            attr,
                            "only one field can be #[primary_key]; group the key columns in a \
                             #[derive(PrimaryKeyClass)] type",
                        );
                    } else {
                        primary_key = Some(index);
                    }
                }
                FieldRole::KeyColumn(_) => errs.spanned(
                    &field.ident,
                    "#[primary_key_column] is only valid on #[derive(PrimaryKeyClass)] fields",
                ),
                _ => {}
            }
        }

        errs.finish()?;

        let Some(primary_key) = primary_key else {
            return Err(syn::Error::new_spanned(
                &ast.ident,
                "entity requires a #[primary_key] field",
            ));
        };

        Ok(Entity {
            ident: ast.ident.clone(),
            name: ast.ident.unraw().to_string(),
            table,
            fields,
            primary_key,
        })
    }

    pub(crate) fn primary_key_field(&self) -> &Field {
        &self.fields[self.primary_key]
    }
}
