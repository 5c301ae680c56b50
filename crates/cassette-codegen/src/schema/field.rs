use super::{Column, Discriminator, ErrorSet, KeyColumn};

use syn::ext::IdentExt;

#[derive(Debug)]
pub(crate) struct Field {
    /// Field identifier
    pub(crate) ident: syn::Ident,

    /// Field name as seen by the mapping, without any `r#` prefix
    pub(crate) name: String,

    /// Field type
    pub(crate) ty: syn::Type,

    /// Optional column name override
    pub(crate) column: Option<Column>,

    pub(crate) role: FieldRole,
}

#[derive(Debug)]
pub(crate) enum FieldRole {
    /// A plain column
    Regular,

    /// `#[primary_key]`
    PrimaryKey(syn::Attribute),

    /// `#[primary_key_column(...)]`
    KeyColumn(KeyColumn),

    /// `#[table_discriminator(...)]`
    Discriminator(Discriminator),

    /// `#[transient]`, loaded with `Default::default()`
    Transient,
}

impl Field {
    pub(super) fn from_ast(field: &syn::Field) -> syn::Result<Self> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "fields must be named"));
        };

        let mut errs = ErrorSet::new();
        let mut column = None;
        let mut roles = vec![];

        for attr in &field.attrs {
            let path = attr.path();

            if path.is_ident("column") {
                if column.is_some() {
                    errs.spanned(attr, "duplicate #[column] attribute");
                } else {
                    column = errs.check(Column::from_ast(attr));
                }
            } else if path.is_ident("primary_key") {
                if let Err(err) = attr.meta.require_path_only() {
                    errs.push(err);
                }
                roles.push((attr, Some(FieldRole::PrimaryKey(attr.clone()))));
            } else if path.is_ident("primary_key_column") {
                let role = errs.check(KeyColumn::from_ast(attr)).map(FieldRole::KeyColumn);
                roles.push((attr, role));
            } else if path.is_ident("table_discriminator") {
                let role = errs
                    .check(Discriminator::from_ast(attr))
                    .map(FieldRole::Discriminator);
                roles.push((attr, role));
            } else if path.is_ident("transient") {
                if let Err(err) = attr.meta.require_path_only() {
                    errs.push(err);
                }
                roles.push((attr, Some(FieldRole::Transient)));
            }
        }

        let mut roles = roles.into_iter();

        let role = match (roles.next(), roles.next()) {
            (None, _) => FieldRole::Regular,
            (Some((_, role)), None) => role.unwrap_or(FieldRole::Regular),
            (Some(_), Some((attr, _))) => {
                errs.spanned(
                    attr,
                    "#[primary_key], #[primary_key_column], #[table_discriminator] and \
                     #[transient] are mutually exclusive",
                );
                FieldRole::Regular
            }
        };

        if let Some(column) = &column {
            match &role {
                FieldRole::Regular | FieldRole::KeyColumn(_) => {}
                FieldRole::PrimaryKey(_) => errs.spanned(
                    &column.name,
                    "#[column] is not supported on the #[primary_key] field",
                ),
                FieldRole::Discriminator(_) => errs.spanned(
                    &column.name,
                    "discriminator fields are not stored as columns",
                ),
                FieldRole::Transient => {
                    errs.spanned(&column.name, "transient fields are not stored")
                }
            }
        }

        errs.finish()?;

        Ok(Field {
            ident: ident.clone(),
            name: ident.unraw().to_string(),
            ty: field.ty.clone(),
            column,
            role,
        })
    }

    pub(crate) fn is_stored(&self) -> bool {
        matches!(self.role, FieldRole::Regular | FieldRole::KeyColumn(_))
    }

    pub(crate) fn discriminator(&self) -> Option<&Discriminator> {
        match &self.role {
            FieldRole::Discriminator(discriminator) => Some(discriminator),
            _ => None,
        }
    }
}
