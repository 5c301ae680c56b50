/// `#[column("name")]`
#[derive(Debug)]
pub(crate) struct Column {
    pub(crate) name: syn::LitStr,
}

impl Column {
    pub(super) fn from_ast(attr: &syn::Attribute) -> syn::Result<Column> {
        match &attr.meta {
            syn::Meta::List(_) => attr.parse_args(),
            syn::Meta::NameValue(meta) => match &meta.value {
                syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(name),
                    ..
                }) => Ok(Column { name: name.clone() }),
                _ => Err(syn::Error::new_spanned(
                    &meta.value,
                    "expected `column = \"name\"`",
                )),
            },
            syn::Meta::Path(_) => Err(syn::Error::new_spanned(
                attr,
                "expected `#[column(\"name\")]`",
            )),
        }
    }
}

impl syn::parse::Parse for Column {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let name: syn::LitStr = input.parse()?;

        if name.value().is_empty() {
            return Err(syn::Error::new(name.span(), "column name cannot be empty"));
        }

        if !input.is_empty() {
            return Err(input.error("unexpected tokens after the column name"));
        }

        Ok(Self { name })
    }
}
