/// `#[table(...)]` on an entity.
///
/// Allowed syntax:
///
/// ```text
/// #[table = "T_@discriminator"]
/// #[table("T_@discriminator")]
/// #[table("T_@discriminator", force_quote)]
/// ```
#[derive(Debug)]
pub(crate) struct TableAttr {
    pub(crate) template: syn::LitStr,
    pub(crate) force_quote: bool,
}

mod kw {
    syn::custom_keyword!(force_quote);
}

impl TableAttr {
    pub(super) fn from_ast(attr: &syn::Attribute) -> syn::Result<TableAttr> {
        match &attr.meta {
            syn::Meta::List(_) => attr.parse_args(),
            syn::Meta::NameValue(meta) => {
                let syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(template),
                    ..
                }) = &meta.value
                else {
                    return Err(syn::Error::new_spanned(
                        attr,
                        "expected `table = \"table_name\"`",
                    ));
                };

                Ok(TableAttr {
                    template: template.clone(),
                    force_quote: false,
                })
            }
            syn::Meta::Path(_) => Err(syn::Error::new_spanned(
                attr,
                "expected `#[table(\"table_name\")]`",
            )),
        }
    }
}

impl syn::parse::Parse for TableAttr {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let template: syn::LitStr = input.parse()?;
        let mut force_quote = false;

        if template.value().is_empty() {
            return Err(syn::Error::new(template.span(), "table name cannot be empty"));
        }

        while !input.is_empty() {
            let _comma_token: syn::Token![,] = input.parse()?;

            if input.is_empty() {
                break;
            }

            let _kw: kw::force_quote = input.parse()?;
            if force_quote {
                return Err(input.error("duplicate `force_quote`"));
            }
            force_quote = true;
        }

        Ok(Self {
            template,
            force_quote,
        })
    }
}
