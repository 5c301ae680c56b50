use syn::bracketed;

/// `#[table_discriminator(...)]` on a field.
///
/// Allowed syntax:
///
/// ```text
/// #[table_discriminator("A", "B")]
/// #[table_discriminator(values = ["A", "B"])]
/// #[table_discriminator(values = ["A", "B"], converter = path::To::Converter)]
/// ```
#[derive(Debug)]
pub(crate) struct Discriminator {
    /// Enumerated values, as written
    pub(crate) values: Vec<syn::LitStr>,

    /// Converter type; must implement `Default` and `DiscriminatorConverter`
    pub(crate) converter: Option<syn::Path>,
}

mod kw {
    syn::custom_keyword!(values);
    syn::custom_keyword!(converter);
}

impl Discriminator {
    pub(super) fn from_ast(attr: &syn::Attribute) -> syn::Result<Discriminator> {
        let discriminator: Discriminator = attr.parse_args()?;

        if discriminator.values.is_empty() {
            return Err(syn::Error::new_spanned(
                attr,
                "#[table_discriminator] requires at least one value",
            ));
        }

        for (i, value) in discriminator.values.iter().enumerate() {
            let text = value.value();

            if text.is_empty() {
                return Err(syn::Error::new(
                    value.span(),
                    "discriminator values cannot be empty",
                ));
            }

            if discriminator.values[..i]
                .iter()
                .any(|other| other.value().eq_ignore_ascii_case(&text))
            {
                return Err(syn::Error::new(
                    value.span(),
                    "duplicate discriminator value; values are compared ignoring case",
                ));
            }
        }

        Ok(discriminator)
    }
}

impl syn::parse::Parse for Discriminator {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut values = vec![];
        let mut converter = None;
        let mut named_values = false;

        loop {
            let lookahead = input.lookahead1();

            if lookahead.peek(syn::LitStr) {
                if named_values {
                    return Err(input.error("values are already given with `values = [...]`"));
                }
                values.push(input.parse()?);
            } else if lookahead.peek(kw::values) {
                if named_values || !values.is_empty() {
                    return Err(input.error("duplicate discriminator values"));
                }
                let _kw: kw::values = input.parse()?;
                let _eq_token: syn::Token![=] = input.parse()?;

                let content;
                bracketed!(content in input);
                let list = content.parse_terminated(
                    |input: syn::parse::ParseStream| input.parse::<syn::LitStr>(),
                    syn::Token![,],
                )?;

                values.extend(list);
                named_values = true;
            } else if lookahead.peek(kw::converter) {
                if converter.is_some() {
                    return Err(input.error("duplicate converter"));
                }
                let _kw: kw::converter = input.parse()?;
                let _eq_token: syn::Token![=] = input.parse()?;
                converter = Some(input.parse()?);
            } else {
                return Err(lookahead.error());
            }

            if input.is_empty() {
                break;
            }
            let _comma_token: syn::Token![,] = input.parse()?;

            // Allow a trailing comma
            if input.is_empty() {
                break;
            }
        }

        Ok(Self { values, converter })
    }
}
