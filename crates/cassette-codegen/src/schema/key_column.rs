/// `#[primary_key_column(...)]` on a key class field.
///
/// Allowed syntax:
///
/// ```text
/// #[primary_key_column(partitioned)]
/// #[primary_key_column(partitioned, ordinal = 1)]
/// #[primary_key_column(clustered, ordinal = 0, ordering = desc)]
/// ```
#[derive(Debug)]
pub(crate) struct KeyColumn {
    pub(crate) kind: KeyColumnKind,

    /// Position within the partition key or clustering columns
    pub(crate) ordinal: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyColumnKind {
    Partitioned,
    Clustered { descending: bool },
}

mod kw {
    syn::custom_keyword!(partitioned);
    syn::custom_keyword!(clustered);
    syn::custom_keyword!(ordinal);
    syn::custom_keyword!(ordering);
    syn::custom_keyword!(asc);
    syn::custom_keyword!(desc);
}

impl KeyColumn {
    pub(super) fn from_ast(attr: &syn::Attribute) -> syn::Result<KeyColumn> {
        attr.parse_args()
    }

    pub(crate) fn is_partitioned(&self) -> bool {
        self.kind == KeyColumnKind::Partitioned
    }
}

impl syn::parse::Parse for KeyColumn {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut partitioned = None;
        let mut ordinal = None;
        let mut descending = None;

        loop {
            let lookahead = input.lookahead1();

            if lookahead.peek(kw::partitioned) || lookahead.peek(kw::clustered) {
                if partitioned.is_some() {
                    return Err(input.error("duplicate key column type"));
                }

                if input.peek(kw::partitioned) {
                    let _kw: kw::partitioned = input.parse()?;
                    partitioned = Some(true);
                } else {
                    let _kw: kw::clustered = input.parse()?;
                    partitioned = Some(false);
                }
            } else if lookahead.peek(kw::ordinal) {
                if ordinal.is_some() {
                    return Err(input.error("duplicate ordinal"));
                }
                let _kw: kw::ordinal = input.parse()?;
                let _eq_token: syn::Token![=] = input.parse()?;
                let lit: syn::LitInt = input.parse()?;
                ordinal = Some(lit.base10_parse()?);
            } else if lookahead.peek(kw::ordering) {
                if descending.is_some() {
                    return Err(input.error("duplicate ordering"));
                }
                let _kw: kw::ordering = input.parse()?;
                let _eq_token: syn::Token![=] = input.parse()?;

                let lookahead = input.lookahead1();
                if lookahead.peek(kw::asc) {
                    let _kw: kw::asc = input.parse()?;
                    descending = Some(false);
                } else if lookahead.peek(kw::desc) {
                    let _kw: kw::desc = input.parse()?;
                    descending = Some(true);
                } else {
                    return Err(lookahead.error());
                }
            } else {
                return Err(lookahead.error());
            }

            if input.is_empty() {
                break;
            }
            let _comma_token: syn::Token![,] = input.parse()?;
        }

        let kind = match (partitioned, descending) {
            (None, _) => {
                return Err(input.error("expected `partitioned` or `clustered`"));
            }
            (Some(true), Some(_)) => {
                return Err(input.error("`ordering` only applies to clustered columns"));
            }
            (Some(true), None) => KeyColumnKind::Partitioned,
            (Some(false), descending) => KeyColumnKind::Clustered {
                descending: descending.unwrap_or(false),
            },
        };

        Ok(Self {
            kind,
            ordinal: ordinal.unwrap_or(0),
        })
    }
}
