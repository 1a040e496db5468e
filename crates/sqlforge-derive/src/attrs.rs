//! Parsing of field-level `#[record(...)]` attributes.

use syn::Result;

/// How a field is mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldMode {
    Leaf,
    Json,
    Flatten,
    Nested,
}

/// Everything `#[record(...)]` can say about one field.
#[derive(Debug)]
pub(crate) struct FieldAttr {
    pub mode: FieldMode,
    /// `(namespace, value)` tag pairs in declaration order.
    pub tags: Vec<(String, String)>,
}

impl Default for FieldAttr {
    fn default() -> Self {
        Self {
            mode: FieldMode::Leaf,
            tags: Vec::new(),
        }
    }
}

impl FieldAttr {
    fn set_mode(&mut self, mode: FieldMode, span: &syn::Ident) -> Result<()> {
        if self.mode != FieldMode::Leaf && self.mode != mode {
            return Err(syn::Error::new_spanned(
                span,
                "only one of `flatten`, `nested` and `json` may be used",
            ));
        }
        self.mode = mode;
        Ok(())
    }

    /// Merge one `record(...)` attribute body into `self`.
    fn parse_into(&mut self, input: syn::parse::ParseStream) -> Result<()> {
        loop {
            if input.is_empty() {
                break;
            }

            let ident: syn::Ident = input.parse()?;
            if input.peek(syn::Token![=]) {
                let _: syn::Token![=] = input.parse()?;
                let value: syn::LitStr = input.parse()?;
                let namespace = ident.to_string();
                if self.tags.iter().any(|(ns, _)| *ns == namespace) {
                    return Err(syn::Error::new_spanned(
                        &ident,
                        format!("duplicate `{namespace}` tag"),
                    ));
                }
                self.tags.push((namespace, value.value()));
            } else if ident == "flatten" {
                self.set_mode(FieldMode::Flatten, &ident)?;
            } else if ident == "nested" {
                self.set_mode(FieldMode::Nested, &ident)?;
            } else if ident == "json" {
                self.set_mode(FieldMode::Json, &ident)?;
            } else {
                return Err(syn::Error::new_spanned(
                    &ident,
                    "expected `flatten`, `nested`, `json` or `<tag> = \"...\"`",
                ));
            }

            if input.peek(syn::Token![,]) {
                let _: syn::Token![,] = input.parse()?;
            } else {
                break;
            }
        }
        Ok(())
    }
}

/// Collect every `#[record(...)]` attribute of a field.
pub(crate) fn field_attr(field: &syn::Field) -> Result<FieldAttr> {
    let mut attr = FieldAttr::default();
    for a in &field.attrs {
        if a.path().is_ident("record") {
            a.parse_args_with(|input: syn::parse::ParseStream| attr.parse_into(input))?;
        }
    }
    Ok(attr)
}
