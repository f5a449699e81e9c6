use darling::{FromAttributes, FromField, FromMeta};
use syn::{DeriveInput, Fields};

/// Parsed attributes from #[node_meta(...)]
#[derive(Debug, FromAttributes)]
#[darling(attributes(node_meta))]
pub struct NodeMetaArgs {
    #[darling(default)]
    pub type_name: Option<String>,
}

/// One #[input(...)] or #[output(...)] attribute on the struct.
/// Ports are numbered in declaration order.
#[derive(Debug, Default, FromMeta)]
pub struct PortArgs {
    #[darling(default)]
    pub label: Option<String>,

    #[darling(default)]
    pub data_type: Option<String>,
}

/// Parsed attributes from #[param(...)]
#[derive(Debug, FromField)]
#[darling(attributes(param))]
pub struct ParamField {
    pub ident: Option<syn::Ident>,
    pub ty: syn::Type,

    #[darling(default)]
    pub label: Option<String>,

    #[darling(default)]
    pub data_type: Option<String>,
}

pub fn parse_node_info(input: &DeriveInput) -> darling::Result<NodeMetaArgs> {
    NodeMetaArgs::from_attributes(&input.attrs)
}

pub fn parse_fields(input: &DeriveInput) -> darling::Result<Vec<ParamField>> {
    let fields = match &input.data {
        syn::Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => return Ok(Vec::new()),
        },
        _ => return Ok(Vec::new()),
    };

    fields
        .iter()
        .filter(|f| f.attrs.iter().any(|attr| attr.path().is_ident("param")))
        .map(ParamField::from_field)
        .collect()
}

pub fn parse_ports(input: &DeriveInput) -> darling::Result<(Vec<PortArgs>, Vec<PortArgs>)> {
    let mut inputs = Vec::new();
    let mut outputs = Vec::new();
    let mut errors = darling::Error::accumulator();

    for attr in &input.attrs {
        let target = if attr.path().is_ident("input") {
            &mut inputs
        } else if attr.path().is_ident("output") {
            &mut outputs
        } else {
            continue;
        };

        // a bare #[input] declares an unlabelled port
        if matches!(attr.meta, syn::Meta::Path(_)) {
            target.push(PortArgs::default());
            continue;
        }
        if let Some(port) = errors.handle(PortArgs::from_meta(&attr.meta)) {
            target.push(port);
        }
    }

    errors.finish_with((inputs, outputs))
}
