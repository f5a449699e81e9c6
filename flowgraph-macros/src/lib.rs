use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

mod node_meta;
use node_meta::{parse_fields, parse_node_info, parse_ports};

/// Derives `flowgraph::registry::DescribeNode`.
///
/// ```ignore
/// #[derive(DescribeNode)]
/// #[node_meta(type_name = "add")]
/// #[input(label = "Left", data_type = "int")]
/// #[input(label = "Right", data_type = "int")]
/// #[output(label = "Sum", data_type = "int")]
/// struct Add { /* ... */ }
/// ```
#[proc_macro_derive(DescribeNode, attributes(node_meta, param, input, output))]
pub fn derive_describe_node(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let node_info = match parse_node_info(&input) {
        Ok(info) => info,
        Err(e) => return e.write_errors().into(),
    };
    let fields = match parse_fields(&input) {
        Ok(fields) => fields,
        Err(e) => return e.write_errors().into(),
    };
    let (inputs, outputs) = match parse_ports(&input) {
        Ok(ports) => ports,
        Err(e) => return e.write_errors().into(),
    };

    let struct_name = &input.ident;
    let type_name = node_info
        .type_name
        .unwrap_or_else(|| struct_name.to_string().to_lowercase());

    let input_schemas = inputs.iter().enumerate().map(|(index, port)| {
        let label = port.label.as_deref().unwrap_or("");
        let data_type = port.data_type.as_deref().unwrap_or("any");
        quote! { .with_input(#index, #data_type, #label) }
    });

    let output_schemas = outputs.iter().enumerate().map(|(index, port)| {
        let label = port.label.as_deref().unwrap_or("");
        let data_type = port.data_type.as_deref().unwrap_or("any");
        quote! { .with_output(#index, #data_type, #label) }
    });

    let properties = fields.iter().filter_map(|f| {
        let field_name = f.ident.as_ref()?.to_string();
        let label = f.label.clone().unwrap_or_else(|| field_name.clone());
        let data_type = f
            .data_type
            .clone()
            .unwrap_or_else(|| extract_type_name(&f.ty).to_string());
        Some(quote! { .with_property(#field_name, #data_type, #label) })
    });

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::flowgraph::registry::DescribeNode for #struct_name #ty_generics #where_clause {
            const TYPE_NAME: &'static str = #type_name;

            fn schema() -> ::flowgraph::registry::NodeSchema {
                ::flowgraph::registry::NodeSchema::new()
                    #(#input_schemas)*
                    #(#output_schemas)*
                    #(#properties)*
            }
        }
    };

    TokenStream::from(expanded)
}

fn extract_type_name(ty: &syn::Type) -> &'static str {
    let type_str = quote!(#ty).to_string();

    if type_str.contains("f64") || type_str.contains("f32") {
        "float"
    } else if type_str.contains("u32") || type_str.contains("i32")
        || type_str.contains("u64") || type_str.contains("i64")
        || type_str.contains("usize") || type_str.contains("isize") {
        "int"
    } else if type_str.contains("String") || type_str.contains("str") {
        "string"
    } else if type_str.contains("bool") {
        "bool"
    } else {
        "unknown"
    }
}
