use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{parse_macro_input, FnArg, ItemFn, Pat, PatType, Type};

/// Turns a function with fixed numeric parameters into a registry callable.
///
/// ```ignore
/// #[tally_fn]
/// fn hypot(a: f64, b: f64) -> Result<f64, String> {
///     Ok(a.hypot(b))
/// }
/// ```
///
/// expands to `fn hypot(args: &[f64]) -> Result<f64, String>` which rejects a
/// call with the wrong number of arguments before binding `a` and `b`.
/// Parameters may be `f64` or `i64` (truncated); the error type must be `String`.
#[proc_macro_attribute]
pub fn tally_fn(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    match expand(input) {
        Ok(expanded) => expanded.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: ItemFn) -> syn::Result<proc_macro2::TokenStream> {
    let attrs = &input.attrs;
    let vis = &input.vis;
    let fn_name = &input.sig.ident;
    let fn_output = &input.sig.output;
    let fn_body = &input.block;
    let display_name = fn_name.to_string();

    let mut arg_extractions = Vec::new();

    for (i, arg) in input.sig.inputs.iter().enumerate() {
        let FnArg::Typed(PatType { pat, ty, .. }) = arg else {
            return Err(syn::Error::new(arg.span(), "methods cannot be tally functions"));
        };

        let arg_name = match **pat {
            Pat::Ident(ref ident) => &ident.ident,
            _ => return Err(syn::Error::new(pat.span(), "unsupported argument pattern")),
        };

        let type_name = match **ty {
            Type::Path(ref type_path) => type_path.path.get_ident().map(|ident| ident.to_string()),
            _ => None,
        };

        let extract_code = match type_name.as_deref() {
            Some("f64") => quote! {
                let #arg_name: f64 = args[#i];
            },
            Some("i64") => quote! {
                let #arg_name: i64 = args[#i] as i64;
            },
            _ => {
                return Err(syn::Error::new(
                    ty.span(),
                    "tally functions accept only f64 or i64 arguments",
                ))
            }
        };

        arg_extractions.push(extract_code);
    }

    let args_len = arg_extractions.len();
    Ok(quote! {
        #(#attrs)*
        #vis fn #fn_name(args: &[f64]) #fn_output {
            if args.len() != #args_len {
                return Err(format!(
                    "{} expects {} argument(s), but got {}",
                    #display_name,
                    #args_len,
                    args.len()
                ));
            }

            #(#arg_extractions)*

            #fn_body
        }
    })
}
