use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{parse_macro_input, FnArg, Ident, ItemFn, Pat, PatType, ReturnType, Type};

fn unsupported(span: impl quote::ToTokens, fn_name: &Ident, what: &str) -> TokenStream2 {
    syn::Error::new_spanned(
        span,
        format!("{} in native function '{}'; only f64 is supported", what, fn_name),
    )
    .to_compile_error()
}

fn is_f64(ty: &Type) -> bool {
    matches!(ty, Type::Path(type_path) if type_path.qself.is_none() && type_path.path.is_ident("f64"))
}

/// Turns `fn name(a: f64, b: f64) -> f64 { .. }` into a function over an argument
/// slice, `fn name(args: &[f64]) -> f64`, and emits `NAME_ARITY` next to it.
///
/// Calling the generated function with the wrong number of arguments returns NaN.
#[proc_macro_attribute]
pub fn native_fn(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    let fn_name = &input.sig.ident;
    let fn_attrs = &input.attrs;
    let fn_vis = &input.vis;
    let fn_body = &input.block;

    let mut arg_names = Vec::new();

    for arg in input.sig.inputs.iter() {
        match arg {
            FnArg::Typed(PatType { pat, ty, .. }) => {
                let arg_name = match **pat {
                    Pat::Ident(ref ident) => ident.ident.clone(),
                    _ => return unsupported(pat, fn_name, "unsupported argument pattern").into(),
                };
                if !is_f64(ty) {
                    return unsupported(ty, fn_name, "unsupported argument type").into();
                }
                arg_names.push(arg_name);
            }
            FnArg::Receiver(receiver) => {
                return unsupported(receiver, fn_name, "unexpected receiver").into()
            }
        }
    }

    match &input.sig.output {
        ReturnType::Type(_, ty) if is_f64(ty) => {}
        output => return unsupported(output, fn_name, "unsupported return type").into(),
    }

    let args_len = arg_names.len();
    let arity_name = format_ident!("{}_ARITY", fn_name.to_string().to_uppercase());

    let expanded = quote! {
        #(#fn_attrs)*
        #fn_vis fn #fn_name(args: &[f64]) -> f64 {
            match *args {
                [#(#arg_names),*] => #fn_body,
                _ => f64::NAN,
            }
        }

        #fn_vis const #arity_name: usize = #args_len;
    };

    TokenStream::from(expanded)
}
