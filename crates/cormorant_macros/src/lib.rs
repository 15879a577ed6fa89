use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, ItemFn};

/// Wraps a function body with timing code that logs execution time on exit.
///
/// Compiles to nothing when the `perf_stats` feature is disabled, so it is
/// safe to sprinkle over graph-build and search hot paths without runtime
/// cost in release builds that don't opt in.
///
/// ```ignore
/// #[profile]
/// fn build_clusters(...) { ... }
///
/// #[profile(5)] // custom threshold in milliseconds
/// fn expensive() { ... }
/// ```
#[proc_macro_attribute]
pub fn profile(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);

    let threshold_ms: u128 = if attr.is_empty() {
        1
    } else {
        attr.to_string().parse().unwrap_or(1)
    };

    let attrs = &input.attrs;
    let vis = &input.vis;
    let sig = &input.sig;
    let block = &input.block;
    let fn_name_str = sig.ident.to_string();

    let expanded = quote! {
        #(#attrs)*
        #vis #sig {
            #[cfg(feature = "perf_stats")]
            struct ProfileGuard {
                name: &'static str,
                start: std::time::Instant,
            }

            #[cfg(feature = "perf_stats")]
            impl Drop for ProfileGuard {
                fn drop(&mut self) {
                    let elapsed = self.start.elapsed();
                    if elapsed.as_millis() > #threshold_ms {
                        tracing::info!("[PERF] {}: {:?}", self.name, elapsed);
                    }
                }
            }

            #[cfg(feature = "perf_stats")]
            let _profile_guard = ProfileGuard { name: #fn_name_str, start: std::time::Instant::now() };

            #block
        }
    };

    expanded.into()
}
