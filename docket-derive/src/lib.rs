mod command_file;
mod common;

use proc_macro::TokenStream;

/// Implement `docket::CommandFile` for the type of an inherent impl block.
///
/// Every `pub fn` in the block that takes `self` becomes a command candidate,
/// described by its doc comment and its `#[docket(...)]` attributes.
#[proc_macro_attribute]
pub fn command_file(attr: TokenStream, item: TokenStream) -> TokenStream {
    match command_file::command_file_result(attr.into(), item.into()) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
