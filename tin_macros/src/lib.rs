use proc_macro::TokenStream;

mod view;

/// Construct elements with a convenient template syntax.
///
/// Expands to nested `tin::create_element` calls. Lowercase names become
/// tags, capitalized names are component functions, `on*` attributes take
/// event handlers and `{expr}` inserts a text child.
///
/// ```
/// use tin::{view, Element};
///
/// let name = "world";
/// let elem: Element = view! {
///     p(className="greeting") [ "hello " {name} ]
/// };
/// assert_eq!(elem.children().len(), 2);
/// assert_eq!(elem.props().get_str("className"), Some("greeting"));
/// ```
#[proc_macro]
pub fn view(tokens: TokenStream) -> TokenStream {
    view::view(tokens)
}
