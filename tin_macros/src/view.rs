use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;

pub fn view(tokens: TokenStream) -> TokenStream {
    let template = syn::parse_macro_input!(tokens as Template);
    render_template(template).into()
}

#[derive(Debug)]
enum Node {
    Elem {
        tag: syn::Ident,
        attributes: Vec<Attr>,
        event_handlers: Vec<EventHandler>,
        children: Vec<Self>,
    },
    Fragment {
        items: Vec<Self>,
    },
    Text {
        value: syn::LitStr,
    },
    Expr {
        expr: syn::Expr,
    },
}

#[derive(Debug)]
struct EventHandler {
    event: syn::Ident,
    handler: syn::Expr,
}

#[derive(Debug)]
struct Attr {
    name: syn::Ident,
    value: AttrValue,
}

#[derive(Debug)]
enum AttrValue {
    None,
    Lit(syn::Lit),
    Expr(syn::Expr),
}

struct Template {
    node: Node,
}

/// Capitalized names refer to component functions, everything else is a tag.
fn is_component_name(tag: &syn::Ident) -> bool {
    tag.to_string()
        .chars()
        .next()
        .map(|c| c.is_ascii_uppercase())
        .unwrap_or(false)
}

fn render_element(
    tag: syn::Ident,
    attributes: Vec<Attr>,
    event_handlers: Vec<EventHandler>,
    children: Vec<Node>,
) -> proc_macro2::TokenStream {
    let attrs = attributes.into_iter().map(|attr| {
        let key = attr.name.unraw().to_string();
        match attr.value {
            AttrValue::None => {
                quote! {
                    props.insert(#key, ::tin::AttrValue::from(""));
                }
            }
            AttrValue::Lit(value) => {
                quote! {
                    props.insert(#key, ::tin::AttrValue::from(#value));
                }
            }
            AttrValue::Expr(e) => {
                quote! {
                    props.insert(#key, ::tin::AttrValue::from(#e));
                }
            }
        }
    });

    let event_handlers = event_handlers.into_iter().map(|e| {
        let key = e.event.to_string();
        let handler = e.handler;
        quote! {
            props.insert(#key, ::tin::AttrValue::handler(#handler));
        }
    });

    let children = children.into_iter().map(render_child);

    let kind = if is_component_name(&tag) {
        quote! { ::tin::Component::new(#tag) }
    } else {
        let name = tag.unraw().to_string();
        quote! { #name }
    };

    quote! {
        {
            #[allow(unused_mut)]
            let mut props = ::tin::Props::new();
            #(#attrs)*
            #(#event_handlers)*
            ::tin::create_element(#kind, props, ::std::vec![ #(#children),* ])
        }
    }
}

fn render_child(node: Node) -> proc_macro2::TokenStream {
    match node {
        Node::Elem {
            tag,
            attributes,
            event_handlers,
            children,
        } => {
            let elem = render_element(tag, attributes, event_handlers, children);
            quote! { ::tin::Child::from(#elem) }
        }
        Node::Text { value } => {
            quote! { ::tin::Child::from(#value) }
        }
        Node::Expr { expr } => {
            quote! { ::tin::Child::from(#expr) }
        }
        Node::Fragment { .. } => {
            // The parser never nests fragments.
            syn::Error::new(proc_macro2::Span::call_site(), "Nested fragments are not supported")
                .to_compile_error()
        }
    }
}

fn render_template(tpl: Template) -> proc_macro2::TokenStream {
    match tpl.node {
        Node::Elem {
            tag,
            attributes,
            event_handlers,
            children,
        } => render_element(tag, attributes, event_handlers, children),
        Node::Fragment { items } => {
            let items = items.into_iter().map(render_child);
            quote! {
                ::std::vec![ #(#items),* ]
            }
        }
        Node::Text { value } => {
            syn::Error::new_spanned(value, "The root of a view must be an element")
                .to_compile_error()
        }
        Node::Expr { expr } => {
            syn::Error::new_spanned(expr, "The root of a view must be an element")
                .to_compile_error()
        }
    }
}

impl syn::parse::Parse for Template {
    fn parse(stream: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut items = Vec::<Node>::new();

        while !stream.is_empty() {
            items.push(stream.parse()?);
        }

        let node = if items.len() == 1 {
            items.remove(0)
        } else {
            Node::Fragment { items }
        };

        Ok(Self { node })
    }
}

impl syn::parse::Parse for Node {
    fn parse(stream: syn::parse::ParseStream) -> syn::Result<Self> {
        if stream.peek(syn::LitStr) {
            Ok(Self::Text {
                value: stream.parse()?,
            })
        } else if stream.peek(syn::Ident::peek_any) {
            let tag = syn::Ident::parse_any(stream)?;

            let mut attributes = Vec::<Attr>::new();
            let mut event_handlers = Vec::<EventHandler>::new();

            if stream.peek(syn::token::Paren) {
                let inner;
                syn::parenthesized!(inner in stream);

                while !inner.is_empty() {
                    // Allows keywords like `type` and `for` as attribute names.
                    let name = syn::Ident::parse_any(&inner)?;

                    let name_value = name.to_string();
                    if name_value.len() > 2 && name_value.starts_with("on") {
                        inner.parse::<syn::token::Eq>()?;
                        let handler: syn::Expr = inner.parse()?;

                        event_handlers.push(EventHandler {
                            event: name,
                            handler,
                        });
                    } else {
                        let value = if inner.peek(syn::token::Eq) {
                            inner.parse::<syn::token::Eq>()?;

                            let expr: syn::Expr = inner.parse()?;
                            match expr {
                                syn::Expr::Lit(lit) => AttrValue::Lit(lit.lit),
                                other => AttrValue::Expr(other),
                            }
                        } else {
                            AttrValue::None
                        };

                        attributes.push(Attr { name, value });
                    }

                    // Skip optional trailing comma.
                    if inner.peek(syn::token::Comma) {
                        inner.parse::<syn::token::Comma>()?;
                    }
                }
            }

            let mut children = Vec::new();
            if stream.peek(syn::token::Bracket) {
                let inner;
                syn::bracketed!(inner in stream);

                while !inner.is_empty() {
                    let child: Node = inner.parse()?;
                    children.push(child);
                }
            }

            Ok(Self::Elem {
                tag,
                attributes,
                event_handlers,
                children,
            })
        } else if stream.peek(syn::token::Brace) {
            let inner;
            syn::braced!(inner in stream);
            let expr: syn::Expr = inner.parse()?;
            Ok(Self::Expr { expr })
        } else {
            Err(stream.error("Unexpected input"))
        }
    }
}
