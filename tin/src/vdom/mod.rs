//! The virtual dom: immutable descriptions of what should be rendered.

mod event;
mod props;

pub use self::{
    event::{Event, EventHandler},
    props::{AttrValue, Props},
};

use crate::component::Component;

/// What an [`Element`] renders to.
#[derive(Clone, Debug, PartialEq)]
pub enum ElementKind {
    /// A plain dom element with the given tag name.
    Primitive(String),
    /// A function component.
    Component(Component),
}

impl ElementKind {
    pub fn as_tag(&self) -> Option<&str> {
        if let Self::Primitive(tag) = self {
            Some(tag)
        } else {
            None
        }
    }

    pub fn as_component(&self) -> Option<&Component> {
        if let Self::Component(c) = self {
            Some(c)
        } else {
            None
        }
    }
}

impl From<&str> for ElementKind {
    fn from(tag: &str) -> Self {
        Self::Primitive(tag.to_string())
    }
}

impl From<String> for ElementKind {
    fn from(tag: String) -> Self {
        Self::Primitive(tag)
    }
}

impl From<Component> for ElementKind {
    fn from(c: Component) -> Self {
        Self::Component(c)
    }
}

impl From<&Component> for ElementKind {
    fn from(c: &Component) -> Self {
        Self::Component(c.clone())
    }
}

/// A child of an [`Element`].
#[derive(Clone, Debug, PartialEq)]
pub enum Child {
    Text(String),
    Number(f64),
    Element(Element),
}

impl Child {
    /// The text this child renders to, if it is a primitive value.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Text(t) => Some(t.clone()),
            Self::Number(n) => Some(format_number(*n)),
            Self::Element(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        if let Self::Element(e) = self {
            Some(e)
        } else {
            None
        }
    }
}

impl From<&str> for Child {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<&String> for Child {
    fn from(v: &String) -> Self {
        Self::Text(v.clone())
    }
}

impl From<String> for Child {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Element> for Child {
    fn from(e: Element) -> Self {
        Self::Element(e)
    }
}

macro_rules! impl_number_child {
    ( $( $ty:ty ),* ) => {
        $(
            impl From<$ty> for Child {
                fn from(v: $ty) -> Self {
                    Self::Number(v as f64)
                }
            }
        )*
    };
}

impl_number_child!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// An immutable description of a node to render.
///
/// Built with [`create_element`] or the `view!` macro. The engine only ever
/// reads elements, it never changes them.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    kind: ElementKind,
    props: Props,
    children: Vec<Child>,
}

impl Element {
    #[inline]
    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    #[inline]
    pub fn props(&self) -> &Props {
        &self.props
    }

    #[inline]
    pub fn children(&self) -> &[Child] {
        &self.children
    }
}

/// Build a new [`Element`].
///
/// `kind` is either a tag name or a [`Component`]. Absent props are treated
/// as empty.
///
/// ```rust
/// use tin::{create_element, Child, Props};
///
/// let elem = create_element(
///     "div",
///     Props::new().with("className", "card"),
///     [Child::from("hello"), Child::from(42)],
/// );
/// assert_eq!(elem.children().len(), 2);
/// ```
pub fn create_element<K, P, C>(kind: K, props: P, children: C) -> Element
where
    K: Into<ElementKind>,
    P: Into<Option<Props>>,
    C: IntoIterator<Item = Child>,
{
    Element {
        kind: kind.into(),
        props: props.into().unwrap_or_default(),
        children: children.into_iter().collect(),
    }
}

/// Convert a number to text the way a browser would print it.
pub(crate) fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        // Avoids "-0".
        "0".to_string()
    } else {
        n.to_string()
    }
}
