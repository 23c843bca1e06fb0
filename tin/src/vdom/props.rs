use crate::Result;

use super::{
    event::{Event, EventHandler},
    format_number,
};

/// The value of a single element attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    Str(String),
    Number(f64),
    Handler(EventHandler),
}

impl AttrValue {
    /// Wrap a closure as an event handler value.
    pub fn handler<F>(f: F) -> Self
    where
        F: Fn(&Event) -> Result<()> + 'static,
    {
        Self::Handler(EventHandler::new(f))
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Self::Str(v) = self {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        if let Self::Number(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn as_handler(&self) -> Option<&EventHandler> {
        if let Self::Handler(h) = self {
            Some(h)
        } else {
            None
        }
    }

    /// The string written to the dom for this value.
    /// Handlers have no string form.
    pub fn to_dom_string(&self) -> Option<String> {
        match self {
            Self::Str(v) => Some(v.clone()),
            Self::Number(n) => Some(format_number(*n)),
            Self::Handler(_) => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<&String> for AttrValue {
    fn from(v: &String) -> Self {
        Self::Str(v.clone())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<EventHandler> for AttrValue {
    fn from(h: EventHandler) -> Self {
        Self::Handler(h)
    }
}

macro_rules! impl_number_attr {
    ( $( $ty:ty ),* ) => {
        $(
            impl From<$ty> for AttrValue {
                fn from(v: $ty) -> Self {
                    Self::Number(v as f64)
                }
            }
        )*
    };
}

impl_number_attr!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Element attributes, kept in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Props {
    entries: Vec<(String, AttrValue)>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute.
    ///
    /// Setting an existing key replaces its value but keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    #[inline]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add an event handler under `key`, which should start with "on".
    pub fn on<F>(self, key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Event) -> Result<()> + 'static,
    {
        self.with(key, AttrValue::handler(f))
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(AttrValue::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Props
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Self::new();
        for (key, value) in iter {
            props.insert(key, value);
        }
        props
    }
}

impl<K, V> Extend<(K, V)> for Props
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut props = Props::new().with("id", "a").with("className", "x");
        props.insert("id", "b");

        let keys: Vec<_> = props.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["id", "className"]);
        assert_eq!(props.get_str("id"), Some("b"));
    }

    #[test]
    fn test_number_values_render_like_numbers() {
        assert_eq!(AttrValue::from(3).to_dom_string().as_deref(), Some("3"));
        assert_eq!(AttrValue::from(0.5).to_dom_string().as_deref(), Some("0.5"));
        assert_eq!(AttrValue::handler(|_| Ok(())).to_dom_string(), None);
    }

    #[test]
    fn test_handler_equality_is_identity() {
        let a = AttrValue::handler(|_| Ok(()));
        let b = AttrValue::handler(|_| Ok(()));
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }
}
