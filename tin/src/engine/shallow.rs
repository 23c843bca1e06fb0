use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
    rc::Rc,
    sync::Arc,
};

use crate::{component::Component, vdom::EventHandler};

/// The equality used to decide whether a state update re-renders.
///
/// Comparison is shallow. Plain values (numbers, booleans, chars, strings)
/// compare by value. Shared pointers compare by identity, so an `Rc` holding
/// equal contents still counts as a new value. Owned collections never
/// compare equal: every `Vec` handed to a setter is a fresh value.
///
/// Keep compound state behind an [`Rc`] to skip renders for updates that hand
/// back the previous value:
///
/// ```rust
/// use std::rc::Rc;
/// use tin::ShallowEq;
///
/// let items = Rc::new(vec![1, 2]);
/// assert!(items.shallow_eq(&items.clone()));
/// assert!(!items.shallow_eq(&Rc::new(vec![1, 2])));
/// assert!(!vec![1, 2].shallow_eq(&vec![1, 2]));
/// ```
pub trait ShallowEq {
    fn shallow_eq(&self, other: &Self) -> bool;
}

macro_rules! impl_shallow_eq_by_value {
    ( $( $ty:ty ),* ) => {
        $(
            impl ShallowEq for $ty {
                #[inline]
                fn shallow_eq(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

impl_shallow_eq_by_value!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String
);

impl<'a> ShallowEq for &'a str {
    #[inline]
    fn shallow_eq(&self, other: &Self) -> bool {
        self == other
    }
}

impl<T: ShallowEq> ShallowEq for Option<T> {
    fn shallow_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.shallow_eq(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: ?Sized> ShallowEq for Rc<T> {
    #[inline]
    fn shallow_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> ShallowEq for Arc<T> {
    #[inline]
    fn shallow_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl ShallowEq for EventHandler {
    #[inline]
    fn shallow_eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl ShallowEq for Component {
    #[inline]
    fn shallow_eq(&self, other: &Self) -> bool {
        self == other
    }
}

macro_rules! impl_shallow_eq_never {
    ( $( [$($gen:tt)*] $ty:ty ),* ) => {
        $(
            impl<$($gen)*> ShallowEq for $ty {
                #[inline]
                fn shallow_eq(&self, _other: &Self) -> bool {
                    false
                }
            }
        )*
    };
}

impl_shallow_eq_never!(
    [T] Vec<T>,
    [T] VecDeque<T>,
    [T: ?Sized] Box<T>,
    [K, V, S] HashMap<K, V, S>,
    [K, V] BTreeMap<K, V>,
    [T, S] HashSet<T, S>,
    [T] BTreeSet<T>
);
