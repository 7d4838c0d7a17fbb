//! Converting ordered lists of runtime values into concrete Rust
//! collections.
//!
//! Conversion is generics-based: an element trait ([`CoerceElement`]) plus
//! any `FromIterator` collection shape. A [`ConverterRegistry`] pre-binds
//! the (collection, element) pairs an application needs, is immutable once
//! built, and is injected wherever lists must materialize; there is no
//! process-global registry.

use crate::Value;
use std::any::Any;
use std::any::TypeId;
use std::collections::BTreeSet;
use std::collections::HashMap;
use std::collections::HashSet;
use std::collections::VecDeque;

/// Extracting a concrete Rust value out of a non-null runtime value.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64()
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> Option<Self> {
        i32::try_from(value.as_i64()?).ok()
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

/// Element-level conversion with null handling.
///
/// Non-nullable element types default null elements (`[1, null, 3]` as
/// `Vec<i64>` is `[1, 0, 3]`); `Option<T>` elements preserve them
/// (`[Some(1), None, Some(3)]`).
pub trait CoerceElement: Sized {
    fn coerce(value: &Value) -> Option<Self>;
}

macro_rules! coerce_with_default {
    ($($element:ty),* $(,)?) => {$(
        impl CoerceElement for $element {
            fn coerce(value: &Value) -> Option<Self> {
                if value.is_null() {
                    Some(<$element>::default())
                } else {
                    <$element as FromValue>::from_value(value)
                }
            }
        }
    )*};
}

coerce_with_default!(i64, i32, f64, bool, String);

impl<T: FromValue> CoerceElement for Option<T> {
    fn coerce(value: &Value) -> Option<Self> {
        if value.is_null() {
            Some(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

/// Converts an ordered slice of values into any `FromIterator` collection.
/// Returns `None` if any element fails to coerce.
pub fn convert_list<T, C>(values: &[Value]) -> Option<C>
where
    T: CoerceElement,
    C: FromIterator<T>,
{
    values.iter().map(T::coerce).collect()
}

trait ListConverter: Send + Sync {
    fn convert(&self, values: &[Value]) -> Option<Box<dyn Any + Send>>;
}

struct TypedConverter<C, T> {
    _marker: std::marker::PhantomData<fn() -> (C, T)>,
}

impl<C, T> ListConverter for TypedConverter<C, T>
where
    T: CoerceElement + 'static,
    C: FromIterator<T> + Send + 'static,
{
    fn convert(&self, values: &[Value]) -> Option<Box<dyn Any + Send>> {
        let collection: C = convert_list::<T, C>(values)?;
        Some(Box::new(collection))
    }
}

/// An immutable map from collection type to its converter.
///
/// Built once (typically at startup), then shared; lookups are keyed by
/// the collection's `TypeId`, so `convert_to::<Vec<i64>>` only succeeds
/// when that exact pairing was registered.
pub struct ConverterRegistry {
    converters: HashMap<TypeId, Box<dyn ListConverter>>,
}

impl ConverterRegistry {
    pub fn builder() -> ConverterRegistryBuilder {
        ConverterRegistryBuilder {
            converters: HashMap::new(),
        }
    }

    /// A registry covering the common collection/element pairings:
    /// `Vec`, `VecDeque`, `HashSet`, and `BTreeSet` over `i64`, `f64`
    /// (sequences only), `String`, and `bool`, plus `Vec<Option<_>>`
    /// nullable-element variants.
    pub fn with_defaults() -> Self {
        Self::builder()
            .register::<Vec<i64>, i64>()
            .register::<Vec<i32>, i32>()
            .register::<Vec<f64>, f64>()
            .register::<Vec<String>, String>()
            .register::<Vec<bool>, bool>()
            .register::<Vec<Option<i64>>, Option<i64>>()
            .register::<Vec<Option<f64>>, Option<f64>>()
            .register::<Vec<Option<String>>, Option<String>>()
            .register::<Vec<Option<bool>>, Option<bool>>()
            .register::<VecDeque<i64>, i64>()
            .register::<VecDeque<String>, String>()
            .register::<HashSet<i64>, i64>()
            .register::<HashSet<String>, String>()
            .register::<BTreeSet<i64>, i64>()
            .register::<BTreeSet<String>, String>()
            .build()
    }

    /// Converts `values` to `C`, if a converter for `C` was registered
    /// and every element coerces.
    pub fn convert_to<C: 'static>(&self, values: &[Value]) -> Option<C> {
        let converted = self
            .converters
            .get(&TypeId::of::<C>())?
            .convert(values)?;
        converted.downcast::<C>().ok().map(|boxed| *boxed)
    }

    pub fn supports<C: 'static>(&self) -> bool {
        self.converters.contains_key(&TypeId::of::<C>())
    }
}

/// Accumulates converter registrations; consumed by [`build`] into the
/// immutable registry.
///
/// [`build`]: ConverterRegistryBuilder::build
pub struct ConverterRegistryBuilder {
    converters: HashMap<TypeId, Box<dyn ListConverter>>,
}

impl ConverterRegistryBuilder {
    pub fn register<C, T>(mut self) -> Self
    where
        T: CoerceElement + 'static,
        C: FromIterator<T> + Send + 'static,
    {
        self.converters.insert(
            TypeId::of::<C>(),
            Box::new(TypedConverter::<C, T> {
                _marker: std::marker::PhantomData,
            }),
        );
        self
    }

    pub fn build(self) -> ConverterRegistry {
        ConverterRegistry {
            converters: self.converters,
        }
    }
}
