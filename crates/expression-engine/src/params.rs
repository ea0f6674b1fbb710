//! Named parameter lookup.
//!
//! Templates only ever ask a parameter bag one question: "what is the text of
//! the value called `name`, if any?". [`ParamSource`] is that capability.
//! A value that is declared but null reads exactly like a missing one.

use crate::error::ParamError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::{
    borrow::Borrow,
    collections::{BTreeMap, HashMap},
    hash::{BuildHasher, Hash},
    sync::Arc,
};

/// A bag of named values consulted while rendering.
pub trait ParamSource {
    /// Textual form of the named value, `None` when absent or null.
    fn lookup(&self, name: &str) -> Option<String>;
}

/// A single value stored in a parameter bag.
pub trait ParamValue {
    fn to_param(&self) -> Option<String>;
}

macro_rules! display_param_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ParamValue for $ty {
                fn to_param(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

display_param_value!(
    str, String, bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32,
    f64,
);

impl<T: ParamValue + ?Sized> ParamValue for &T {
    fn to_param(&self) -> Option<String> {
        (**self).to_param()
    }
}

impl<T: ParamValue + ?Sized> ParamValue for Box<T> {
    fn to_param(&self) -> Option<String> {
        (**self).to_param()
    }
}

impl<T: ParamValue> ParamValue for Option<T> {
    fn to_param(&self) -> Option<String> {
        self.as_ref().and_then(ParamValue::to_param)
    }
}

impl ParamValue for Value {
    fn to_param(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl<K, V, S> ParamSource for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: ParamValue,
    S: BuildHasher,
{
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).and_then(ParamValue::to_param)
    }
}

impl<K, V> ParamSource for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: ParamValue,
{
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).and_then(ParamValue::to_param)
    }
}

impl ParamSource for Map<String, Value> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).and_then(ParamValue::to_param)
    }
}

/// Only JSON objects carry named values; any other JSON value is an empty bag.
impl ParamSource for Value {
    fn lookup(&self, name: &str) -> Option<String> {
        match self {
            Value::Object(map) => map.lookup(name),
            _ => None,
        }
    }
}

/// The empty bag.
impl ParamSource for () {
    fn lookup(&self, _name: &str) -> Option<String> {
        None
    }
}

impl<T: ParamSource + ?Sized> ParamSource for &T {
    fn lookup(&self, name: &str) -> Option<String> {
        (**self).lookup(name)
    }
}

impl<T: ParamSource + ?Sized> ParamSource for Box<T> {
    fn lookup(&self, name: &str) -> Option<String> {
        (**self).lookup(name)
    }
}

impl<T: ParamSource + ?Sized> ParamSource for Arc<T> {
    fn lookup(&self, name: &str) -> Option<String> {
        (**self).lookup(name)
    }
}

impl<T: ParamSource> ParamSource for Option<T> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.as_ref().and_then(|bag| bag.lookup(name))
    }
}

/// Owned, ordered parameter bag. Build it with [`params!`](crate::params!) or
/// from any serializable record with [`Params::from_serialize`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params {
    values: BTreeMap<String, Option<String>>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl ParamValue) {
        self.values.insert(name.into(), value.to_param());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl ParamValue) -> Self {
        self.insert(name, value);
        self
    }

    /// Declare `name` with a null value. Lookups treat it as absent.
    pub fn insert_null(&mut self, name: impl Into<String>) {
        self.values.insert(name.into(), None);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Build a bag from the fields of a serializable record.
    ///
    /// The record must serialize to a JSON object; `None` fields become null
    /// entries.
    pub fn from_serialize<T: Serialize + ?Sized>(record: &T) -> Result<Self, ParamError> {
        Self::from_json(serde_json::to_value(record)?)
    }

    pub fn from_json(value: Value) -> Result<Self, ParamError> {
        let map = match value {
            Value::Object(map) => map,
            other => return Err(ParamError::NotAnObject(json_kind(&other))),
        };

        let values = map
            .into_iter()
            .map(|(name, value)| {
                let text = value.to_param();
                (name, text)
            })
            .collect();

        Ok(Self { values })
    }
}

impl ParamSource for Params {
    fn lookup(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned().flatten()
    }
}

impl<K: Into<String>, V: ParamValue> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Build a [`Params`] bag from `name => value` pairs.
///
/// ```
/// use expression_engine::{ParamSource, params};
///
/// let bag = params! { "name" => "Jane", "age" => 15 };
/// assert_eq!(bag.lookup("age").as_deref(), Some("15"));
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::params::Params::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut params = $crate::params::Params::new();
        $( params.insert($name, $value); )+
        params
    }};
}
