//! NSV deserialization through serde.
//!
//! A decoded table only knows two levels: rows and cells. Everything deeper
//! was folded into cells with `lift`, so the [`Deserializer`] lets the target
//! type decide: whenever a sequence is requested where a cell sits, the cell
//! is unlifted; whenever a string is requested where a sequence sits, the
//! sequence is folded back into its cell text.
//!
//! ## Examples
//!
//! ```rust
//! use nsv::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Point { x: i32, y: i32 }
//!
//! let points: Vec<Point> = from_str("1\n2\n\n3\n4\n\n").unwrap();
//! assert_eq!(points, vec![Point { x: 1, y: 2 }, Point { x: 3, y: 4 }]);
//!
//! // Three levels deep: the innermost rows were lifted into cells
//! let cube: Vec<Vec<Vec<String>>> = from_str("a\\nb\\n\\n\n\n").unwrap();
//! assert_eq!(cube, vec![vec![vec!["a", "b"]]]);
//! ```

use crate::lift::unlift;
use crate::{decode, Error, Result, Value};
use serde::de;
use std::str::FromStr;

/// Deserializer over a nested [`Value`].
pub struct Deserializer {
    value: Value,
}

impl Deserializer {
    /// Decodes `input` as a table and wraps it for deserialization.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &str) -> Self {
        Deserializer::from_value(Value::from(decode(input)))
    }

    pub fn from_value(value: Value) -> Self {
        Deserializer { value }
    }

    fn into_cell(self) -> String {
        match self.value {
            Value::Cell(s) => s,
            seq @ Value::Seq(_) => seq.fold(),
        }
    }

    fn into_seq(self) -> Result<Vec<Value>> {
        match self.value {
            Value::Seq(items) => Ok(items),
            Value::Cell(s) => Ok(unlift(&s)?.into_iter().map(Value::Cell).collect()),
        }
    }

    fn parse<T: FromStr>(self, expected: &str) -> Result<T> {
        let cell = self.into_cell();
        cell.parse()
            .map_err(|_| Error::type_mismatch(expected, &format!("{:?}", cell)))
    }
}

macro_rules! deserialize_parsed {
    ($($method:ident => $visit:ident : $ty:ty),* $(,)?) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                visitor.$visit(self.parse::<$ty>(stringify!($ty))?)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for Deserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Cell(s) => visitor.visit_string(s),
            Value::Seq(items) => visitor.visit_seq(SeqDeserializer::new(items)),
        }
    }

    deserialize_parsed! {
        deserialize_bool => visit_bool: bool,
        deserialize_i8 => visit_i8: i8,
        deserialize_i16 => visit_i16: i16,
        deserialize_i32 => visit_i32: i32,
        deserialize_i64 => visit_i64: i64,
        deserialize_i128 => visit_i128: i128,
        deserialize_u8 => visit_u8: u8,
        deserialize_u16 => visit_u16: u16,
        deserialize_u32 => visit_u32: u32,
        deserialize_u64 => visit_u64: u64,
        deserialize_u128 => visit_u128: u128,
        deserialize_f32 => visit_f32: f32,
        deserialize_f64 => visit_f64: f64,
        deserialize_char => visit_char: char,
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_string(self.into_cell())
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_byte_buf(visitor)
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let bytes = self
            .into_seq()?
            .into_iter()
            .map(|item| Deserializer::from_value(item).parse::<u8>("u8"))
            .collect::<Result<Vec<u8>>>()?;
        visitor.visit_byte_buf(bytes)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let mut items = self.into_seq()?;
        match items.len() {
            0 => visitor.visit_none(),
            1 => visitor.visit_some(Deserializer::from_value(items.remove(0))),
            n => Err(Error::type_mismatch(
                "option (zero or one element)",
                &format!("sequence of {}", n),
            )),
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let cell = self.into_cell();
        if cell.is_empty() {
            visitor.visit_unit()
        } else {
            Err(Error::type_mismatch("empty cell", &format!("{:?}", cell)))
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let items = self.into_seq()?;
        let len = items.len();
        let mut seq = SeqDeserializer::new(items);
        let value = visitor.visit_seq(&mut seq)?;
        // Field order is the only schema, so leftover cells are an error
        if seq.iter.len() == 0 {
            Ok(value)
        } else {
            Err(de::Error::invalid_length(len, &"fewer elements in sequence"))
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let pairs = self
            .into_seq()?
            .into_iter()
            .map(|pair| {
                let mut kv = Deserializer::from_value(pair).into_seq()?;
                if kv.len() != 2 {
                    return Err(Error::type_mismatch(
                        "[key, value] pair",
                        &format!("sequence of {}", kv.len()),
                    ));
                }
                let value = kv.pop().unwrap_or_default();
                let key = kv.pop().unwrap_or_default();
                Ok((key, value))
            })
            .collect::<Result<Vec<_>>>()?;
        visitor.visit_map(MapDeserializer::new(pairs))
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let mut items = self.into_seq()?.into_iter();
        let variant = match items.next() {
            Some(name) => Deserializer::from_value(name).into_cell(),
            None => return Err(Error::type_mismatch("enum variant", "empty sequence")),
        };
        let payload = items.next();
        if items.next().is_some() {
            return Err(Error::type_mismatch(
                "variant name and at most one payload",
                "longer sequence",
            ));
        }
        visitor.visit_enum(EnumDeserializer { variant, payload })
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(Deserializer::from_value(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapDeserializer {
    iter: std::vec::IntoIter<(Value, Value)>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(pairs: Vec<(Value, Value)>) -> Self {
        MapDeserializer {
            iter: pairs.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(Deserializer::from_value(key)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(Deserializer::from_value(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct EnumDeserializer {
    variant: String,
    payload: Option<Value>,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(Deserializer::from_value(Value::Cell(self.variant)))?;
        Ok((
            variant,
            VariantDeserializer {
                payload: self.payload,
            },
        ))
    }
}

struct VariantDeserializer {
    payload: Option<Value>,
}

impl VariantDeserializer {
    fn payload(self, kind: &str) -> Result<Deserializer> {
        self.payload
            .map(Deserializer::from_value)
            .ok_or_else(|| Error::type_mismatch(kind, "unit variant"))
    }
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.payload {
            None => Ok(()),
            Some(_) => Err(Error::type_mismatch("unit variant", "variant with payload")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(self.payload("newtype variant")?)
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_seq(self.payload("tuple variant")?, visitor)
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_seq(self.payload("struct variant")?, visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nsv;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    fn value_into<T: for<'de> Deserialize<'de>>(value: Value) -> Result<T> {
        T::deserialize(Deserializer::from_value(value))
    }

    #[derive(Deserialize, Debug, PartialEq)]
    enum Shape {
        Empty,
        Circle(f64),
        Rect { w: u8, h: u8 },
        Pair(i8, i8),
    }

    #[test]
    fn test_scalars_parse_from_cells() {
        assert!(value_into::<bool>(nsv!("true")).unwrap());
        assert_eq!(value_into::<i64>(nsv!("-42")).unwrap(), -42);
        assert_eq!(value_into::<f64>(nsv!("1.5")).unwrap(), 1.5);
        assert_eq!(value_into::<char>(nsv!("\n")).unwrap(), '\n');
        value_into::<()>(nsv!("")).unwrap();
    }

    #[test]
    fn test_bad_number_is_type_mismatch() {
        let err = value_into::<u8>(nsv!("300")).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
        assert!(err.to_string().contains("u8"));
    }

    #[test]
    fn test_cell_unlifts_on_demand() {
        let nested: Vec<String> = value_into(nsv!("a\nb\n\n")).unwrap();
        assert_eq!(nested, vec!["a", "b"]);
    }

    #[test]
    fn test_seq_folds_on_demand() {
        let text: String = value_into(nsv!(["a", "b"])).unwrap();
        assert_eq!(text, "a\nb\n\n");
    }

    #[test]
    fn test_options() {
        assert_eq!(value_into::<Option<String>>(nsv!([])).unwrap(), None);
        assert_eq!(
            value_into::<Option<String>>(nsv!([""])).unwrap(),
            Some(String::new())
        );
        assert!(value_into::<Option<String>>(nsv!(["a", "b"])).is_err());
    }

    #[test]
    fn test_enum_variants() {
        assert_eq!(value_into::<Shape>(nsv!(["Empty"])).unwrap(), Shape::Empty);
        assert_eq!(
            value_into::<Shape>(nsv!(["Circle", "2"])).unwrap(),
            Shape::Circle(2.0)
        );
        assert_eq!(
            value_into::<Shape>(nsv!(["Rect", ["3", "4"]])).unwrap(),
            Shape::Rect { w: 3, h: 4 }
        );
        assert_eq!(
            value_into::<Shape>(nsv!(["Pair", ["-1", "1"]])).unwrap(),
            Shape::Pair(-1, 1)
        );
        assert!(value_into::<Shape>(nsv!(["Empty", "x"])).is_err());
        assert!(value_into::<Shape>(nsv!([])).is_err());
    }

    #[test]
    fn test_maps_from_pairs() {
        let map: BTreeMap<String, u32> = value_into(nsv!([["a", "1"], ["b", "2"]])).unwrap();
        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.get("b"), Some(&2));
        assert!(value_into::<BTreeMap<String, u32>>(nsv!([["a"]])).is_err());
    }

    #[test]
    fn test_extra_elements_are_rejected() {
        #[derive(Deserialize, Debug)]
        #[allow(dead_code)]
        struct Pair {
            a: u8,
            b: u8,
        }

        assert!(value_into::<Pair>(nsv!(["1", "2", "3"])).is_err());
        assert!(value_into::<(u8, u8)>(nsv!(["1", "2", "3"])).is_err());
        assert!(value_into::<Shape>(nsv!(["Pair", ["1", "2", "3"]])).is_err());
        assert_eq!(value_into::<Vec<u8>>(nsv!(["1", "2", "3"])).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_from_str_reads_table() {
        let table =
            Vec::<Vec<String>>::deserialize(Deserializer::from_str("a\nb\n\nc\nd\n\n")).unwrap();
        assert_eq!(table, vec![vec!["a", "b"], vec!["c", "d"]]);
    }
}
