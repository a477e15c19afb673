//! NSV serialization through serde.
//!
//! [`Serializer`] turns any `Serialize` value into a nested [`Value`]; the
//! crate-level [`to_string`](crate::to_string) then lays that value out as a
//! table, folding everything below row level into cells with `lift`.
//!
//! ## Data mapping
//!
//! | Rust | Value |
//! |------|-------|
//! | `bool`, numbers, `char`, `&str` | cell holding the `Display` text |
//! | `()`, unit structs | empty cell |
//! | sequences, tuples, structs | sequence of elements / fields in order |
//! | `Option<T>` | sequence of zero or one element |
//! | maps | sequence of `[key, value]` pairs |
//! | enum variants | sequence of the variant name, then the payload if any |
//!
//! Struct field names are not written; the field order is the schema, as in
//! a CSV file without a header.
//!
//! ## Examples
//!
//! ```rust
//! use nsv::{to_string, to_value, nsv};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! let points = vec![Point { x: 1, y: 2 }, Point { x: 3, y: 4 }];
//! assert_eq!(to_string(&points).unwrap(), "1\n2\n\n3\n4\n\n");
//! assert_eq!(to_value(&points[0]).unwrap(), nsv!(["1", "2"]));
//! ```

use crate::{Error, Result, Value};
use serde::{ser, Serialize};

/// Serializer producing a [`Value`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Serializer;

/// Collects elements of a sequence-like value.
pub struct SerializeVec {
    vec: Vec<Value>,
    variant: Option<&'static str>,
}

/// Collects `[key, value]` pairs of a map.
pub struct SerializeMap {
    pairs: Vec<Value>,
    current_key: Option<Value>,
}

impl SerializeVec {
    fn new(len: usize, variant: Option<&'static str>) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(len),
            variant,
        }
    }

    fn push<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(value.serialize(Serializer)?);
        Ok(())
    }

    fn finish(self) -> Value {
        let fields = Value::Seq(self.vec);
        match self.variant {
            Some(variant) => Value::Seq(vec![Value::from(variant), fields]),
            None => fields,
        }
    }
}

fn cell<T: ToString>(v: T) -> Result<Value> {
    Ok(Value::Cell(v.to_string()))
}

impl ser::Serializer for Serializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeVec;
    type SerializeStructVariant = SerializeVec;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        cell(v)
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        cell(v)
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        cell(v)
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        cell(v)
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        cell(v)
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        cell(v)
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        cell(v)
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        cell(v)
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        cell(v)
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        cell(v)
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        cell(v)
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        cell(v)
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        cell(v)
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        cell(v)
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        cell(v)
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(v.iter().map(u8::to_string).collect())
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Seq(Vec::new()))
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Ok(Value::Seq(vec![value.serialize(self)?]))
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Cell(String::new()))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::Seq(vec![Value::from(variant)]))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Ok(Value::Seq(vec![Value::from(variant), value.serialize(self)?]))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, Some(variant)))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap {
            pairs: Vec::with_capacity(len.unwrap_or(0)),
            current_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, Some(variant)))
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, _key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, _key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.current_key = Some(key.serialize(Serializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.pairs
            .push(Value::Seq(vec![key, value.serialize(Serializer)?]));
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Seq(self.pairs))
    }
}
