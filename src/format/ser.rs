//! serde 桥接：把任意 `Serialize` 类型转换为 [`XmlValue`]
//!
//! - 结构体 → `Record`（结构体名作为默认标签）
//! - map → `Mapping`，序列/元组 → `Sequence`
//! - `None` / unit → `Null`
//! - 枚举变体按 serde_json 的外部标记方式处理

use serde::ser::{self, Serialize};

use crate::error::{PromptKitError, Result};

use super::value::XmlValue;

pub fn to_xml_value<T>(value: &T) -> Result<XmlValue>
where
    T: Serialize + ?Sized,
{
    value.serialize(ValueSerializer)
}

pub struct ValueSerializer;

impl ser::Serializer for ValueSerializer {
    type Ok = XmlValue;
    type Error = PromptKitError;

    type SerializeSeq = SeqCollector;
    type SerializeTuple = SeqCollector;
    type SerializeTupleStruct = SeqCollector;
    type SerializeTupleVariant = VariantCollector<SeqCollector>;
    type SerializeMap = MapCollector;
    type SerializeStruct = RecordCollector;
    type SerializeStructVariant = VariantCollector<RecordCollector>;

    fn serialize_bool(self, v: bool) -> Result<XmlValue> {
        Ok(XmlValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<XmlValue> {
        Ok(v.into())
    }

    fn serialize_i16(self, v: i16) -> Result<XmlValue> {
        Ok(v.into())
    }

    fn serialize_i32(self, v: i32) -> Result<XmlValue> {
        Ok(v.into())
    }

    fn serialize_i64(self, v: i64) -> Result<XmlValue> {
        Ok(v.into())
    }

    fn serialize_i128(self, v: i128) -> Result<XmlValue> {
        Ok(XmlValue::Int(v))
    }

    fn serialize_u8(self, v: u8) -> Result<XmlValue> {
        Ok(v.into())
    }

    fn serialize_u16(self, v: u16) -> Result<XmlValue> {
        Ok(v.into())
    }

    fn serialize_u32(self, v: u32) -> Result<XmlValue> {
        Ok(v.into())
    }

    fn serialize_u64(self, v: u64) -> Result<XmlValue> {
        Ok(v.into())
    }

    fn serialize_u128(self, v: u128) -> Result<XmlValue> {
        Ok(v.into())
    }

    fn serialize_f32(self, v: f32) -> Result<XmlValue> {
        Ok(v.into())
    }

    fn serialize_f64(self, v: f64) -> Result<XmlValue> {
        Ok(XmlValue::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<XmlValue> {
        Ok(v.into())
    }

    fn serialize_str(self, v: &str) -> Result<XmlValue> {
        Ok(v.into())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<XmlValue> {
        Ok(XmlValue::bytes(v))
    }

    fn serialize_none(self) -> Result<XmlValue> {
        Ok(XmlValue::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<XmlValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<XmlValue> {
        Ok(XmlValue::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<XmlValue> {
        Ok(XmlValue::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<XmlValue> {
        Ok(variant.into())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<XmlValue>
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
    ) -> Result<XmlValue>
    where
        T: ?Sized + Serialize,
    {
        Ok(XmlValue::Mapping(vec![(
            variant.into(),
            value.serialize(self)?,
        )]))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqCollector> {
        Ok(SeqCollector {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqCollector> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SeqCollector> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<VariantCollector<SeqCollector>> {
        Ok(VariantCollector {
            variant,
            inner: self.serialize_seq(Some(len))?,
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<MapCollector> {
        Ok(MapCollector {
            entries: Vec::with_capacity(len.unwrap_or(0)),
            pending_key: None,
        })
    }

    fn serialize_struct(self, name: &'static str, len: usize) -> Result<RecordCollector> {
        Ok(RecordCollector {
            name,
            fields: Vec::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<VariantCollector<RecordCollector>> {
        Ok(VariantCollector {
            variant,
            inner: self.serialize_struct(variant, len)?,
        })
    }
}

pub struct SeqCollector {
    items: Vec<XmlValue>,
}

impl SeqCollector {
    fn push<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(value.serialize(ValueSerializer)?);
        Ok(())
    }
}

impl ser::SerializeSeq for SeqCollector {
    type Ok = XmlValue;
    type Error = PromptKitError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<XmlValue> {
        Ok(XmlValue::Sequence(self.items))
    }
}

impl ser::SerializeTuple for SeqCollector {
    type Ok = XmlValue;
    type Error = PromptKitError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<XmlValue> {
        Ok(XmlValue::Sequence(self.items))
    }
}

impl ser::SerializeTupleStruct for SeqCollector {
    type Ok = XmlValue;
    type Error = PromptKitError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<XmlValue> {
        Ok(XmlValue::Sequence(self.items))
    }
}

pub struct MapCollector {
    entries: Vec<(XmlValue, XmlValue)>,
    pending_key: Option<XmlValue>,
}

impl ser::SerializeMap for MapCollector {
    type Ok = XmlValue;
    type Error = PromptKitError;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.pending_key = Some(key.serialize(ValueSerializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self.pending_key.take().ok_or_else(|| {
            PromptKitError::Serialization("map value serialized before its key".to_string())
        })?;
        self.entries.push((key, value.serialize(ValueSerializer)?));
        Ok(())
    }

    fn end(self) -> Result<XmlValue> {
        Ok(XmlValue::Mapping(self.entries))
    }
}

pub struct RecordCollector {
    name: &'static str,
    fields: Vec<(String, XmlValue)>,
}

impl RecordCollector {
    fn push<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.fields
            .push((key.to_string(), value.serialize(ValueSerializer)?));
        Ok(())
    }

    fn into_value(self) -> XmlValue {
        XmlValue::Record {
            name: self.name.to_string(),
            fields: self.fields,
        }
    }
}

impl ser::SerializeStruct for RecordCollector {
    type Ok = XmlValue;
    type Error = PromptKitError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(key, value)
    }

    fn end(self) -> Result<XmlValue> {
        Ok(self.into_value())
    }
}

/// 外部标记的枚举变体：`{variant: inner}`
pub struct VariantCollector<C> {
    variant: &'static str,
    inner: C,
}

impl VariantCollector<SeqCollector> {
    fn finish(self) -> XmlValue {
        XmlValue::Mapping(vec![(
            self.variant.into(),
            XmlValue::Sequence(self.inner.items),
        )])
    }
}

impl ser::SerializeTupleVariant for VariantCollector<SeqCollector> {
    type Ok = XmlValue;
    type Error = PromptKitError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.inner.push(value)
    }

    fn end(self) -> Result<XmlValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for VariantCollector<RecordCollector> {
    type Ok = XmlValue;
    type Error = PromptKitError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.inner.push(key, value)
    }

    fn end(self) -> Result<XmlValue> {
        Ok(XmlValue::Mapping(vec![(
            self.variant.into(),
            self.inner.into_value(),
        )]))
    }
}
