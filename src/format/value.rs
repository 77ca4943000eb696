use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use serde_json::Value;

/// 可格式化为 XML 的值
///
/// 分类顺序与格式化时的匹配顺序一致：结构化记录永远不会被当作映射处理。
#[derive(Clone, Debug, PartialEq)]
pub enum XmlValue {
    Null,
    String(String),
    Bytes(Vec<u8>),
    Bool(bool),
    Int(i128),
    /// 超出 `i128` 范围的无符号整数
    UInt(u128),
    Float(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    DateTimeTz(DateTime<FixedOffset>),
    /// 具名记录，名称作为默认标签
    Record {
        name: String,
        fields: Vec<(String, XmlValue)>,
    },
    /// 键只允许字符串或整数，其它键在格式化时报错
    Mapping(Vec<(XmlValue, XmlValue)>),
    Sequence(Vec<XmlValue>),
    /// 没有 XML 表示的外部值
    Opaque { type_name: String },
}

impl XmlValue {
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        XmlValue::Bytes(bytes.into())
    }

    pub fn record<N, K, V, I>(name: N, fields: I) -> Self
    where
        N: Into<String>,
        K: Into<String>,
        V: Into<XmlValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        XmlValue::Record {
            name: name.into(),
            fields: fields
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    pub fn mapping<K, V, I>(entries: I) -> Self
    where
        K: Into<XmlValue>,
        V: Into<XmlValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        XmlValue::Mapping(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    pub fn sequence<V, I>(items: I) -> Self
    where
        V: Into<XmlValue>,
        I: IntoIterator<Item = V>,
    {
        XmlValue::Sequence(items.into_iter().map(Into::into).collect())
    }

    pub fn opaque(type_name: impl Into<String>) -> Self {
        XmlValue::Opaque {
            type_name: type_name.into(),
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            XmlValue::Null => "null",
            XmlValue::String(_) => "string",
            XmlValue::Bytes(_) => "bytes",
            XmlValue::Bool(_) => "bool",
            XmlValue::Int(_) | XmlValue::UInt(_) => "int",
            XmlValue::Float(_) => "float",
            XmlValue::Date(_) => "date",
            XmlValue::DateTime(_) | XmlValue::DateTimeTz(_) => "datetime",
            XmlValue::Record { name, .. } => name,
            XmlValue::Mapping(_) => "mapping",
            XmlValue::Sequence(_) => "sequence",
            XmlValue::Opaque { type_name } => type_name,
        }
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for XmlValue {
                fn from(value: $ty) -> Self {
                    XmlValue::Int(value as i128)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl From<u128> for XmlValue {
    fn from(value: u128) -> Self {
        i128::try_from(value)
            .map(XmlValue::Int)
            .unwrap_or(XmlValue::UInt(value))
    }
}

impl From<bool> for XmlValue {
    fn from(value: bool) -> Self {
        XmlValue::Bool(value)
    }
}

impl From<f32> for XmlValue {
    fn from(value: f32) -> Self {
        XmlValue::Float(value as f64)
    }
}

impl From<f64> for XmlValue {
    fn from(value: f64) -> Self {
        XmlValue::Float(value)
    }
}

impl From<String> for XmlValue {
    fn from(value: String) -> Self {
        XmlValue::String(value)
    }
}

impl From<&str> for XmlValue {
    fn from(value: &str) -> Self {
        XmlValue::String(value.to_string())
    }
}

impl From<char> for XmlValue {
    fn from(value: char) -> Self {
        XmlValue::String(value.to_string())
    }
}

impl From<NaiveDate> for XmlValue {
    fn from(value: NaiveDate) -> Self {
        XmlValue::Date(value)
    }
}

impl From<NaiveDateTime> for XmlValue {
    fn from(value: NaiveDateTime) -> Self {
        XmlValue::DateTime(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for XmlValue {
    fn from(value: DateTime<Tz>) -> Self {
        XmlValue::DateTimeTz(value.fixed_offset())
    }
}

impl<T: Into<XmlValue>> From<Option<T>> for XmlValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(XmlValue::Null)
    }
}

impl<T: Into<XmlValue>> From<Vec<T>> for XmlValue {
    fn from(value: Vec<T>) -> Self {
        XmlValue::sequence(value)
    }
}

impl From<Value> for XmlValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => XmlValue::Null,
            Value::Bool(b) => XmlValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    XmlValue::Int(i as i128)
                } else if let Some(u) = n.as_u64() {
                    XmlValue::Int(u as i128)
                } else {
                    XmlValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => XmlValue::String(s),
            Value::Array(items) => XmlValue::Sequence(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => XmlValue::Mapping(
                map.into_iter()
                    .map(|(key, value)| (XmlValue::String(key), value.into()))
                    .collect(),
            ),
        }
    }
}
