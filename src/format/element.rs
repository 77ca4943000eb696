use chrono::Timelike;

use crate::error::{PromptKitError, Result};

use super::value::XmlValue;
use super::FormatOptions;

/// XML 元素树节点
///
/// 叶子节点总是有文本；容器节点只有子节点，没有文本。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XmlElement {
    pub tag: String,
    pub text: Option<String>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn leaf(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: Some(text.into()),
            children: Vec::new(),
        }
    }

    pub fn container(tag: impl Into<String>, children: Vec<XmlElement>) -> Self {
        Self {
            tag: tag.into(),
            text: None,
            children,
        }
    }

    pub fn is_container(&self) -> bool {
        self.text.is_none()
    }
}

/// 把值转换为元素树，`tag` 为空时使用 `item_tag` 或记录名
pub fn to_element(value: &XmlValue, tag: Option<&str>, options: &FormatOptions) -> Result<XmlElement> {
    let tag_or_item = || tag.unwrap_or(&options.item_tag).to_string();

    let element = match value {
        XmlValue::Null => XmlElement::leaf(tag_or_item(), options.none_str.clone()),
        XmlValue::String(s) => XmlElement::leaf(tag_or_item(), s.clone()),
        XmlValue::Bytes(bytes) => XmlElement::leaf(tag_or_item(), decode_dropping_invalid(bytes)),
        XmlValue::Bool(b) => XmlElement::leaf(tag_or_item(), if *b { "True" } else { "False" }),
        XmlValue::Int(i) => XmlElement::leaf(tag_or_item(), i.to_string()),
        XmlValue::UInt(u) => XmlElement::leaf(tag_or_item(), u.to_string()),
        XmlValue::Float(f) => XmlElement::leaf(tag_or_item(), format_float(*f)),
        XmlValue::Date(date) => XmlElement::leaf(tag_or_item(), date.format("%Y-%m-%d").to_string()),
        XmlValue::DateTime(dt) => XmlElement::leaf(
            tag_or_item(),
            dt.format(&iso_datetime_format(dt.nanosecond(), "")).to_string(),
        ),
        XmlValue::DateTimeTz(dt) => XmlElement::leaf(
            tag_or_item(),
            dt.format(&iso_datetime_format(dt.nanosecond(), "%:z")).to_string(),
        ),
        XmlValue::Record { name, fields } => {
            let children = fields
                .iter()
                .map(|(field, value)| to_element(value, Some(field.as_str()), options))
                .collect::<Result<Vec<_>>>()?;
            XmlElement::container(tag.unwrap_or(name.as_str()), children)
        }
        XmlValue::Mapping(entries) => {
            let children = entries
                .iter()
                .map(|(key, value)| {
                    let key = key_to_tag(key)?;
                    to_element(value, Some(key.as_str()), options)
                })
                .collect::<Result<Vec<_>>>()?;
            XmlElement::container(tag_or_item(), children)
        }
        XmlValue::Sequence(items) => {
            let children = items
                .iter()
                .map(|item| to_element(item, None, options))
                .collect::<Result<Vec<_>>>()?;
            XmlElement::container(tag_or_item(), children)
        }
        XmlValue::Opaque { type_name } => {
            return Err(PromptKitError::UnsupportedType(type_name.clone()));
        }
    };

    Ok(element)
}

fn key_to_tag(key: &XmlValue) -> Result<String> {
    match key {
        XmlValue::String(s) => Ok(s.clone()),
        XmlValue::Int(i) => Ok(i.to_string()),
        XmlValue::UInt(u) => Ok(u.to_string()),
        other => Err(PromptKitError::UnsupportedType(format!(
            "mapping key of type `{}` (only strings and integers are allowed)",
            other.type_name()
        ))),
    }
}

/// UTF-8 解码，丢弃非法字节
fn decode_dropping_invalid(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

/// 微秒为零时省略小数部分，否则固定 6 位
fn iso_datetime_format(nanosecond: u32, offset: &str) -> String {
    let fraction = if nanosecond / 1_000 == 0 { "" } else { "%.6f" };
    format!("%Y-%m-%dT%H:%M:%S{fraction}{offset}")
}

/// 最短往返表示，指数写成 `e+20` / `e-05`
fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        let sign = if value > 0.0 { "" } else { "-" };
        return format!("{sign}inf");
    }

    let repr = format!("{value:?}");
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => repr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate};

    fn options() -> FormatOptions {
        FormatOptions::default()
    }

    #[test]
    fn null_uses_placeholder() {
        let element = to_element(&XmlValue::Null, None, &options()).unwrap();
        assert_eq!(element, XmlElement::leaf("item", "null"));

        let custom = FormatOptions::default().with_none_str("None");
        let element = to_element(&XmlValue::Null, Some("x"), &custom).unwrap();
        assert_eq!(element, XmlElement::leaf("x", "None"));
    }

    #[test]
    fn invalid_bytes_are_dropped() {
        let value = XmlValue::bytes(vec![b'o', 0xff, b'k', 0xc3]);
        let element = to_element(&value, None, &options()).unwrap();
        assert_eq!(element.text.as_deref(), Some("ok"));
    }

    #[test]
    fn scalar_text_forms() {
        let cases = [
            (XmlValue::Bool(true), "True"),
            (XmlValue::Bool(false), "False"),
            (XmlValue::Int(-42), "-42"),
            (XmlValue::UInt(u128::MAX), "340282366920938463463374607431768211455"),
            (XmlValue::Float(6.0), "6.0"),
            (XmlValue::Float(0.25), "0.25"),
            (XmlValue::Float(1e20), "1e+20"),
            (XmlValue::Float(1.5e-5), "1.5e-05"),
            (XmlValue::Float(-2.5e300), "-2.5e+300"),
            (XmlValue::Float(1e15), "1000000000000000.0"),
            (XmlValue::Float(f64::NAN), "nan"),
            (XmlValue::Float(f64::NEG_INFINITY), "-inf"),
        ];
        for (value, expected) in cases {
            let element = to_element(&value, None, &options()).unwrap();
            assert_eq!(element.text.as_deref(), Some(expected));
        }
    }

    #[test]
    fn dates_use_iso_format() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let element = to_element(&XmlValue::Date(date), None, &options()).unwrap();
        assert_eq!(element.text.as_deref(), Some("2024-02-29"));

        let dt = date.and_hms_opt(13, 5, 9).unwrap();
        let element = to_element(&XmlValue::DateTime(dt), None, &options()).unwrap();
        assert_eq!(element.text.as_deref(), Some("2024-02-29T13:05:09"));

        let dt = date.and_hms_milli_opt(13, 5, 9, 250).unwrap();
        let element = to_element(&XmlValue::DateTime(dt), None, &options()).unwrap();
        assert_eq!(element.text.as_deref(), Some("2024-02-29T13:05:09.250000"));

        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let aware = dt.and_local_timezone(offset).single().unwrap();
        let element = to_element(&XmlValue::DateTimeTz(aware), None, &options()).unwrap();
        assert_eq!(element.text.as_deref(), Some("2024-02-29T13:05:09.250000-05:00"));
    }

    #[test]
    fn record_tag_defaults_to_record_name() {
        let value = XmlValue::record("User", [("name", "John")]);
        let element = to_element(&value, None, &options()).unwrap();
        assert_eq!(element.tag, "User");
        assert_eq!(element.children, vec![XmlElement::leaf("name", "John")]);

        let element = to_element(&value, Some("person"), &options()).unwrap();
        assert_eq!(element.tag, "person");
    }

    #[test]
    fn integer_keys_are_stringified() {
        let value = XmlValue::mapping([(1, "one"), (2, "two")]);
        let element = to_element(&value, None, &options()).unwrap();
        assert_eq!(element.children[0], XmlElement::leaf("1", "one"));
        assert_eq!(element.children[1], XmlElement::leaf("2", "two"));
    }

    #[test]
    fn float_key_is_rejected() {
        let value = XmlValue::mapping([(1.5, "x")]);
        let err = to_element(&value, None, &options()).unwrap_err();
        assert!(matches!(err, PromptKitError::UnsupportedType(msg) if msg.contains("float")));
    }

    #[test]
    fn nested_opaque_aborts() {
        let value = XmlValue::sequence([XmlValue::Int(1), XmlValue::opaque("Socket")]);
        let err = to_element(&value, None, &options()).unwrap_err();
        assert!(matches!(err, PromptKitError::UnsupportedType(name) if name == "Socket"));
    }

    #[test]
    fn empty_sequence_is_empty_container() {
        let element = to_element(&XmlValue::Sequence(vec![]), None, &options()).unwrap();
        assert!(element.is_container());
        assert!(element.children.is_empty());
    }
}
