//! 문서 모델 -- 문서 지향 저장소에 넣을 구조화 레코드
//!
//! [`Document`]는 필드 삽입 순서를 보존하는 키-값 목록입니다.
//! 직렬화 시 날짜 값은 MongoDB Extended JSON(`{"$date": ...}`) 형태로
//! 출력되어 임포터가 날짜 타입을 유지할 수 있습니다.
//!
//! # 사용 예시
//! ```
//! use relog_core::document::{Document, Value};
//!
//! let mut doc = Document::new();
//! doc.put_text("thread", Some("main"));
//! doc.put_text("message", Some("   ")); // 공백뿐인 텍스트는 생략
//! assert!(doc.contains_key("thread"));
//! assert!(!doc.contains_key("message"));
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// 문서 필드 값
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// 문자열
    String(String),
    /// 정수
    Int(i64),
    /// 날짜/시각
    DateTime(DateTime<Utc>),
    /// 배열
    Array(Vec<Value>),
    /// 중첩 문서
    Document(Document),
}

impl Value {
    /// 문자열 값이면 참조를 반환합니다.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// 정수 값이면 반환합니다.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// 중첩 문서이면 참조를 반환합니다.
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Self::Document(d) => Some(d),
            _ => None,
        }
    }

    /// 배열이면 참조를 반환합니다.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// 날짜 값이면 반환합니다.
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt)
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Self::Document(doc)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Array(items)
    }
}

/// 삽입 순서를 보존하는 문서
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    fields: Vec<(String, Value)>,
}

impl Document {
    /// 빈 문서를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 필드를 넣습니다. 같은 키가 있으면 그 자리에서 값을 교체합니다.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    /// 값이 있을 때만 필드를 넣습니다.
    pub fn put_opt<V: Into<Value>>(&mut self, key: &str, value: Option<V>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    /// 텍스트 필드를 넣습니다. `None`이거나 공백뿐인 텍스트는 생략합니다.
    pub fn put_text(&mut self, key: &str, value: Option<&str>) {
        if let Some(text) = value
            && !text.trim().is_empty()
        {
            self.insert(key, text);
        }
    }

    /// 필드 값을 조회합니다.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// 문자열 필드를 조회합니다.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// 중첩 문서 필드를 조회합니다.
    pub fn get_document(&self, key: &str) -> Option<&Document> {
        self.get(key).and_then(Value::as_document)
    }

    /// 배열 필드를 조회합니다.
    pub fn get_array(&self, key: &str) -> Option<&[Value]> {
        self.get(key).and_then(Value::as_array)
    }

    /// 필드 존재 여부
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }

    /// 필드 개수
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// 빈 문서 여부
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 삽입 순서대로 키 목록을 반환합니다.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// 삽입 순서대로 필드를 순회합니다.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Extended JSON 문자열로 직렬화합니다.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::String(s) => serializer.serialize_str(s),
            Self::Int(n) => serializer.serialize_i64(*n),
            Self::DateTime(dt) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("$date", &dt.to_rfc3339_opts(SecondsFormat::Millis, true))?;
                map.end()
            }
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Document(doc) => doc.serialize(serializer),
        }
    }
}
