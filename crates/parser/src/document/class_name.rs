//! 클래스 이름 분해 문서
//!
//! `com.example.Foo` →
//! `{fullyQualifiedClassName: "com.example.Foo", package: ["com", "example", "Foo"], className: "Foo"}`

use relog_core::document::{Document, Value};
use relog_core::types::ClassNameInfo;

use super::keys;

/// 분해 결과를 문서로 만듭니다.
pub fn to_document(info: &ClassNameInfo) -> Document {
    let mut doc = Document::new();
    doc.insert(keys::FQCN, info.fully_qualified_name.as_str());
    if !info.package_components.is_empty() {
        doc.insert(
            keys::PACKAGE,
            info.package_components
                .iter()
                .map(|c| Value::from(c.as_str()))
                .collect::<Vec<_>>(),
        );
    }
    doc.put_text(keys::CLASS_NAME, Some(info.simple_class_name.as_str()));
    doc
}

/// 클래스 이름 문자열을 분해 문서로 만듭니다. 비어 있으면 `None`입니다.
pub fn class_name_document(name: &str) -> Option<Document> {
    ClassNameInfo::parse(name).map(|info| to_document(&info))
}
