//! 문서 빌더
//!
//! 이벤트 하나를 문서 하나로 바꾸는 순수 변환입니다. 호스트 메타데이터는
//! 생성 시 한 번 조회되어 이후 모든 문서에 똑같이 붙습니다. 생성 이후에는
//! 읽기 전용이므로 여러 스레드에서 공유해도 됩니다.

use relog_core::document::Document;
use relog_core::types::{LocationInfo, LogEvent};

use super::class_name::class_name_document;
use super::host::HostInfo;
use super::keys;
use super::throwable;

/// 이벤트 → 문서 변환기
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    host: HostInfo,
    host_doc: Document,
}

impl DocumentBuilder {
    /// 현재 호스트 정보를 조회해 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::with_host(HostInfo::resolve())
    }

    /// 주어진 호스트 정보로 빌더를 생성합니다.
    pub fn with_host(host: HostInfo) -> Self {
        let host_doc = host.to_document();
        Self { host, host_doc }
    }

    /// 문서에 붙는 호스트 정보
    pub fn host(&self) -> &HostInfo {
        &self.host
    }

    /// 이벤트를 문서로 변환합니다.
    pub fn build(&self, event: &LogEvent) -> Document {
        let mut doc = Document::new();

        doc.insert(keys::TIMESTAMP, event.timestamp);
        doc.put_text(keys::LEVEL, Some(event.level.as_str()));
        doc.put_text(keys::THREAD, Some(event.thread.as_str()));
        doc.put_text(keys::MESSAGE, Some(event.message.as_str()));
        doc.put_opt(keys::LOGGER_NAME, class_name_document(&event.logger));
        doc.insert(keys::LOGGER, event.logger.as_str());

        add_properties(&mut doc, event);

        if let Some(location) = &event.location {
            add_location(&mut doc, location);
        }

        if let Some(info) = &event.throwable {
            let fields = throwable::decompose(info);
            if !fields.throwables.is_empty() {
                doc.insert(keys::THROWABLES, fields.throwables);
            }
            doc.insert(keys::STACKTRACES, fields.stacktraces);
        }

        if !self.host_doc.is_empty() {
            doc.insert(keys::HOST, self.host_doc.clone());
        }

        doc
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 속성 키의 `.`은 `_`로 바꿉니다. 저장소 필드 이름에 `.`을 쓸 수 없습니다.
fn add_properties(doc: &mut Document, event: &LogEvent) {
    let mut props = Document::new();
    for (key, value) in &event.properties {
        props.put_text(&key.replace('.', "_"), Some(value.as_str()));
    }
    if !props.is_empty() {
        doc.insert(keys::PROPERTIES, props);
    }
}

/// 최상위 위치 필드: `class`는 분해 문서, `className`은 원문입니다.
fn add_location(doc: &mut Document, location: &LocationInfo) {
    doc.put_text(keys::FILE_NAME, location.file_name.as_deref());
    doc.put_text(keys::METHOD, location.method_name.as_deref());
    doc.put_opt(keys::LINE_NUMBER, location.line_number);
    doc.put_opt(keys::CLASS, class_name_document(&location.class_name));
    doc.insert(keys::CLASS_NAME, location.class_name.as_str());
}
