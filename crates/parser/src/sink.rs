//! 참조 싱크 구현
//!
//! - [`JsonLinesSink`]: 문서 하나를 Extended JSON 한 줄로 기록
//! - [`MemorySink`]: 메모리에 문서를 모음 (테스트, 임베딩용)
//! - [`LoggingErrorHandler`]: 싱크 실패를 로그와 카운터로 보고
//!
//! 문서 저장소에 직접 쓰는 싱크는 이 크레이트 밖의 몫입니다.

use std::io::Write;

use relog_core::document::Document;
use relog_core::error::SinkError;
use relog_core::metrics::{LABEL_SINK, SINK_FAILURES_TOTAL};
use relog_core::pipeline::{DocumentSink, SinkErrorHandler};

use crate::document::keys;

/// JSON Lines 싱크
///
/// `tag`가 설정되면 모든 문서 끝에 `tag` 필드를 붙입니다.
pub struct JsonLinesSink<W> {
    name: String,
    writer: W,
    tag: Option<String>,
}

impl<W: Write> JsonLinesSink<W> {
    /// 새 싱크를 생성합니다.
    pub fn new(name: impl Into<String>, writer: W) -> Self {
        Self {
            name: name.into(),
            writer,
            tag: None,
        }
    }

    /// 태그를 설정합니다. 공백뿐인 태그는 무시합니다.
    pub fn with_tag(mut self, tag: Option<String>) -> Self {
        self.tag = tag.filter(|t| !t.trim().is_empty());
        self
    }

    /// 내부 writer를 돌려받습니다.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_failed(&self, reason: impl ToString) -> SinkError {
        SinkError::WriteFailed {
            sink: self.name.clone(),
            reason: reason.to_string(),
        }
    }
}

impl<W: Write> DocumentSink for JsonLinesSink<W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn insert(&mut self, doc: &Document) -> Result<(), SinkError> {
        let line = match &self.tag {
            Some(tag) => {
                let mut tagged = doc.clone();
                tagged.insert(keys::TAG, tag.as_str());
                tagged.to_json()
            }
            None => doc.to_json(),
        }
        .map_err(|e| SinkError::Serialize {
            sink: self.name.clone(),
            reason: e.to_string(),
        })?;

        let written = writeln!(self.writer, "{line}");
        written.map_err(|e| self.write_failed(e))
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush().map_err(|e| self.write_failed(e))
    }
}

/// 메모리 싱크
#[derive(Debug, Default)]
pub struct MemorySink {
    documents: Vec<Document>,
}

impl MemorySink {
    /// 빈 싱크를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 저장된 문서 목록
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// 저장된 문서를 꺼냅니다.
    pub fn into_documents(self) -> Vec<Document> {
        self.documents
    }
}

impl DocumentSink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    fn insert(&mut self, doc: &Document) -> Result<(), SinkError> {
        self.documents.push(doc.clone());
        Ok(())
    }
}

/// 싱크 실패를 `tracing::error!`로 기록하는 핸들러
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingErrorHandler;

impl SinkErrorHandler for LoggingErrorHandler {
    fn on_error(&self, err: &SinkError, doc: &Document) {
        let sink = match err {
            SinkError::WriteFailed { sink, .. } | SinkError::Serialize { sink, .. } => sink,
        };
        metrics::counter!(SINK_FAILURES_TOTAL, LABEL_SINK => sink.clone()).increment(1);
        tracing::error!(
            sink = %sink,
            error = %err,
            timestamp = ?doc.get(keys::TIMESTAMP),
            "failed to insert document"
        );
    }
}
