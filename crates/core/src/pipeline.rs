//! 파이프라인 trait -- 외부 협력자 경계 정의
//!
//! 파싱 코어는 소스에서 이벤트를 받고, 문서를 싱크에 넘깁니다.
//! 배치, 재시도, 연결 관리는 모두 이 trait 구현체의 몫입니다.

use crate::document::Document;
use crate::error::{RelogError, SinkError};
use crate::types::LogEvent;

/// 이벤트 소스 trait
///
/// 호출마다 완전히 해석된 이벤트 하나를 반환합니다.
/// 스트림이 끝나면 `Ok(None)`을 반환합니다.
pub trait EventSource {
    /// 다음 이벤트를 읽습니다.
    fn next_event(&mut self) -> Result<Option<LogEvent>, RelogError>;
}

/// 문서 싱크 trait
///
/// 문서를 한 번에 하나씩 받습니다. 실패는 `Err`로 보고되며
/// 호출자는 이를 [`SinkErrorHandler`]로 넘기고 다음 문서를 계속 처리합니다.
pub trait DocumentSink {
    /// 싱크 이름
    fn name(&self) -> &str;

    /// 문서 하나를 저장합니다.
    fn insert(&mut self, doc: &Document) -> Result<(), SinkError>;

    /// 버퍼된 문서를 내보냅니다.
    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// 싱크 실패 보고 콜백
pub trait SinkErrorHandler {
    /// 저장에 실패한 문서와 에러를 보고받습니다.
    fn on_error(&self, err: &SinkError, doc: &Document);
}

impl<T: EventSource + ?Sized> EventSource for Box<T> {
    fn next_event(&mut self) -> Result<Option<LogEvent>, RelogError> {
        (**self).next_event()
    }
}

impl<T: DocumentSink + ?Sized> DocumentSink for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn insert(&mut self, doc: &Document) -> Result<(), SinkError> {
        (**self).insert(doc)
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        (**self).flush()
    }
}
