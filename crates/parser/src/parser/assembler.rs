//! 이벤트 어셈블러 -- 라인 스트림에서 원시 이벤트 하나를 재구성하는 상태 기계
//!
//! # 상태 전이
//!
//! ```text
//! SeekHeader --EVENT_START--> AfterHeader
//! AfterHeader --OTHER--> InMessage --STACKTRACE--> InCauseBlock
//! AfterHeader --STACKTRACE--> InCauseBlock
//! (any body state) --EVENT_START--> push back, emit
//! (any body state) --EOF--> emit
//! ```
//!
//! `InCauseBlock`에 들어간 뒤의 OTHER 라인은 메시지에 붙이지도, 새 블록을
//! 시작하지도 않고 버립니다.

use std::io::BufRead;

use regex::Captures;
use relog_core::metrics::{EVENTS_ASSEMBLED_TOTAL, LINES_DISCARDED_TOTAL, LINES_SKIPPED_TOTAL};

use super::classify::{LineClassifier, LineKind};
use super::reader::EventBoundaryReader;
use crate::error::ParserError;

/// 헤더 라인의 원시 캡처 값
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCaptures {
    /// 프로세스 시작 이후 경과 시간 토큰
    pub relative_time: String,
    /// 스레드 이름
    pub thread: String,
    /// 원시 날짜/시각 문자열
    pub datetime: String,
    /// 레벨 토큰 (패딩 포함 가능)
    pub level: String,
    /// 로거 경로
    pub logger: String,
}

/// 재구성된 원시 이벤트
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    /// 헤더 캡처
    pub header: HeaderCaptures,
    /// 헤더의 메시지 캡처 뒤에 이어 붙인 메시지 라인 (구분자 없음)
    pub message: String,
    /// 예외 체인 라인 (원래 순서)
    pub cause_chain: Vec<String>,
    /// 헤더 라인 번호 (1부터)
    pub line: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AfterHeader,
    InMessage,
    InCauseBlock,
}

/// 이벤트 어셈블러
///
/// 상태를 호출 사이에 보관하지 않습니다. 다음 이벤트의 헤더는 리더의
/// pushback 슬롯에 남겨 둡니다.
#[derive(Debug, Clone)]
pub struct EventAssembler {
    classifier: LineClassifier,
}

impl EventAssembler {
    /// 분류기로 어셈블러를 생성합니다.
    pub fn new(classifier: LineClassifier) -> Self {
        Self { classifier }
    }

    /// 헤더 패턴으로 어셈블러를 생성합니다.
    pub fn from_pattern(header_pattern: &str) -> Result<Self, ParserError> {
        Ok(Self::new(LineClassifier::new(header_pattern)?))
    }

    /// 내부 분류기
    pub fn classifier(&self) -> &LineClassifier {
        &self.classifier
    }

    /// 다음 이벤트를 재구성합니다.
    ///
    /// 입력이 끝나면 `Ok(None)`을 반환합니다. 헤더 캡처가 빠진 이벤트는
    /// 본문까지 모두 소비한 뒤 에러를 반환하므로, 호출자는 건너뛰고
    /// 다음 호출을 계속할 수 있습니다.
    pub fn next_event<R: BufRead>(
        &self,
        reader: &mut EventBoundaryReader<R>,
    ) -> Result<Option<RawEvent>, ParserError> {
        let Some(header_line) = self.seek_header(reader)? else {
            return Ok(None);
        };
        let line_no = reader.line_number();

        let header = self.extract_header(&header_line, line_no);

        let mut state = State::AfterHeader;
        let mut body = String::new();
        let mut cause_chain = Vec::new();

        while let Some(line) = reader.read_line()? {
            match self.classifier.classify(&line) {
                LineKind::EventStart => {
                    tracing::trace!(line = reader.line_number(), "next header reached");
                    reader.push_back();
                    break;
                }
                LineKind::StacktraceContinuation => {
                    if state != State::InCauseBlock {
                        tracing::trace!(line = reader.line_number(), "cause block started");
                        state = State::InCauseBlock;
                    }
                    cause_chain.push(line);
                }
                LineKind::Other if state == State::InCauseBlock => {
                    tracing::trace!(
                        line = reader.line_number(),
                        "discarding non-stacktrace line inside cause block"
                    );
                    metrics::counter!(LINES_DISCARDED_TOTAL).increment(1);
                }
                LineKind::Other => {
                    state = State::InMessage;
                    body.push_str(&line);
                }
            }
        }

        let (header, mut message) = header?;
        message.push_str(&body);

        metrics::counter!(EVENTS_ASSEMBLED_TOTAL).increment(1);
        tracing::debug!(
            line = line_no,
            causes = cause_chain.len(),
            "event assembled"
        );

        Ok(Some(RawEvent {
            header,
            message,
            cause_chain,
            line: line_no,
        }))
    }

    /// 헤더 라인이 나올 때까지 읽습니다. 그 전의 라인은 버립니다.
    fn seek_header<R: BufRead>(
        &self,
        reader: &mut EventBoundaryReader<R>,
    ) -> Result<Option<String>, ParserError> {
        while let Some(line) = reader.read_line()? {
            if self.classifier.classify(&line) == LineKind::EventStart {
                return Ok(Some(line));
            }
            tracing::trace!(line = reader.line_number(), "skipping line before header");
            metrics::counter!(LINES_SKIPPED_TOTAL).increment(1);
        }
        Ok(None)
    }

    fn extract_header(
        &self,
        line: &str,
        line_no: u64,
    ) -> Result<(HeaderCaptures, String), ParserError> {
        let caps = self
            .classifier
            .header_captures(line)
            .ok_or(ParserError::MissingCapture {
                name: "header",
                line: line_no,
            })?;

        let header = HeaderCaptures {
            relative_time: capture(&caps, "relative_time", line_no)?,
            thread: capture(&caps, "thread", line_no)?,
            datetime: capture(&caps, "datetime", line_no)?,
            level: capture(&caps, "level", line_no)?,
            logger: capture(&caps, "logger", line_no)?,
        };
        let message = caps
            .name("message")
            .map(|m| m.as_str().to_owned())
            .unwrap_or_default();

        Ok((header, message))
    }
}

fn capture(caps: &Captures<'_>, name: &'static str, line: u64) -> Result<String, ParserError> {
    caps.name(name)
        .map(|m| m.as_str().to_owned())
        .ok_or(ParserError::MissingCapture { name, line })
}
