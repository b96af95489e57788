//! 라인 분류기
//!
//! 입력 라인 하나를 [`LineKind`] 세 가지 중 하나로 분류합니다.
//!
//! # 분류 우선순위
//! 1. 헤더 패턴 매칭 → [`LineKind::EventStart`]
//! 2. 스택트레이스 패턴 매칭 → [`LineKind::StacktraceContinuation`]
//! 3. 그 외 → [`LineKind::Other`]
//!
//! 두 패턴에 모두 매칭되는 라인은 항상 `EventStart`입니다.

use regex::{Captures, Regex};

use crate::error::ParserError;

/// 헤더 패턴이 반드시 가져야 하는 이름 있는 캡처 그룹
pub const CAPTURE_NAMES: [&str; 6] = [
    "relative_time",
    "thread",
    "datetime",
    "level",
    "logger",
    "message",
];

/// 스택트레이스 연속 라인 패턴
///
/// `점으로 구분된 식별자: `, `Caused by:`, 또는 탭 문자로 시작하는 라인입니다.
pub const STACKTRACE_PATTERN: &str = r"^(?:[A-Za-z0-9.]+: |Caused by:|\t)";

/// 라인 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// 새 이벤트의 헤더 라인
    EventStart,
    /// 예외 체인 / 스택트레이스 라인
    StacktraceContinuation,
    /// 일반 메시지 라인
    Other,
}

/// 라인 분류기
///
/// 두 정규식은 생성 시 한 번만 컴파일됩니다.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    header: Regex,
    stacktrace: Regex,
}

impl LineClassifier {
    /// 헤더 패턴으로 분류기를 생성합니다.
    ///
    /// 패턴이 [`CAPTURE_NAMES`]의 캡처 그룹을 모두 가지고 있지 않으면 에러를 반환합니다.
    pub fn new(header_pattern: &str) -> Result<Self, ParserError> {
        let header = Regex::new(header_pattern)?;

        let names: Vec<&str> = header.capture_names().flatten().collect();
        let missing: Vec<&str> = CAPTURE_NAMES
            .iter()
            .copied()
            .filter(|required| !names.contains(required))
            .collect();
        if !missing.is_empty() {
            return Err(ParserError::Pattern {
                reason: format!("missing named capture(s): {}", missing.join(", ")),
            });
        }

        let stacktrace = Regex::new(STACKTRACE_PATTERN)?;

        Ok(Self { header, stacktrace })
    }

    /// 라인을 분류합니다. 먼저 매칭된 규칙이 이깁니다.
    pub fn classify(&self, line: &str) -> LineKind {
        if self.header.is_match(line) {
            LineKind::EventStart
        } else if self.stacktrace.is_match(line) {
            LineKind::StacktraceContinuation
        } else {
            LineKind::Other
        }
    }

    /// 헤더 라인의 캡처를 반환합니다. 헤더가 아니면 `None`입니다.
    pub fn header_captures<'l>(&self, line: &'l str) -> Option<Captures<'l>> {
        self.header.captures(line)
    }

    /// 헤더 패턴 원문
    pub fn header_pattern(&self) -> &str {
        self.header.as_str()
    }
}
