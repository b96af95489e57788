//! 파서 에러 타입
//!
//! [`ParserError`]는 텍스트 로그 재구성과 문서 변환 중에 발생하는 모든 에러를 표현합니다.
//! `From<ParserError> for RelogError` 변환이 구현되어 있어
//! 상위 레이어에서 `?` 연산자로 자연스럽게 전파할 수 있습니다.

use relog_core::error::{ConfigError, FormatError, RelogError, StreamError};

/// 파서 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    /// 헤더는 매칭되었지만 필수 캡처가 비어 있음
    #[error("line {line}: header matched but capture '{name}' is missing")]
    MissingCapture {
        /// 캡처 그룹 이름
        name: &'static str,
        /// 헤더 라인 번호 (1부터)
        line: u64,
    },

    /// 헤더 필드 해석 실패 (타임스탬프 등)
    #[error("line {line}: invalid {field} '{value}': {reason}")]
    Format {
        /// 필드 이름
        field: &'static str,
        /// 원본 값
        value: String,
        /// 헤더 라인 번호
        line: u64,
        /// 실패 사유
        reason: String,
    },

    /// 알 수 없는 레벨 토큰
    #[error("line {line}: unknown level token '{token}'")]
    UnknownLevel {
        /// 원본 토큰
        token: String,
        /// 헤더 라인 번호
        line: u64,
    },

    /// 입력 스트림 읽기 실패
    #[error("read failed after line {line}: {source}")]
    Stream {
        /// 마지막으로 읽은 라인 번호
        line: u64,
        /// 원인 I/O 에러
        #[source]
        source: std::io::Error,
    },

    /// 헤더 패턴 구성 에러 (캡처 그룹 누락 등)
    #[error("header pattern error: {reason}")]
    Pattern {
        /// 에러 사유
        reason: String,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// 정규식 컴파일 에러
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl ParserError {
    /// 해당 이벤트만 건너뛰고 계속 진행할 수 있는지 여부
    ///
    /// 형식 에러는 이벤트 하나만 실패시키며, 리더 커서는 이미 다음 이벤트로 넘어가 있습니다.
    /// 스트림/설정 에러는 치명적입니다.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::MissingCapture { .. } | Self::Format { .. } | Self::UnknownLevel { .. }
        )
    }
}

impl From<ParserError> for RelogError {
    fn from(err: ParserError) -> Self {
        match err {
            ParserError::MissingCapture { name, line } => FormatError::MissingCapture {
                name: name.to_owned(),
                line,
            }
            .into(),
            ParserError::Format {
                field,
                value,
                line,
                reason,
            } => FormatError::InvalidField {
                field: field.to_owned(),
                value,
                line,
                reason,
            }
            .into(),
            ParserError::UnknownLevel { token, line } => {
                FormatError::UnknownLevel { token, line }.into()
            }
            ParserError::Stream { line, source } => StreamError::Read { line, source }.into(),
            ParserError::Pattern { reason } => ConfigError::InvalidValue {
                field: "parser.header_pattern".to_owned(),
                reason,
            }
            .into(),
            ParserError::Config { field, reason } => {
                ConfigError::InvalidValue { field, reason }.into()
            }
            ParserError::Regex(e) => ConfigError::InvalidValue {
                field: "parser.header_pattern".to_owned(),
                reason: e.to_string(),
            }
            .into(),
        }
    }
}
