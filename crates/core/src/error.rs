//! 에러 타입 -- 도메인별 에러 정의

/// relog 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum RelogError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 이벤트 하나의 형식 에러 (해당 이벤트만 실패)
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// 입력 스트림 에러 (치명적)
    #[error("stream error: {0}")]
    Stream(#[from] StreamError),

    /// 싱크 저장 에러
    #[error("sink error: {0}")]
    Sink(#[from] SinkError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl RelogError {
    /// 호출자가 해당 이벤트만 건너뛰고 계속 진행할 수 있는 에러인지 여부
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Format(_))
    }
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 헤더 라인의 형태는 맞았지만 타입 필드 해석에 실패한 경우
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// 필수 캡처 그룹이 비어 있음
    #[error("line {line}: missing capture '{name}'")]
    MissingCapture { name: String, line: u64 },

    /// 타임스탬프 등 필드 해석 실패
    #[error("line {line}: invalid {field} '{value}': {reason}")]
    InvalidField {
        field: String,
        value: String,
        line: u64,
        reason: String,
    },

    /// 알 수 없는 레벨 토큰
    #[error("line {line}: unknown level token '{token}'")]
    UnknownLevel { token: String, line: u64 },
}

/// 입력 스트림 에러
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// 읽기 실패
    #[error("read failed after line {line}: {source}")]
    Read {
        line: u64,
        #[source]
        source: std::io::Error,
    },
}

/// 싱크 저장 에러
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// 문서 쓰기 실패
    #[error("{sink}: write failed: {reason}")]
    WriteFailed { sink: String, reason: String },

    /// 문서 직렬화 실패
    #[error("{sink}: serialization failed: {reason}")]
    Serialize { sink: String, reason: String },
}
