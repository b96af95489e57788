//! 설정 관리 -- relog.toml 파싱 및 런타임 설정
//!
//! [`RelogConfig`]는 모든 구성 요소의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`RELOG_PARSER_UTC_OFFSET=+09:00` 형식)
//! 3. 설정 파일 (`relog.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # fn example() -> Result<(), relog_core::error::RelogError> {
//! use relog_core::config::RelogConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = RelogConfig::load("relog.toml")?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = RelogConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, RelogError};

/// 기본 헤더 패턴
///
/// 레이아웃 `%r [%t] (%d{dd MMM yyyy HH:mm:ss,SSS}) %-5p %c - %m%n`에 대응하며,
/// 6개의 이름 있는 캡처 그룹을 가집니다.
pub const DEFAULT_HEADER_PATTERN: &str = r"^(?P<relative_time>\w+)\s+\[(?P<thread>.*?)\]\s+\((?P<datetime>.*?)\)\s+(?P<level>\w+)\s+(?P<logger>[A-Za-z0-9.]+)\s+-\s*(?P<message>.*)$";

/// 기본 날짜 형식 (`dd MMM yyyy HH:mm:ss,SSS`)
pub const DEFAULT_DATETIME_FORMAT: &str = "%d %b %Y %H:%M:%S,%3f";

/// 기본 UTC 오프셋 (로그가 기록된 고정 시간대)
pub const DEFAULT_UTC_OFFSET: &str = "-03:00";

/// relog 통합 설정
///
/// `relog.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelogConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 파서 설정
    #[serde(default)]
    pub parser: ParserSection,
    /// 싱크 설정
    #[serde(default)]
    pub sink: SinkConfig,
}

impl RelogConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RelogError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RelogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RelogError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                RelogError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, RelogError> {
        toml::from_str(toml_str).map_err(|e| {
            RelogError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `RELOG_{SECTION}_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "RELOG_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "RELOG_GENERAL_LOG_FORMAT");

        // Parser
        override_string(
            &mut self.parser.header_pattern,
            "RELOG_PARSER_HEADER_PATTERN",
        );
        override_string(
            &mut self.parser.datetime_format,
            "RELOG_PARSER_DATETIME_FORMAT",
        );
        override_string(&mut self.parser.utc_offset, "RELOG_PARSER_UTC_OFFSET");
        override_bool(
            &mut self.parser.skip_malformed,
            "RELOG_PARSER_SKIP_MALFORMED",
        );

        // Sink
        override_string(&mut self.sink.kind, "RELOG_SINK_KIND");
        override_opt_string(&mut self.sink.path, "RELOG_SINK_PATH");
        override_opt_string(&mut self.sink.tag, "RELOG_SINK_TAG");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), RelogError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        // log_format 검증
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        if self.parser.header_pattern.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "parser.header_pattern".to_owned(),
                reason: "must not be empty".to_owned(),
            }
            .into());
        }

        if self.parser.datetime_format.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "parser.datetime_format".to_owned(),
                reason: "must not be empty".to_owned(),
            }
            .into());
        }

        self.parser.offset()?;

        // sink 검증
        let valid_sinks = ["stdout", "file"];
        if !valid_sinks.contains(&self.sink.kind.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "sink.kind".to_owned(),
                reason: format!("must be one of: {}", valid_sinks.join(", ")),
            }
            .into());
        }

        if self.sink.kind == "file"
            && self.sink.path.as_deref().is_none_or(|p| p.trim().is_empty())
        {
            return Err(ConfigError::InvalidValue {
                field: "sink.path".to_owned(),
                reason: "path is required when sink kind is 'file'".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 파서 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserSection {
    /// 헤더 라인 정규식 (이름 있는 캡처 6개 필요)
    pub header_pattern: String,
    /// 헤더의 날짜 문자열 형식 (chrono strftime)
    pub datetime_format: String,
    /// 헤더 날짜에 적용할 고정 UTC 오프셋 (`+09:00` 형식)
    pub utc_offset: String,
    /// 형식 에러가 난 이벤트를 건너뛸지 여부 (false면 중단)
    pub skip_malformed: bool,
}

impl Default for ParserSection {
    fn default() -> Self {
        Self {
            header_pattern: DEFAULT_HEADER_PATTERN.to_owned(),
            datetime_format: DEFAULT_DATETIME_FORMAT.to_owned(),
            utc_offset: DEFAULT_UTC_OFFSET.to_owned(),
            skip_malformed: true,
        }
    }
}

impl ParserSection {
    /// `utc_offset`을 고정 오프셋으로 해석합니다.
    pub fn offset(&self) -> Result<FixedOffset, RelogError> {
        self.utc_offset.trim().parse::<FixedOffset>().map_err(|e| {
            ConfigError::InvalidValue {
                field: "parser.utc_offset".to_owned(),
                reason: format!("'{}' is not a UTC offset like +09:00: {}", self.utc_offset, e),
            }
            .into()
        })
    }
}

/// 싱크 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    /// 싱크 종류 (stdout, file)
    pub kind: String,
    /// 출력 파일 경로 (kind = "file"일 때 필수)
    pub path: Option<String>,
    /// 모든 문서에 붙일 태그
    pub tag: Option<String>,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            kind: "stdout".to_owned(),
            path: None,
            tag: None,
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_opt_string(target: &mut Option<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = if val.trim().is_empty() { None } else { Some(val) };
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}
