//! 파서 설정
//!
//! [`ParserConfig`]는 core의 [`ParserSection`](relog_core::config::ParserSection)을
//! 기반으로 파서 구성 요소(분류기, 헤더 파서)를 만들 때 필요한 값을 제공합니다.
//!
//! # 사용 예시
//! ```
//! use relog_core::config::RelogConfig;
//! use relog_parser::config::ParserConfig;
//!
//! let core_config = RelogConfig::default();
//! let config = ParserConfig::from_core(&core_config.parser);
//! config.validate().unwrap();
//! ```

use chrono::FixedOffset;
use chrono::format::{Item, StrftimeItems};
use relog_core::config::{
    DEFAULT_DATETIME_FORMAT, DEFAULT_HEADER_PATTERN, DEFAULT_UTC_OFFSET, ParserSection,
};
use serde::{Deserialize, Serialize};

use crate::error::ParserError;
use crate::parser::{EventAssembler, EventHeaderParser, LineClassifier};

/// 파서 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// 헤더 라인 정규식
    pub header_pattern: String,
    /// 헤더 날짜 형식 (chrono strftime)
    pub datetime_format: String,
    /// 고정 UTC 오프셋 (`+09:00` 형식)
    pub utc_offset: String,
    /// 형식 에러 이벤트를 건너뛸지 여부
    pub skip_malformed: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            header_pattern: DEFAULT_HEADER_PATTERN.to_owned(),
            datetime_format: DEFAULT_DATETIME_FORMAT.to_owned(),
            utc_offset: DEFAULT_UTC_OFFSET.to_owned(),
            skip_malformed: true,
        }
    }
}

impl ParserConfig {
    /// core의 `ParserSection`에서 파서 설정을 생성합니다.
    pub fn from_core(core: &ParserSection) -> Self {
        Self {
            header_pattern: core.header_pattern.clone(),
            datetime_format: core.datetime_format.clone(),
            utc_offset: core.utc_offset.clone(),
            skip_malformed: core.skip_malformed,
        }
    }

    /// 오프셋 문자열을 해석합니다.
    pub fn offset(&self) -> Result<FixedOffset, ParserError> {
        self.utc_offset
            .trim()
            .parse::<FixedOffset>()
            .map_err(|e| ParserError::Config {
                field: "utc_offset".to_owned(),
                reason: format!("'{}' is not a UTC offset like +09:00: {}", self.utc_offset, e),
            })
    }

    /// 헤더 패턴으로 분류기를 만듭니다.
    pub fn classifier(&self) -> Result<LineClassifier, ParserError> {
        LineClassifier::new(&self.header_pattern)
    }

    /// 어셈블러를 만듭니다.
    pub fn assembler(&self) -> Result<EventAssembler, ParserError> {
        Ok(EventAssembler::new(self.classifier()?))
    }

    /// 헤더 파서를 만듭니다.
    pub fn header_parser(&self) -> Result<EventHeaderParser, ParserError> {
        Ok(EventHeaderParser::new(
            self.datetime_format.clone(),
            self.offset()?,
        ))
    }

    /// 설정값의 유효성을 검증합니다.
    ///
    /// 헤더 패턴은 실제로 컴파일하고 캡처 그룹을 확인합니다.
    pub fn validate(&self) -> Result<(), ParserError> {
        self.classifier()?;
        self.offset()?;

        if self.datetime_format.trim().is_empty() {
            return Err(ParserError::Config {
                field: "datetime_format".to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }

        if StrftimeItems::new(&self.datetime_format).any(|item| matches!(item, Item::Error)) {
            return Err(ParserError::Config {
                field: "datetime_format".to_owned(),
                reason: format!("'{}' is not a valid strftime format", self.datetime_format),
            });
        }

        Ok(())
    }
}

/// 파서 설정 빌더
#[derive(Default)]
pub struct ParserConfigBuilder {
    config: ParserConfig,
}

impl ParserConfigBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 헤더 패턴을 설정합니다.
    pub fn header_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.header_pattern = pattern.into();
        self
    }

    /// 날짜 형식을 설정합니다.
    pub fn datetime_format(mut self, format: impl Into<String>) -> Self {
        self.config.datetime_format = format.into();
        self
    }

    /// UTC 오프셋을 설정합니다.
    pub fn utc_offset(mut self, offset: impl Into<String>) -> Self {
        self.config.utc_offset = offset.into();
        self
    }

    /// 형식 에러 건너뛰기 여부를 설정합니다.
    pub fn skip_malformed(mut self, skip: bool) -> Self {
        self.config.skip_malformed = skip;
        self
    }

    /// 설정을 검증하고 `ParserConfig`를 생성합니다.
    pub fn build(self) -> Result<ParserConfig, ParserError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        ParserConfig::default().validate().unwrap();
    }

    #[test]
    fn from_core_copies_section() {
        let section = ParserSection {
            utc_offset: "+09:00".to_owned(),
            skip_malformed: false,
            ..ParserSection::default()
        };
        let config = ParserConfig::from_core(&section);
        assert_eq!(config.utc_offset, "+09:00");
        assert!(!config.skip_malformed);
        assert_eq!(config.header_pattern, DEFAULT_HEADER_PATTERN);
    }

    #[test]
    fn builder_creates_valid_config() {
        let config = ParserConfigBuilder::new()
            .utc_offset("+00:00")
            .skip_malformed(false)
            .build()
            .unwrap();
        assert_eq!(config.offset().unwrap(), FixedOffset::east_opt(0).unwrap());
        assert!(!config.skip_malformed);
    }

    #[test]
    fn builder_rejects_bad_offset() {
        let err = ParserConfigBuilder::new()
            .utc_offset("GMT+3")
            .build()
            .unwrap_err();
        assert!(matches!(err, ParserError::Config { ref field, .. } if field == "utc_offset"));
    }

    #[test]
    fn builder_rejects_pattern_missing_captures() {
        let err = ParserConfigBuilder::new()
            .header_pattern(r"^(?P<message>.*)$")
            .build()
            .unwrap_err();
        assert!(matches!(err, ParserError::Pattern { .. }));
    }

    #[test]
    fn builder_rejects_empty_datetime_format() {
        let err = ParserConfigBuilder::new()
            .datetime_format("  ")
            .build()
            .unwrap_err();
        assert!(matches!(err, ParserError::Config { ref field, .. } if field == "datetime_format"));
    }

    #[test]
    fn builder_rejects_invalid_strftime() {
        let err = ParserConfigBuilder::new()
            .datetime_format("%Q %d")
            .build()
            .unwrap_err();
        assert!(matches!(err, ParserError::Config { .. }));
    }

    #[test]
    fn header_parser_uses_offset() {
        let config = ParserConfigBuilder::new()
            .utc_offset("+09:00")
            .build()
            .unwrap();
        let parser = config.header_parser().unwrap();
        assert_eq!(parser.offset(), FixedOffset::east_opt(9 * 3600).unwrap());
    }
}
