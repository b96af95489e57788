//! 헤더 파서 -- 원시 이벤트의 헤더 캡처를 타입 값으로 해석
//!
//! 날짜 문자열은 고정 형식과 고정 UTC 오프셋으로 해석하고, 레벨 토큰은
//! 6개 값 중 하나로 매핑합니다. 알 수 없는 레벨은 기본값으로 대체하지 않고
//! [`ParserError::UnknownLevel`]을 반환합니다.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};
use relog_core::config::{DEFAULT_DATETIME_FORMAT, DEFAULT_UTC_OFFSET};
use relog_core::types::{Level, LogEvent, ThrowableInfo};

use super::assembler::RawEvent;
use crate::error::ParserError;

/// 헤더 파서
#[derive(Debug, Clone)]
pub struct EventHeaderParser {
    datetime_format: String,
    offset: FixedOffset,
}

impl EventHeaderParser {
    /// 날짜 형식과 오프셋으로 파서를 생성합니다.
    pub fn new(datetime_format: impl Into<String>, offset: FixedOffset) -> Self {
        Self {
            datetime_format: datetime_format.into(),
            offset,
        }
    }

    /// 날짜 형식
    pub fn datetime_format(&self) -> &str {
        &self.datetime_format
    }

    /// 적용되는 UTC 오프셋
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// 원시 이벤트를 [`LogEvent`]로 변환합니다.
    ///
    /// 예외 체인 라인은 렌더링된 텍스트로만 보존되며, 구조화된 예외 체인은
    /// 만들지 않습니다.
    pub fn parse(&self, raw: RawEvent) -> Result<LogEvent, ParserError> {
        let timestamp = self.parse_datetime(&raw.header.datetime, raw.line)?;
        let level = parse_level(&raw.header.level, raw.line)?;

        let mut event = LogEvent::new(timestamp, level, raw.header.logger, raw.message);
        event.thread = raw.header.thread;
        if !raw.cause_chain.is_empty() {
            event.throwable = Some(ThrowableInfo::from_rendered(raw.cause_chain));
        }

        Ok(event)
    }

    /// 날짜 문자열을 UTC 시각으로 해석합니다.
    pub fn parse_datetime(&self, value: &str, line: u64) -> Result<DateTime<Utc>, ParserError> {
        let naive = NaiveDateTime::parse_from_str(value.trim(), &self.datetime_format).map_err(
            |e| ParserError::Format {
                field: "datetime",
                value: value.to_owned(),
                line,
                reason: e.to_string(),
            },
        )?;

        let local = self
            .offset
            .from_local_datetime(&naive)
            .single()
            .ok_or_else(|| ParserError::Format {
                field: "datetime",
                value: value.to_owned(),
                line,
                reason: format!("not representable at offset {}", self.offset),
            })?;

        Ok(local.with_timezone(&Utc))
    }
}

impl Default for EventHeaderParser {
    fn default() -> Self {
        // 상수 오프셋은 항상 해석됨
        let offset = DEFAULT_UTC_OFFSET
            .parse::<FixedOffset>()
            .unwrap_or_else(|_| Utc.fix());
        Self::new(DEFAULT_DATETIME_FORMAT, offset)
    }
}

/// 레벨 토큰을 해석합니다. 알 수 없는 토큰은 에러입니다.
pub fn parse_level(token: &str, line: u64) -> Result<Level, ParserError> {
    Level::from_token(token).ok_or_else(|| ParserError::UnknownLevel {
        token: token.to_owned(),
        line,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::assembler::HeaderCaptures;
    use chrono::Timelike;

    fn raw(datetime: &str, level: &str) -> RawEvent {
        RawEvent {
            header: HeaderCaptures {
                relative_time: "123".to_owned(),
                thread: "main".to_owned(),
                datetime: datetime.to_owned(),
                level: level.to_owned(),
                logger: "com.example.Foo".to_owned(),
            },
            message: "boom".to_owned(),
            cause_chain: Vec::new(),
            line: 7,
        }
    }

    #[test]
    fn parses_header_with_default_offset() {
        let parser = EventHeaderParser::default();
        let event = parser.parse(raw("22 Oct 2009 16:46:29,123", "ERROR")).unwrap();
        let expected = Utc.with_ymd_and_hms(2009, 10, 22, 19, 46, 29).unwrap()
            + chrono::Duration::milliseconds(123);
        assert_eq!(event.timestamp, expected);
        assert_eq!(event.level, Level::Error);
        assert_eq!(event.thread, "main");
        assert_eq!(event.logger, "com.example.Foo");
        assert_eq!(event.message, "boom");
        assert!(event.throwable.is_none());
        assert!(event.location.is_none());
        assert!(event.properties.is_empty());
    }

    #[test]
    fn custom_offset_is_applied() {
        let parser = EventHeaderParser::new(
            DEFAULT_DATETIME_FORMAT,
            FixedOffset::east_opt(9 * 3600).unwrap(),
        );
        let ts = parser.parse_datetime("01 Jan 2015 09:00:00,000", 1).unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2015, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn millis_are_preserved() {
        let parser = EventHeaderParser::default();
        let ts = parser.parse_datetime("22 Oct 2009 16:46:29,007", 1).unwrap();
        assert_eq!(ts.nanosecond(), 7_000_000);
    }

    #[test]
    fn padded_level_is_accepted() {
        let parser = EventHeaderParser::default();
        let event = parser.parse(raw("22 Oct 2009 16:46:29,123", "INFO ")).unwrap();
        assert_eq!(event.level, Level::Info);
    }

    #[test]
    fn unknown_level_is_error() {
        let parser = EventHeaderParser::default();
        let err = parser
            .parse(raw("22 Oct 2009 16:46:29,123", "NOTICE"))
            .unwrap_err();
        assert!(matches!(
            err,
            ParserError::UnknownLevel { ref token, line: 7 } if token == "NOTICE"
        ));
    }

    #[test]
    fn bad_datetime_is_format_error() {
        let parser = EventHeaderParser::default();
        let err = parser
            .parse(raw("32 Oct 2009 16:46:29,123", "INFO"))
            .unwrap_err();
        assert!(matches!(
            err,
            ParserError::Format {
                field: "datetime",
                line: 7,
                ..
            }
        ));
        assert!(err.is_recoverable());
    }

    #[test]
    fn cause_chain_becomes_rendered_throwable() {
        let parser = EventHeaderParser::default();
        let mut r = raw("22 Oct 2009 16:46:29,123", "ERROR");
        r.cause_chain = vec![
            "java.lang.Error: e".to_owned(),
            "\tat a.B.c(B.java:1)".to_owned(),
        ];
        let event = parser.parse(r).unwrap();
        let throwable = event.throwable.unwrap();
        assert!(throwable.chain.is_empty());
        assert_eq!(throwable.rendered.len(), 2);
    }
}
