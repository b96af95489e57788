//! 텍스트 이벤트 소스
//!
//! [`TextEventSource`]는 어셈블러와 헤더 파서를 묶어 텍스트 입력에서
//! 완전히 해석된 [`LogEvent`]를 하나씩 꺼내는 [`EventSource`] 구현입니다.

use std::io::BufRead;

use relog_core::error::RelogError;
use relog_core::pipeline::EventSource;
use relog_core::types::LogEvent;

use crate::config::ParserConfig;
use crate::error::ParserError;
use crate::parser::{EventAssembler, EventBoundaryReader, EventHeaderParser, RawEvent};

/// 텍스트 입력 기반 이벤트 소스
pub struct TextEventSource<R> {
    reader: EventBoundaryReader<R>,
    assembler: EventAssembler,
    header_parser: EventHeaderParser,
}

impl<R: BufRead> TextEventSource<R> {
    /// 설정으로 소스를 생성합니다.
    pub fn new(input: R, config: &ParserConfig) -> Result<Self, ParserError> {
        Ok(Self::from_parts(
            input,
            config.assembler()?,
            config.header_parser()?,
        ))
    }

    /// 구성 요소를 직접 지정해 소스를 생성합니다.
    pub fn from_parts(
        input: R,
        assembler: EventAssembler,
        header_parser: EventHeaderParser,
    ) -> Self {
        Self {
            reader: EventBoundaryReader::new(input),
            assembler,
            header_parser,
        }
    }

    /// 헤더를 해석하기 전의 원시 이벤트를 꺼냅니다.
    pub fn next_raw(&mut self) -> Result<Option<RawEvent>, ParserError> {
        self.assembler.next_event(&mut self.reader)
    }

    /// 다음 이벤트를 꺼냅니다. 에러 타입은 파서 도메인 에러입니다.
    pub fn next_parsed(&mut self) -> Result<Option<LogEvent>, ParserError> {
        match self.next_raw()? {
            Some(raw) => self.header_parser.parse(raw).map(Some),
            None => Ok(None),
        }
    }

    /// 지금까지 읽은 라인 수
    pub fn lines_read(&self) -> u64 {
        self.reader.line_number()
    }
}

impl<R: BufRead> EventSource for TextEventSource<R> {
    fn next_event(&mut self) -> Result<Option<LogEvent>, RelogError> {
        Ok(self.next_parsed()?)
    }
}
