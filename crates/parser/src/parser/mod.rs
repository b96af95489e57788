//! 텍스트 로그 재구성 모듈
//!
//! 고정 레이아웃으로 기록된 텍스트 로그에서 이벤트 경계를 찾고, 여러 줄에 걸친
//! 메시지와 예외 스택트레이스를 구분해 원시 이벤트로 묶습니다.
//!
//! # 구성 요소
//! - [`LineClassifier`]: 라인 → {EventStart, StacktraceContinuation, Other}
//! - [`EventBoundaryReader`]: 한 줄 pushback 슬롯을 가진 라인 리더
//! - [`EventAssembler`]: 호출마다 [`RawEvent`] 하나를 만드는 상태 기계
//! - [`EventHeaderParser`]: 헤더 캡처 → 타입 값 ([`LogEvent`](relog_core::types::LogEvent))
//!
//! # 사용 예시
//! ```
//! use std::io::Cursor;
//! use relog_core::config::DEFAULT_HEADER_PATTERN;
//! use relog_parser::parser::{EventAssembler, EventBoundaryReader, EventHeaderParser};
//!
//! let input = "123 [main] (22 Oct 2009 16:46:29,123) ERROR com.example.Foo - boom\n";
//! let assembler = EventAssembler::from_pattern(DEFAULT_HEADER_PATTERN).unwrap();
//! let mut reader = EventBoundaryReader::new(Cursor::new(input));
//!
//! let raw = assembler.next_event(&mut reader).unwrap().unwrap();
//! let event = EventHeaderParser::default().parse(raw).unwrap();
//! assert_eq!(event.message, "boom");
//! ```

pub mod assembler;
pub mod classify;
pub mod header;
pub mod reader;

pub use assembler::{EventAssembler, HeaderCaptures, RawEvent};
pub use classify::{LineClassifier, LineKind};
pub use header::EventHeaderParser;
pub use reader::EventBoundaryReader;
