#![doc = include_str!("../README.md")]
//!
//! # 모듈 구성
//!
//! - [`parser`]: 라인 분류, 이벤트 경계 리더, 이벤트 어셈블러, 헤더 파서
//! - [`document`]: 이벤트 → 문서 변환 (클래스 이름/예외 체인 분해, 호스트 메타데이터)
//! - [`source`]: 텍스트 입력 기반 [`EventSource`](relog_core::pipeline::EventSource) 구현
//! - [`sink`]: JSON Lines / 메모리 싱크, 로깅 에러 핸들러
//! - [`backfill`]: 소스 → 빌더 → 싱크 드라이버
//! - [`config`]: 파서 설정 (core 설정 확장)
//! - [`error`]: 도메인 에러 타입
//!
//! # 아키텍처
//!
//! ```text
//! text lines -> EventBoundaryReader -> EventAssembler -> EventHeaderParser -> DocumentBuilder -> sink
//!                     |                     |                   |                   |
//!               1-line pushback      LineClassifier       datetime/level      class/throwable/host
//! ```

pub mod backfill;
pub mod config;
pub mod document;
pub mod error;
pub mod parser;
pub mod sink;
pub mod source;

// --- 주요 타입 re-export ---

// 재구성
pub use parser::{
    EventAssembler, EventBoundaryReader, EventHeaderParser, HeaderCaptures, LineClassifier,
    LineKind, RawEvent,
};

// 문서 변환
pub use document::{DocumentBuilder, HostInfo};

// 소스 / 싱크 / 드라이버
pub use backfill::{Backfill, BackfillSummary};
pub use sink::{JsonLinesSink, LoggingErrorHandler, MemorySink};
pub use source::TextEventSource;

// 설정
pub use config::{ParserConfig, ParserConfigBuilder};

// 에러
pub use error::ParserError;
