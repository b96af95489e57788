//! 메트릭 이름 상수
//!
//! 파서와 백필 드라이버가 `metrics::counter!()` 매크로에 넘기는 이름을
//! 한곳에서 정의합니다. 레코더가 설치되지 않으면 모두 no-op입니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `relog_`
//! - 접미어: `_total` (counter)
//!
//! # 사용 예시
//!
//! ```ignore
//! metrics::counter!(relog_core::metrics::EVENTS_ASSEMBLED_TOTAL).increment(1);
//! ```

/// 싱크 이름 레이블 키
pub const LABEL_SINK: &str = "sink";

/// 읽은 입력 라인 수 (counter)
pub const LINES_READ_TOTAL: &str = "relog_lines_read_total";

/// 예외 블록 안에서 버려진 라인 수 (counter)
pub const LINES_DISCARDED_TOTAL: &str = "relog_lines_discarded_total";

/// 첫 헤더 앞에서 건너뛴 라인 수 (counter)
pub const LINES_SKIPPED_TOTAL: &str = "relog_lines_skipped_total";

/// 재구성된 원시 이벤트 수 (counter)
pub const EVENTS_ASSEMBLED_TOTAL: &str = "relog_events_assembled_total";

/// 형식 에러로 실패한 이벤트 수 (counter)
pub const FORMAT_ERRORS_TOTAL: &str = "relog_format_errors_total";

/// 싱크에 저장된 문서 수 (counter, label: sink)
pub const DOCUMENTS_WRITTEN_TOTAL: &str = "relog_documents_written_total";

/// 싱크 저장 실패 수 (counter, label: sink)
pub const SINK_FAILURES_TOTAL: &str = "relog_sink_failures_total";
