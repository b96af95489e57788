//! 이벤트 → 문서 변환 모듈
//!
//! [`DocumentBuilder`]는 [`LogEvent`](relog_core::types::LogEvent) 하나를
//! 문서 지향 저장소에 넣을 [`Document`](relog_core::document::Document)로 바꿉니다.
//!
//! # 필드 존재 규칙
//! 값이 없거나 공백뿐인 텍스트 필드는 생략합니다. 단, `timestamp`와
//! 원본 로거/클래스 이름 문자열(`logger`, `className`, 프레임의 `class`)은
//! 항상 넣습니다.
//!
//! # 하위 모듈
//! - [`class_name`]: 클래스 이름 분해 문서
//! - [`throwable`]: 예외 체인 분해와 한 문자열 표현
//! - [`host`]: 호스트/프로세스 메타데이터

pub mod builder;
pub mod class_name;
pub mod host;
pub mod throwable;

pub use builder::DocumentBuilder;
pub use host::HostInfo;

/// 문서 필드 이름
pub mod keys {
    /// 이벤트 시각
    pub const TIMESTAMP: &str = "timestamp";
    /// 레벨
    pub const LEVEL: &str = "level";
    /// 스레드 이름
    pub const THREAD: &str = "thread";
    /// 메시지 (예외 문서의 메시지에도 사용)
    pub const MESSAGE: &str = "message";
    /// 로거 이름 분해 문서
    pub const LOGGER_NAME: &str = "loggerName";
    /// 로거 이름 원문
    pub const LOGGER: &str = "logger";
    /// 소스 파일 이름
    pub const FILE_NAME: &str = "fileName";
    /// 메서드 이름
    pub const METHOD: &str = "method";
    /// 라인 번호
    pub const LINE_NUMBER: &str = "lineNumber";
    /// 클래스 필드
    pub const CLASS: &str = "class";
    /// 클래스 이름 필드 (분해 문서 안의 단순 이름에도 사용)
    pub const CLASS_NAME: &str = "className";
    /// 완전한 클래스 이름
    pub const FQCN: &str = "fullyQualifiedClassName";
    /// 경로 구성 요소 배열
    pub const PACKAGE: &str = "package";
    /// 구조화된 예외 체인
    pub const THROWABLES: &str = "throwables";
    /// 한 문자열로 펼친 예외 체인
    pub const STACKTRACES: &str = "stacktraces";
    /// 예외의 프레임 배열
    pub const STACK_TRACE: &str = "stackTrace";
    /// 호스트 메타데이터
    pub const HOST: &str = "host";
    /// 프로세스 식별 문자열
    pub const PROCESS: &str = "process";
    /// 호스트 이름
    pub const HOST_NAME: &str = "name";
    /// 호스트 IP
    pub const IP: &str = "ip";
    /// 보조 컨텍스트 속성
    pub const PROPERTIES: &str = "properties";
    /// 싱크가 붙이는 태그
    pub const TAG: &str = "tag";
}
