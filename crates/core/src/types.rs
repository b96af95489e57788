//! 도메인 타입 -- 워크스페이스 전역에서 사용되는 로그 이벤트 타입
//!
//! 텍스트 파서가 만들어 내는 이벤트와 호스트 프로세스가 직접 넘겨주는
//! 인메모리 이벤트는 모두 [`LogEvent`] 하나로 표현됩니다.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 로그 심각도 레벨
///
/// 헤더 라인의 `%-5p` 토큰이 가질 수 있는 6개 값의 닫힌 집합입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    /// 치명적 오류
    Fatal,
    /// 오류
    Error,
    /// 경고
    Warn,
    /// 정보
    Info,
    /// 디버그
    Debug,
    /// 추적
    Trace,
}

impl Level {
    /// 레벨 토큰을 해석합니다.
    ///
    /// 폭 5로 채워진 패딩 공백은 제거하고, 대문자 토큰과 정확히 일치해야 합니다.
    /// 일치하는 값이 없으면 `None`을 반환하며, 기본값으로 대체하지 않습니다.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim() {
            "FATAL" => Some(Self::Fatal),
            "ERROR" => Some(Self::Error),
            "WARN" => Some(Self::Warn),
            "INFO" => Some(Self::Info),
            "DEBUG" => Some(Self::Debug),
            "TRACE" => Some(Self::Trace),
            _ => None,
        }
    }

    /// 대문자 토큰 문자열
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fatal => "FATAL",
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 클래스 이름 분해 결과
///
/// `package_components`는 `.`으로 나눈 모든 구성 요소이며,
/// 마지막 단순 클래스 이름까지 포함합니다 (`a.b.C` → `["a", "b", "C"]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassNameInfo {
    /// 완전한 이름
    pub fully_qualified_name: String,
    /// 경로 구성 요소 (단순 이름 포함)
    pub package_components: Vec<String>,
    /// 단순 클래스 이름 (마지막 구성 요소)
    pub simple_class_name: String,
}

impl ClassNameInfo {
    /// 클래스 이름을 분해합니다. 비어 있거나 공백뿐이면 `None`입니다.
    pub fn parse(name: &str) -> Option<Self> {
        if name.trim().is_empty() {
            return None;
        }

        let mut package_components: Vec<String> = name.split('.').map(str::to_owned).collect();
        // `a.b.` 같은 이름의 끝쪽 빈 조각은 버림
        while package_components.last().is_some_and(|c| c.is_empty()) {
            package_components.pop();
        }
        let simple_class_name = package_components.last().cloned().unwrap_or_default();

        Some(Self {
            fully_qualified_name: name.to_owned(),
            package_components,
            simple_class_name,
        })
    }
}

/// 스택 프레임 하나
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackFrame {
    /// 프레임의 클래스 이름 (완전한 이름)
    pub class_name: String,
    /// 메서드 이름
    pub method_name: Option<String>,
    /// 소스 파일 이름
    pub file_name: Option<String>,
    /// 라인 번호. 네이티브 메서드는 음수(-2 등)이며 그대로 보존됩니다.
    pub line_number: Option<i32>,
}

impl StackFrame {
    /// 클래스 이름만으로 프레임을 생성합니다.
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            method_name: None,
            file_name: None,
            line_number: None,
        }
    }

    /// 메서드 이름을 설정합니다.
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method_name = Some(method.into());
        self
    }

    /// 파일 이름과 라인 번호를 설정합니다.
    pub fn at(mut self, file: impl Into<String>, line: i32) -> Self {
        self.file_name = Some(file.into());
        self.line_number = Some(line);
        self
    }

    /// 라인 번호만 설정합니다.
    pub fn line(mut self, line: i32) -> Self {
        self.line_number = Some(line);
        self
    }
}

/// 예외 체인의 한 고리
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrowableRecord {
    /// 예외 클래스 이름
    pub class_name: String,
    /// 예외 메시지
    pub message: Option<String>,
    /// 바깥쪽부터 나열된 스택 프레임
    pub frames: Vec<StackFrame>,
}

impl ThrowableRecord {
    /// 새 예외 레코드를 생성합니다.
    pub fn new(class_name: impl Into<String>, message: Option<String>) -> Self {
        Self {
            class_name: class_name.into(),
            message,
            frames: Vec::new(),
        }
    }

    /// 프레임을 추가합니다.
    pub fn frame(mut self, frame: StackFrame) -> Self {
        self.frames.push(frame);
        self
    }
}

/// 이벤트에 첨부된 예외 정보
///
/// `chain`은 관찰된 예외부터 근본 원인까지의 구조화된 체인이고,
/// `rendered`는 미리 렌더링된 텍스트 라인입니다. 텍스트 로그에서 복원한
/// 이벤트는 `rendered`만 채워집니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrowableInfo {
    /// 구조화된 예외 체인 (바깥 → 근본 원인)
    pub chain: Vec<ThrowableRecord>,
    /// 미리 렌더링된 텍스트 표현
    pub rendered: Vec<String>,
}

impl ThrowableInfo {
    /// 구조화된 체인으로 생성합니다.
    pub fn from_chain(chain: Vec<ThrowableRecord>) -> Self {
        Self {
            chain,
            rendered: Vec::new(),
        }
    }

    /// 렌더링된 텍스트 라인으로 생성합니다.
    pub fn from_rendered(rendered: Vec<String>) -> Self {
        Self {
            chain: Vec::new(),
            rendered,
        }
    }
}

/// 로그 호출 위치 정보
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationInfo {
    /// 호출 클래스 이름
    pub class_name: String,
    /// 소스 파일 이름
    pub file_name: Option<String>,
    /// 메서드 이름
    pub method_name: Option<String>,
    /// 라인 번호
    pub line_number: Option<i32>,
}

/// 로그 이벤트
///
/// 헤더가 타입 값으로 해석된 이벤트(ParsedEvent)이자, 호스트가 직접 넘겨주는
/// 인메모리 이벤트의 공통 표현입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    /// 이벤트 시각
    pub timestamp: DateTime<Utc>,
    /// 심각도
    pub level: Level,
    /// 스레드 이름
    pub thread: String,
    /// 로거 경로 (분해 전 원본)
    pub logger: String,
    /// 메시지
    pub message: String,
    /// 호출 위치 (있을 경우)
    pub location: Option<LocationInfo>,
    /// 예외 정보 (있을 경우)
    pub throwable: Option<ThrowableInfo>,
    /// 보조 컨텍스트 속성 (MDC)
    pub properties: BTreeMap<String, String>,
}

impl LogEvent {
    /// 필수 필드로 이벤트를 생성합니다.
    pub fn new(
        timestamp: DateTime<Utc>,
        level: Level,
        logger: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            level,
            thread: String::new(),
            logger: logger.into(),
            message: message.into(),
            location: None,
            throwable: None,
            properties: BTreeMap::new(),
        }
    }
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {}: {}",
            self.level, self.thread, self.logger, self.message,
        )
    }
}
