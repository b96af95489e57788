//! 예외 체인 분해
//!
//! 구조화된 체인이 있으면 예외마다 `{message, stackTrace[]}` 문서를 만들고,
//! 동시에 한 문자열 표현을 쌓습니다:
//!
//! ```text
//! <ClassName>:<message>\n
//! <class>.<method>(<file>:<line>)\n   (프레임마다)
//! ```
//!
//! 구조화된 체인 없이 렌더링된 라인만 있으면 각 라인 뒤에 `\n`을 붙인
//! 한 문자열 표현만 만듭니다.

use std::fmt::Write as _;

use relog_core::document::{Document, Value};
use relog_core::types::{StackFrame, ThrowableInfo, ThrowableRecord};

use super::class_name::class_name_document;
use super::keys;

/// 파일 이름이 없는 프레임의 표기
pub const UNKNOWN_SOURCE: &str = "Unknown Source";

/// 예외 정보 분해 결과
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThrowableFields {
    /// 예외별 문서 (바깥 → 근본 원인). 구조화된 체인이 없으면 비어 있음
    pub throwables: Vec<Value>,
    /// 한 문자열 표현
    pub stacktraces: String,
}

/// 예외 정보를 분해합니다.
pub fn decompose(info: &ThrowableInfo) -> ThrowableFields {
    let mut flat = String::new();

    if info.chain.is_empty() {
        for line in &info.rendered {
            flat.push_str(line);
            flat.push('\n');
        }
        return ThrowableFields {
            throwables: Vec::new(),
            stacktraces: flat,
        };
    }

    let throwables = info
        .chain
        .iter()
        .map(|record| Value::Document(throwable_document(record, &mut flat)))
        .collect();

    ThrowableFields {
        throwables,
        stacktraces: flat,
    }
}

fn throwable_document(record: &ThrowableRecord, flat: &mut String) -> Document {
    let _ = writeln!(
        flat,
        "{}:{}",
        record.class_name,
        record.message.as_deref().unwrap_or_default()
    );

    let mut doc = Document::new();
    doc.put_text(keys::MESSAGE, record.message.as_deref());

    if !record.frames.is_empty() {
        let frames: Vec<Value> = record
            .frames
            .iter()
            .map(|frame| {
                flat.push_str(&render_frame(frame));
                flat.push('\n');
                Value::Document(frame_document(frame))
            })
            .collect();
        doc.insert(keys::STACK_TRACE, frames);
    }

    doc
}

/// 스택 프레임 문서
///
/// 프레임에서는 `className`이 분해 문서, `class`가 원문입니다.
pub fn frame_document(frame: &StackFrame) -> Document {
    let mut doc = Document::new();
    doc.put_text(keys::FILE_NAME, frame.file_name.as_deref());
    doc.put_text(keys::METHOD, frame.method_name.as_deref());
    doc.put_opt(keys::LINE_NUMBER, frame.line_number);
    doc.put_opt(keys::CLASS_NAME, class_name_document(&frame.class_name));
    doc.insert(keys::CLASS, frame.class_name.as_str());
    doc
}

/// 프레임 하나의 한 줄 표현 (`class.method(file:line)`)
pub fn render_frame(frame: &StackFrame) -> String {
    let mut out = format!(
        "{}.{}({}",
        frame.class_name,
        frame.method_name.as_deref().unwrap_or_default(),
        frame.file_name.as_deref().unwrap_or(UNKNOWN_SOURCE),
    );
    if let Some(line) = frame.line_number {
        let _ = write!(out, ":{line}");
    }
    out.push(')');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chained() -> ThrowableInfo {
        ThrowableInfo::from_chain(vec![
            ThrowableRecord::new(
                "java.lang.RuntimeException",
                Some("I'm an innocent bystander.".to_owned()),
            )
            .frame(
                StackFrame::new("org.example.AppTest")
                    .method("testChained")
                    .at("AppTest.java", 147),
            )
            .frame(
                StackFrame::new("sun.reflect.NativeMethodAccessorImpl")
                    .method("invoke0")
                    .line(-2),
            ),
            ThrowableRecord::new(
                "java.lang.IllegalStateException",
                Some("I'm the real culprit!".to_owned()),
            )
            .frame(
                StackFrame::new("org.example.AppTest")
                    .method("testChained")
                    .at("AppTest.java", 145),
            ),
        ])
    }

    #[test]
    fn structured_chain_produces_documents_outer_first() {
        let fields = decompose(&chained());
        assert_eq!(fields.throwables.len(), 2);

        let outer = fields.throwables[0].as_document().unwrap();
        assert_eq!(
            outer.get_str(keys::MESSAGE),
            Some("I'm an innocent bystander.")
        );
        assert_eq!(outer.get_array(keys::STACK_TRACE).unwrap().len(), 2);

        let root = fields.throwables[1].as_document().unwrap();
        assert_eq!(root.get_str(keys::MESSAGE), Some("I'm the real culprit!"));
    }

    #[test]
    fn structured_chain_also_flattens() {
        let fields = decompose(&chained());
        assert_eq!(
            fields.stacktraces,
            "java.lang.RuntimeException:I'm an innocent bystander.\n\
             org.example.AppTest.testChained(AppTest.java:147)\n\
             sun.reflect.NativeMethodAccessorImpl.invoke0(Unknown Source:-2)\n\
             java.lang.IllegalStateException:I'm the real culprit!\n\
             org.example.AppTest.testChained(AppTest.java:145)\n"
        );
    }

    #[test]
    fn negative_line_number_passes_through() {
        let fields = decompose(&chained());
        let outer = fields.throwables[0].as_document().unwrap();
        let native = outer.get_array(keys::STACK_TRACE).unwrap()[1]
            .as_document()
            .unwrap();
        assert_eq!(native.get(keys::LINE_NUMBER).and_then(Value::as_i64), Some(-2));
        assert!(!native.contains_key(keys::FILE_NAME));
        assert_eq!(
            native.get_str(keys::CLASS),
            Some("sun.reflect.NativeMethodAccessorImpl")
        );
        assert_eq!(
            native
                .get_document(keys::CLASS_NAME)
                .and_then(|d| d.get_str(keys::CLASS_NAME)),
            Some("NativeMethodAccessorImpl")
        );
    }

    #[test]
    fn rendered_only_produces_flat_string() {
        let info = ThrowableInfo::from_rendered(vec![
            "java.lang.Error: e".to_owned(),
            "\tat a.B.c(B.java:1)".to_owned(),
        ]);
        let fields = decompose(&info);
        assert!(fields.throwables.is_empty());
        assert_eq!(fields.stacktraces, "java.lang.Error: e\n\tat a.B.c(B.java:1)\n");
    }

    #[test]
    fn throwable_without_message_or_frames() {
        let info = ThrowableInfo::from_chain(vec![ThrowableRecord::new(
            "java.lang.NullPointerException",
            None,
        )]);
        let fields = decompose(&info);
        let doc = fields.throwables[0].as_document().unwrap();
        assert!(!doc.contains_key(keys::MESSAGE));
        assert!(!doc.contains_key(keys::STACK_TRACE));
        assert_eq!(fields.stacktraces, "java.lang.NullPointerException:\n");
    }

    #[test]
    fn frame_with_blank_class_has_no_class_document() {
        let doc = frame_document(&StackFrame::new("").method("run"));
        assert!(!doc.contains_key(keys::CLASS_NAME));
        assert_eq!(doc.get_str(keys::CLASS), Some(""));
    }
}
