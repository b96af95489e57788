#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use relog_parser::{EventHeaderParser, HeaderCaptures, RawEvent};

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    relative_time: String,
    thread: String,
    datetime: String,
    level: String,
    logger: String,
    message: String,
    /// 예외 체인 (최대 16줄로 제한)
    cause_chain: Vec<String>,
}

fuzz_target!(|input: FuzzInput| {
    let raw = RawEvent {
        header: HeaderCaptures {
            relative_time: input.relative_time,
            thread: input.thread,
            datetime: input.datetime,
            level: input.level,
            logger: input.logger,
        },
        message: input.message,
        cause_chain: input.cause_chain.into_iter().take(16).collect(),
        line: 1,
    };

    if let Err(e) = EventHeaderParser::default().parse(raw) {
        assert!(e.is_recoverable(), "header parsing only fails per event: {e}");
    }
});
