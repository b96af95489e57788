#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use relog_core::pipeline::EventSource;
use relog_parser::{DocumentBuilder, HostInfo, ParserConfig, TextEventSource};

// 임의 바이트 입력: 패닉 없이 끝까지 소비되어야 하고, 치명적 에러는 나오지 않아야 함
fuzz_target!(|data: &[u8]| {
    let Ok(mut source) = TextEventSource::new(Cursor::new(data), &ParserConfig::default()) else {
        return;
    };
    let builder = DocumentBuilder::with_host(HostInfo::new("1@fuzz", None, None));

    loop {
        match source.next_event() {
            Ok(Some(event)) => {
                let doc = builder.build(&event);
                let _ = doc.to_json();
            }
            Ok(None) => break,
            Err(e) => assert!(e.is_recoverable(), "in-memory input must not fail the stream: {e}"),
        }
    }
});
