//! 이벤트 재구성 벤치마크
//!
//! 단일 라인 이벤트, 멀티라인 메시지, 예외 체인이 섞인 입력의
//! 어셈블 처리량과 문서 변환 처리량을 측정합니다.

use std::io::Cursor;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use relog_core::config::DEFAULT_HEADER_PATTERN;
use relog_parser::{
    DocumentBuilder, EventAssembler, EventBoundaryReader, EventHeaderParser, HostInfo,
};

/// 헤더 한 줄짜리 이벤트
const SINGLE_LINE: &str =
    "123 [main] (22 Oct 2009 16:46:29,123) INFO  com.example.service.OrderService - order accepted\n";

/// 두 줄 이어지는 메시지
const MULTI_LINE: &str = "\
124 [http-nio-8080-exec-7] (22 Oct 2009 16:46:29,124) WARN  com.example.web.Controller - slow request
 path=/api/v1/orders
 elapsed=1532ms
";

/// 예외 체인
const WITH_CAUSES: &str = "\
125 [worker-3] (22 Oct 2009 16:46:29,125) ERROR com.example.db.Repository - query failed
java.lang.RuntimeException: could not execute statement
\tat com.example.db.Repository.save(Repository.java:88)
\tat com.example.service.OrderService.accept(OrderService.java:41)
\tat sun.reflect.NativeMethodAccessorImpl.invoke0(Native Method)
Caused by: java.sql.SQLException: connection reset
\tat org.postgresql.core.PGStream.receive(PGStream.java:512)
\t... 14 more
";

fn input_of(event: &str, count: usize) -> String {
    event.repeat(count)
}

fn drain(assembler: &EventAssembler, input: &str) -> usize {
    let mut reader = EventBoundaryReader::new(Cursor::new(input.as_bytes()));
    let mut n = 0;
    while let Some(raw) = assembler.next_event(&mut reader).unwrap() {
        black_box(raw);
        n += 1;
    }
    n
}

fn bench_assembler(c: &mut Criterion) {
    let assembler = EventAssembler::from_pattern(DEFAULT_HEADER_PATTERN).unwrap();
    let mut group = c.benchmark_group("assembler");

    for (name, event) in [
        ("single_line", SINGLE_LINE),
        ("multi_line", MULTI_LINE),
        ("with_causes", WITH_CAUSES),
    ] {
        let input = input_of(event, 1000);
        group.throughput(Throughput::Elements(1000));
        group.bench_with_input(BenchmarkId::new("events_1000", name), &input, |b, input| {
            b.iter(|| drain(&assembler, black_box(input)))
        });
    }

    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let assembler = EventAssembler::from_pattern(DEFAULT_HEADER_PATTERN).unwrap();
    let header_parser = EventHeaderParser::default();
    let builder = DocumentBuilder::with_host(HostInfo::new("1@bench", None, None));
    let input = input_of(&format!("{SINGLE_LINE}{MULTI_LINE}{WITH_CAUSES}"), 300);

    let mut group = c.benchmark_group("end_to_end");
    group.throughput(Throughput::Elements(900));
    group.bench_function("to_json_900", |b| {
        b.iter(|| {
            let mut reader = EventBoundaryReader::new(Cursor::new(input.as_bytes()));
            while let Some(raw) = assembler.next_event(&mut reader).unwrap() {
                let event = header_parser.parse(raw).unwrap();
                let doc = builder.build(&event);
                black_box(doc.to_json().unwrap());
            }
        })
    });
    group.finish();
}

criterion_group!(benches, bench_assembler, bench_end_to_end);
criterion_main!(benches);
