//! 백필 드라이버
//!
//! 소스에서 이벤트를 하나씩 꺼내 문서로 바꾸고 싱크에 넘기는 루프입니다.
//!
//! - 형식 에러: `skip_malformed`이면 경고 후 건너뛰고, 아니면 즉시 중단
//! - 스트림 에러: 즉시 중단
//! - 싱크 실패: 에러 핸들러에 보고하고 다음 이벤트를 계속 처리

use relog_core::error::RelogError;
use relog_core::metrics::{DOCUMENTS_WRITTEN_TOTAL, FORMAT_ERRORS_TOTAL, LABEL_SINK};
use relog_core::pipeline::{DocumentSink, EventSource, SinkErrorHandler};
use serde::Serialize;

use crate::document::DocumentBuilder;
use crate::sink::LoggingErrorHandler;

/// 백필 실행 결과
///
/// `documents_written`는 `insert`가 성공한 문서 수입니다. 버퍼링하는 싱크는
/// 마지막 `flush`가 끝나야 실제로 저장되며, `flush` 실패는 문서 수와 관계없이
/// `sink_failures`에 한 번만 더해집니다. `sink_failures`가 0이 아니면
/// `documents_written`를 저장 완료 수로 믿으면 안 됩니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BackfillSummary {
    /// 해석에 성공한 이벤트 수
    pub events: u64,
    /// 싱크가 받아들인 문서 수 (flush 전일 수 있음)
    pub documents_written: u64,
    /// 건너뛴 형식 에러 수
    pub format_errors: u64,
    /// 싱크 실패 수
    pub sink_failures: u64,
}

/// 백필 드라이버
pub struct Backfill<H = LoggingErrorHandler> {
    builder: DocumentBuilder,
    handler: H,
    skip_malformed: bool,
}

impl Backfill {
    /// 로깅 에러 핸들러를 쓰는 드라이버를 생성합니다.
    pub fn new(builder: DocumentBuilder) -> Self {
        Self {
            builder,
            handler: LoggingErrorHandler,
            skip_malformed: true,
        }
    }
}

impl<H: SinkErrorHandler> Backfill<H> {
    /// 싱크 에러 핸들러를 바꿉니다.
    pub fn with_handler<H2: SinkErrorHandler>(self, handler: H2) -> Backfill<H2> {
        Backfill {
            builder: self.builder,
            handler,
            skip_malformed: self.skip_malformed,
        }
    }

    /// 형식 에러를 건너뛸지 설정합니다.
    pub fn skip_malformed(mut self, skip: bool) -> Self {
        self.skip_malformed = skip;
        self
    }

    /// 문서 빌더
    pub fn builder(&self) -> &DocumentBuilder {
        &self.builder
    }

    /// 소스를 끝까지 읽어 싱크에 저장합니다.
    pub fn run<S, K>(&self, source: &mut S, sink: &mut K) -> Result<BackfillSummary, RelogError>
    where
        S: EventSource + ?Sized,
        K: DocumentSink + ?Sized,
    {
        self.drive(source, Some(sink))
    }

    /// 싱크 없이 소스를 끝까지 읽고 문서 변환만 수행합니다.
    pub fn check<S>(&self, source: &mut S) -> Result<BackfillSummary, RelogError>
    where
        S: EventSource + ?Sized,
    {
        self.drive::<S, dyn DocumentSink>(source, None)
    }

    fn drive<S, K>(
        &self,
        source: &mut S,
        mut sink: Option<&mut K>,
    ) -> Result<BackfillSummary, RelogError>
    where
        S: EventSource + ?Sized,
        K: DocumentSink + ?Sized,
    {
        let mut summary = BackfillSummary::default();

        loop {
            let event = match source.next_event() {
                Ok(Some(event)) => event,
                Ok(None) => break,
                Err(err) if err.is_recoverable() => {
                    summary.format_errors += 1;
                    metrics::counter!(FORMAT_ERRORS_TOTAL).increment(1);
                    if !self.skip_malformed {
                        tracing::error!(error = %err, "malformed event, aborting");
                        return Err(err);
                    }
                    tracing::warn!(error = %err, "skipping malformed event");
                    continue;
                }
                Err(err) => return Err(err),
            };

            summary.events += 1;
            let doc = self.builder.build(&event);

            let Some(sink) = sink.as_deref_mut() else {
                continue;
            };

            match sink.insert(&doc) {
                Ok(()) => {
                    summary.documents_written += 1;
                    metrics::counter!(DOCUMENTS_WRITTEN_TOTAL, LABEL_SINK => sink.name().to_owned())
                        .increment(1);
                }
                Err(err) => {
                    summary.sink_failures += 1;
                    self.handler.on_error(&err, &doc);
                }
            }
        }

        if let Some(sink) = sink
            && let Err(err) = sink.flush()
        {
            summary.sink_failures += 1;
            tracing::error!(sink = sink.name(), error = %err, "failed to flush sink");
        }

        tracing::info!(
            events = summary.events,
            documents = summary.documents_written,
            format_errors = summary.format_errors,
            sink_failures = summary.sink_failures,
            "backfill finished"
        );

        Ok(summary)
    }
}
