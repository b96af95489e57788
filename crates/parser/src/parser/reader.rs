//! 이벤트 경계 리더
//!
//! 라인 단위 입력을 감싸고, 가장 최근에 반환한 라인을 한 번 되돌릴 수 있는
//! 단일 슬롯 pushback을 제공합니다. 어셈블러는 다음 이벤트의 헤더를 읽은 뒤
//! 이 슬롯에 되돌려 놓아, 다음 호출에서 같은 라인을 다시 소비합니다.

use std::io::BufRead;

use relog_core::metrics::LINES_READ_TOTAL;

use crate::error::ParserError;

/// 한 줄 lookahead 리더
///
/// 단일 커서이며 재진입하지 않습니다. `push_back()`을 연속으로 두 번 호출해도
/// 되돌려지는 라인은 하나뿐입니다.
pub struct EventBoundaryReader<R> {
    inner: R,
    buf: Vec<u8>,
    /// 가장 최근에 반환한 라인
    last: Option<String>,
    /// `last`를 다음 `read_line()`에서 다시 반환할지 여부
    pushed_back: bool,
    /// 입력에서 실제로 읽은 라인 수
    lines_read: u64,
}

impl<R: BufRead> EventBoundaryReader<R> {
    /// 입력을 감싸는 리더를 생성합니다.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::with_capacity(256),
            last: None,
            pushed_back: false,
            lines_read: 0,
        }
    }

    /// 다음 라인을 반환합니다. 입력이 끝나면 `Ok(None)`입니다.
    ///
    /// 줄 끝의 `\n`과 `\r\n`은 제거됩니다. UTF-8이 아닌 바이트는
    /// 대체 문자로 바뀝니다.
    pub fn read_line(&mut self) -> Result<Option<String>, ParserError> {
        if self.pushed_back {
            self.pushed_back = false;
            return Ok(self.last.clone());
        }

        self.buf.clear();
        let n = self
            .inner
            .read_until(b'\n', &mut self.buf)
            .map_err(|source| ParserError::Stream {
                line: self.lines_read,
                source,
            })?;

        if n == 0 {
            self.last = None;
            return Ok(None);
        }

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }

        self.lines_read += 1;
        metrics::counter!(LINES_READ_TOTAL).increment(1);
        let line = String::from_utf8_lossy(&self.buf).into_owned();
        self.last = Some(line.clone());
        Ok(Some(line))
    }

    /// 가장 최근에 반환한 라인을 다음 `read_line()`에서 다시 반환하도록 합니다.
    ///
    /// 반환한 라인이 없거나 (처음 또는 입력 끝) 이미 되돌려 둔 상태면 아무 일도 하지 않습니다.
    pub fn push_back(&mut self) {
        if self.last.is_some() {
            self.pushed_back = true;
        }
    }

    /// 되돌려 둔 라인이 있는지 여부
    pub fn has_pushed_back(&self) -> bool {
        self.pushed_back
    }

    /// 가장 최근에 반환한 라인의 번호 (1부터)
    pub fn line_number(&self) -> u64 {
        self.lines_read
    }

    /// 내부 입력을 돌려받습니다.
    pub fn into_inner(self) -> R {
        self.inner
    }
}
