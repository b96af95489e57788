//! 호스트/프로세스 메타데이터
//!
//! 빌더 생성 시 한 번만 조회합니다. 호스트 이름이나 IP 조회에 실패하면
//! 해당 필드만 생략하고 생성은 계속합니다.

use std::net::ToSocketAddrs;

use relog_core::document::Document;

use super::keys;

/// 호스트 메타데이터
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    /// 프로세스 식별 문자열 (`pid@hostname`)
    pub process: String,
    /// 호스트 이름
    pub name: Option<String>,
    /// 호스트 IP 주소
    pub ip: Option<String>,
}

impl HostInfo {
    /// 현재 프로세스와 호스트 정보를 조회합니다.
    pub fn resolve() -> Self {
        let pid = std::process::id();
        let name = hostname();
        if name.is_none() {
            tracing::warn!("could not determine host name, omitting host.name and host.ip");
        }

        let ip = name.as_deref().and_then(|host| {
            let resolved = lookup_ip(host);
            if resolved.is_none() {
                tracing::warn!(host, "could not resolve host address, omitting host.ip");
            }
            resolved
        });

        let process = match &name {
            Some(host) => format!("{pid}@{host}"),
            None => pid.to_string(),
        };

        tracing::debug!(process = %process, ip = ?ip, "host metadata resolved");

        Self { process, name, ip }
    }

    /// 값을 직접 지정합니다.
    pub fn new(process: impl Into<String>, name: Option<String>, ip: Option<String>) -> Self {
        Self {
            process: process.into(),
            name,
            ip,
        }
    }

    /// `host` 필드 문서
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        doc.put_text(keys::PROCESS, Some(self.process.as_str()));
        doc.put_text(keys::HOST_NAME, self.name.as_deref());
        doc.put_text(keys::IP, self.ip.as_deref());
        doc
    }
}

fn lookup_ip(host: &str) -> Option<String> {
    (host, 0)
        .to_socket_addrs()
        .ok()?
        .next()
        .map(|addr| addr.ip().to_string())
}

#[cfg(unix)]
fn hostname() -> Option<String> {
    let mut buf = [0u8; 256];
    // SAFETY: gethostname(2)은 전달한 길이 안에서만 버퍼에 씁니다.
    let rc = unsafe { libc::gethostname(buf.as_mut_ptr().cast(), buf.len()) };
    if rc != 0 {
        return None;
    }
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    non_blank(String::from_utf8_lossy(&buf[..end]).into_owned())
}

#[cfg(not(unix))]
fn hostname() -> Option<String> {
    std::env::var("COMPUTERNAME")
        .or_else(|_| std::env::var("HOSTNAME"))
        .ok()
        .and_then(non_blank)
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
