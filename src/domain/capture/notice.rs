//! 一時的なユーザー通知
//!
//! 同時に表示する通知は最大 1 件。読まれたかどうかに関係なく、
//! 投稿から一定時間で消える

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

/// 通知の表示時間
pub const NOTICE_TTL: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Info,
    Success,
    Danger,
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeKind::Info => write!(f, "info"),
            NoticeKind::Success => write!(f, "success"),
            NoticeKind::Danger => write!(f, "danger"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub posted_at: Instant,
}

impl Notice {
    pub fn is_expired_at(&self, now: Instant, ttl: Duration) -> bool {
        now.duration_since(self.posted_at) >= ttl
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

#[derive(Debug, Clone)]
pub struct NoticeBoard {
    current: Option<Notice>,
    ttl: Duration,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(NOTICE_TTL)
    }
}

impl NoticeBoard {
    pub fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    /// 表示中の通知を置き換える
    pub fn post(&mut self, kind: NoticeKind, message: impl Into<String>) -> &Notice {
        let notice = Notice {
            kind,
            message: message.into(),
            posted_at: Instant::now(),
        };
        tracing::debug!(kind = %notice.kind, message = %notice.message, "notice posted");
        self.current.insert(notice)
    }

    pub fn info(&mut self, message: impl Into<String>) -> &Notice {
        self.post(NoticeKind::Info, message)
    }

    pub fn success(&mut self, message: impl Into<String>) -> &Notice {
        self.post(NoticeKind::Success, message)
    }

    pub fn danger(&mut self, message: impl Into<String>) -> &Notice {
        self.post(NoticeKind::Danger, message)
    }

    /// 現在表示中の通知（期限切れなら消去する）
    pub fn current(&mut self) -> Option<&Notice> {
        self.current_at(Instant::now())
    }

    pub fn current_at(&mut self, now: Instant) -> Option<&Notice> {
        if self
            .current
            .as_ref()
            .is_some_and(|notice| notice.is_expired_at(now, self.ttl))
        {
            self.current = None;
        }
        self.current.as_ref()
    }
}
