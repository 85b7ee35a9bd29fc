//! Rate Limiter - 按分钟窗口限流
//!
//! 计数器在互斥锁内自增并检查；超过上限时在锁外等待到下一个整分钟边界，
//! 然后把计数清零。窗口与墙上时钟对齐，不是滑动窗口。

use async_trait::async_trait;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// 默认每分钟请求上限
pub const DEFAULT_MAX_PER_MINUTE: u32 = 15;

/// 限流窗口长度
pub const WINDOW: Duration = Duration::from_secs(60);

/// 时钟抽象，便于测试注入
#[async_trait]
pub trait Clock: Send + Sync {
    /// 自 UNIX 纪元起的墙上时间
    fn now(&self) -> Duration;

    async fn sleep(&self, duration: Duration);
}

/// 系统时钟
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> Duration {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// 限流许可
///
/// 拿到许可即可调用被限流的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatePermit {
    waited: Option<Duration>,
}

impl RatePermit {
    /// 获取许可前等待的时长（未等待为 None）
    pub fn waited(&self) -> Option<Duration> {
        self.waited
    }
}

/// 限流器
pub struct RateLimiter {
    max_per_window: u32,
    count: Mutex<u32>,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(max_per_window: u32) -> Self {
        Self::with_clock(max_per_window, Arc::new(SystemClock))
    }

    pub fn with_clock(max_per_window: u32, clock: Arc<dyn Clock>) -> Self {
        Self {
            max_per_window,
            count: Mutex::new(0),
            clock,
        }
    }

    pub fn max_per_window(&self) -> u32 {
        self.max_per_window
    }

    /// 当前窗口内的计数
    pub fn count(&self) -> u32 {
        *self.count.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 获取许可
    ///
    /// 超过上限时阻塞当前任务直到下一个窗口边界；等待期间不持有锁。
    pub async fn acquire(&self) -> RatePermit {
        let exceeded = {
            let mut count = self.count.lock().unwrap_or_else(PoisonError::into_inner);
            *count += 1;
            *count > self.max_per_window
        };

        if !exceeded {
            return RatePermit { waited: None };
        }

        let wait = self.until_next_window();
        tracing::info!(
            wait_secs = wait.as_secs_f64(),
            max_per_minute = self.max_per_window,
            "Rate limit reached, waiting for next window"
        );
        self.clock.sleep(wait).await;

        *self.count.lock().unwrap_or_else(PoisonError::into_inner) = 0;

        RatePermit { waited: Some(wait) }
    }

    /// 获取许可后执行操作，结果原样返回
    pub async fn throttle<F, Fut, T>(&self, operation: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let _permit = self.acquire().await;
        operation().await
    }

    /// 距离下一个整分钟边界的时长
    fn until_next_window(&self) -> Duration {
        let window_ms = WINDOW.as_millis();
        let elapsed_ms = self.clock.now().as_millis() % window_ms;
        Duration::from_millis((window_ms - elapsed_ms) as u64)
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PER_MINUTE)
    }
}
