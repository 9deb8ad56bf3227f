use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

/// Repeating callback on a background thread, cancelled on drop.
///
/// The callback returns `false` to stop on its own, e.g. once its receiver is gone.
#[derive(Debug)]
pub struct Interval {
    cancelled: Arc<AtomicBool>,
}

impl Interval {
    pub fn new<F>(period: Duration, mut callback: F) -> Self
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = cancelled.clone();
        thread::spawn(move || {
            loop {
                thread::sleep(period);
                if flag.load(Ordering::Acquire) || !callback() {
                    break;
                }
            }
            log::trace!("Interval thread exited");
        });
        Self { cancelled }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.cancel();
    }
}
