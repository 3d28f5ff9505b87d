use medi_reminder_infra::{ISys, MediContext};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// A clock that only moves when told to
pub struct TestSys {
    now: AtomicI64,
}

impl TestSys {
    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl ISys for TestSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// In-memory context in UTC with the clock pinned at `now`
pub fn setup_context(now: i64) -> (MediContext, Arc<TestSys>) {
    let sys = Arc::new(TestSys {
        now: AtomicI64::new(now),
    });
    let mut ctx = MediContext::create_inmemory();
    ctx.config.timezone = medi_reminder_domain::Tz::UTC;
    let clock: Arc<dyn ISys> = sys.clone();
    ctx.sys = clock;
    (ctx, sys)
}
