use gloo_timers::callback::Timeout;

use toast::Scheduler;

/// Browser timers via `setTimeout`
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn set_timeout(&self, delay: u32, task: Box<dyn FnOnce()>) {
        // Nothing cancels a toast timer, let it fire on its own
        Timeout::new(delay, task).forget();
    }
}
