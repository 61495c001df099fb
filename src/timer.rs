//! Lightweight performance instrumentation.

use std::{
    cell::Cell,
    fmt,
    time::{Duration, Instant},
};

/// Measures and averages the duration of an operation.
///
/// Displaying the timer with `{}` prints the average of the recorded durations and resets it.
pub struct Timer {
    name: &'static str,
    recorded: Cell<(Duration, u32)>,
}

impl Timer {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            recorded: Cell::new((Duration::ZERO, 0)),
        }
    }

    /// Invokes a closure, recording the time it takes.
    pub fn time<T>(&mut self, timee: impl FnOnce() -> T) -> T {
        let _guard = self.start();
        timee()
    }

    /// Starts timing an operation; the measurement is recorded when the returned guard drops.
    pub fn start(&mut self) -> TimerGuard<'_> {
        TimerGuard {
            start: Instant::now(),
            timer: self,
        }
    }

    fn record(&self, duration: Duration) {
        let (total, count) = self.recorded.get();
        self.recorded.set((total + duration, count + 1));
    }
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (total, count) = self.recorded.take();
        if count == 0 {
            write!(f, "{}: -", self.name)
        } else {
            let avg_ms = total.as_secs_f32() * 1000.0 / count as f32;
            write!(f, "{}: {count}x{avg_ms:.1}ms", self.name)
        }
    }
}

/// Guard returned by [`Timer::start`]. Stops timing the operation when dropped.
pub struct TimerGuard<'a> {
    start: Instant,
    timer: &'a mut Timer,
}

impl Drop for TimerGuard<'_> {
    fn drop(&mut self) {
        self.timer.record(self.start.elapsed());
    }
}

/// Logs frames per second once per second, with optional extra data.
pub struct FpsCounter {
    name: String,
    frames: u32,
    since: Instant,
}

impl FpsCounter {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            frames: 0,
            since: Instant::now(),
        }
    }

    /// Advances the frame counter by 1, logging FPS if one second has passed.
    pub fn tick(&mut self) {
        self.tick_with(std::iter::empty::<&Timer>());
    }

    /// Like [`FpsCounter::tick`], additionally logging `extra` (typically [`Timer`]s).
    pub fn tick_with<D: fmt::Display>(&mut self, extra: impl IntoIterator<Item = D>) {
        use fmt::Write;

        self.frames += 1;
        if self.since.elapsed() < Duration::from_secs(1) {
            return;
        }

        let mut msg = format!("{}: {} FPS", self.name, self.frames);
        let mut iter = extra.into_iter();
        if let Some(first) = iter.next() {
            let _ = write!(msg, " ({first}");
            for item in iter {
                let _ = write!(msg, ", {item}");
            }
            msg.push(')');
        }
        log::debug!("{msg}");

        self.frames = 0;
        self.since = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_resets_the_average() {
        let mut timer = Timer::new("op");
        timer.time(|| {});
        timer.time(|| {});
        let shown = timer.to_string();
        assert!(shown.starts_with("op: 2x"), "{shown}");
        assert_eq!(timer.to_string(), "op: -");
    }

    #[test]
    fn guard_records_on_drop() {
        let mut timer = Timer::new("op");
        drop(timer.start());
        assert!(timer.to_string().starts_with("op: 1x"));
    }
}
