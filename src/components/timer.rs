//! Round timer (stopwatch or countdown)

/// Timer direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerMode {
    /// Counts up from zero indefinitely
    CountUp,
    /// Counts down from the given seconds and then finishes
    Countdown(f32),
}

#[derive(Debug, Clone)]
pub struct GameTimer {
    mode: TimerMode,
    elapsed: f32,
    running: bool,
    finished: bool,
}

impl GameTimer {
    pub fn new(mode: TimerMode) -> Self {
        Self {
            mode,
            elapsed: 0.0,
            running: false,
            finished: false,
        }
    }

    pub fn stopwatch() -> Self {
        Self::new(TimerMode::CountUp)
    }

    pub fn countdown(seconds: f32) -> Self {
        Self::new(TimerMode::Countdown(seconds.max(0.0)))
    }

    pub fn start(&mut self) {
        if !self.finished {
            self.running = true;
        }
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.start();
    }

    /// Back to zero, stopped
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.running = false;
        self.finished = false;
    }

    /// Advance; true only on the step a countdown reaches zero
    pub fn update(&mut self, dt: f32) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed += dt;
        match self.mode {
            TimerMode::Countdown(total) if self.elapsed >= total => {
                self.elapsed = total;
                self.running = false;
                self.finished = true;
                true
            }
            _ => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Seconds left on a countdown; None for a stopwatch
    pub fn remaining(&self) -> Option<f32> {
        match self.mode {
            TimerMode::CountUp => None,
            TimerMode::Countdown(total) => Some((total - self.elapsed).max(0.0)),
        }
    }

    /// `M:SS` of the value players care about (elapsed or remaining).
    /// Countdowns round up so "0:00" only shows once finished.
    pub fn format(&self) -> String {
        let secs = match self.remaining() {
            Some(left) => left.ceil() as u64,
            None => self.elapsed.floor() as u64,
        };
        format!("{}:{:02}", secs / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopwatch() {
        let mut timer = GameTimer::stopwatch();
        timer.update(1.0);
        assert_eq!(timer.elapsed(), 0.0, "not started");
        timer.start();
        timer.update(61.5);
        assert_eq!(timer.format(), "1:01");
        assert_eq!(timer.remaining(), None);
        timer.pause();
        timer.update(10.0);
        assert_eq!(timer.elapsed(), 61.5);
    }

    #[test]
    fn test_countdown_finishes_once() {
        let mut timer = GameTimer::countdown(3.0);
        timer.start();
        assert_eq!(timer.format(), "0:03");
        assert!(!timer.update(2.5));
        assert_eq!(timer.format(), "0:01");
        assert!(timer.update(1.0));
        assert!(timer.is_finished());
        assert_eq!(timer.remaining(), Some(0.0));
        assert!(!timer.update(1.0));
        assert_eq!(timer.format(), "0:00");

        // Finished timers stay stopped until reset
        timer.resume();
        assert!(!timer.is_running());
        timer.reset();
        timer.start();
        assert!(timer.is_running());
        assert_eq!(timer.elapsed(), 0.0);
    }
}
