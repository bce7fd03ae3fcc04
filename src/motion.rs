pub const COUNTER_DURATION_MS: f64 = 2_000.0;
pub const TYPEWRITER_START_DELAY_MS: u32 = 500;
pub const TYPEWRITER_TICK_MS: u32 = 100;
pub const TIMELINE_STAGGER_STEP_MS: u32 = 200;
pub const FADE_UP_DELAY_STEP_SECS: f64 = 0.1;

pub fn ease_out_cubic(progress: f64) -> f64 {
    1.0 - (1.0 - progress).powi(3)
}

#[derive(Clone, Copy)]
pub struct CounterAnimation {
    target: u32,
    started_at_ms: f64,
    duration_ms: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterFrame {
    pub value: u32,
    pub finished: bool,
}

impl CounterAnimation {
    pub fn new(target: u32, started_at_ms: f64) -> Self {
        Self {
            target,
            started_at_ms,
            duration_ms: COUNTER_DURATION_MS,
        }
    }

    pub fn frame(&self, now_ms: f64) -> CounterFrame {
        let progress = ((now_ms - self.started_at_ms) / self.duration_ms).clamp(0.0, 1.0);

        if progress >= 1.0 {
            return CounterFrame {
                value: self.target,
                finished: true,
            };
        }

        CounterFrame {
            value: (f64::from(self.target) * ease_out_cubic(progress)).floor() as u32,
            finished: false,
        }
    }
}

pub struct Typewriter {
    chars: Vec<char>,
    index: usize,
    revealed: String,
}

impl Typewriter {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            index: 0,
            revealed: String::with_capacity(text.len()),
        }
    }

    // The index only moves forward; a completed run cannot be restarted.
    pub fn step(&mut self) -> Option<&str> {
        let next = *self.chars.get(self.index)?;
        self.revealed.push(next);
        self.index += 1;
        Some(&self.revealed)
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.chars.len()
    }
}

pub fn timeline_stagger_delay_ms(batch_index: usize) -> u32 {
    batch_index as u32 * TIMELINE_STAGGER_STEP_MS
}

pub fn fade_up_delay_secs(index: usize) -> f64 {
    index as f64 * FADE_UP_DELAY_STEP_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_out_cubic_covers_unit_interval() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(0.5), 0.875);
        assert_eq!(ease_out_cubic(1.0), 1.0);
    }

    #[test]
    fn counter_follows_cubic_ease_out_curve() {
        let animation = CounterAnimation::new(100, 1_000.0);

        for (elapsed_ms, progress) in [(500.0, 0.25), (1_000.0, 0.5), (1_500.0, 0.75)] {
            let expected = (100.0 * (1.0 - (1.0_f64 - progress).powi(3))).floor() as u32;
            let frame = animation.frame(1_000.0 + elapsed_ms);
            assert_eq!(frame.value, expected);
            assert!(!frame.finished);
        }
    }

    #[test]
    fn counter_lands_on_exact_target() {
        let animation = CounterAnimation::new(100, 1_000.0);

        assert_eq!(
            animation.frame(3_000.0),
            CounterFrame {
                value: 100,
                finished: true
            }
        );
        assert_eq!(
            animation.frame(9_999.0),
            CounterFrame {
                value: 100,
                finished: true
            }
        );
    }

    #[test]
    fn counter_clamps_timestamps_before_start() {
        let animation = CounterAnimation::new(100, 1_000.0);
        let frame = animation.frame(400.0);

        assert_eq!(frame.value, 0);
        assert!(!frame.finished);
    }

    #[test]
    fn typewriter_reveals_one_char_per_step() {
        let mut typewriter = Typewriter::new("hey");

        assert_eq!(typewriter.step(), Some("h"));
        assert_eq!(typewriter.step(), Some("he"));
        assert_eq!(typewriter.step(), Some("hey"));
        assert!(typewriter.is_complete());
    }

    #[test]
    fn typewriter_rejects_steps_after_completion() {
        let mut typewriter = Typewriter::new("ok");
        while typewriter.step().is_some() {}

        assert_eq!(typewriter.step(), None);
        assert_eq!(typewriter.step(), None);
        assert!(typewriter.is_complete());
    }

    #[test]
    fn typewriter_handles_multibyte_text() {
        let mut typewriter = Typewriter::new("héllo");

        assert_eq!(typewriter.step(), Some("h"));
        assert_eq!(typewriter.step(), Some("hé"));
        assert_eq!(typewriter.step(), Some("hél"));
    }

    #[test]
    fn typewriter_is_empty_safe() {
        let mut typewriter = Typewriter::new("");

        assert!(typewriter.is_complete());
        assert_eq!(typewriter.step(), None);
    }

    #[test]
    fn timeline_delay_grows_per_batch_position() {
        assert_eq!(timeline_stagger_delay_ms(0), 0);
        assert_eq!(timeline_stagger_delay_ms(1), 200);
        assert_eq!(timeline_stagger_delay_ms(4), 800);
    }

    #[test]
    fn fade_up_delay_grows_per_index() {
        assert_eq!(fade_up_delay_secs(0), 0.0);
        assert_eq!(fade_up_delay_secs(2), 0.2);
        assert!((fade_up_delay_secs(5) - 0.5).abs() < 1e-12);
    }
}
