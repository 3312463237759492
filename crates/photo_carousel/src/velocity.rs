use std::collections::VecDeque;

/// Number of recent pointer samples kept per drag.
pub const SAMPLE_CAPACITY: usize = 9;

/// Trackpad inference needs this many samples before it says anything.
const TRACKPAD_MIN_SAMPLES: usize = 5;
const TRACKPAD_MAX_AVG_DX: f32 = 2.6;
const TRACKPAD_MAX_AVG_DT_MS: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub t_ms: f64,
}

/// Time-ordered ring of the most recent pointer samples.
#[derive(Debug, Clone, Default)]
pub struct SampleBuffer {
    samples: VecDeque<PointerSample>,
}

impl SampleBuffer {
    pub fn new(first: PointerSample) -> Self {
        let mut buffer = Self::default();
        buffer.push(first);
        buffer
    }

    /// Appends a sample. Events delivered in the same frame share its
    /// timestamp, so a sample not newer than the last one only updates `x`.
    pub fn push(&mut self, sample: PointerSample) {
        if let Some(last) = self
            .samples
            .back_mut()
            .filter(|last| sample.t_ms <= last.t_ms)
        {
            last.x = sample.x;
            return;
        }
        self.samples.push_back(sample);
        while self.samples.len() > SAMPLE_CAPACITY {
            self.samples.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointerSample> {
        self.samples.iter()
    }

    /// Consecutive `(previous, current)` sample pairs.
    fn pairs(&self) -> impl Iterator<Item = (&PointerSample, &PointerSample)> {
        self.samples.iter().zip(self.samples.iter().skip(1))
    }

    /// Recency-weighted velocity in px/ms over the last `window_ms`.
    ///
    /// Pair `i` (1-based, oldest first) gets weight `i`, so a single jittery
    /// sample early in the window cannot dominate a flick at the end.
    pub fn velocity_px_ms(&self, now_ms: f64, window_ms: f64) -> f32 {
        let cutoff = now_ms - window_ms;
        let recent = self
            .samples
            .iter()
            .filter(|sample| sample.t_ms >= cutoff)
            .collect::<Vec<_>>();

        let mut weighted = 0.0;
        let mut weight_sum = 0.0;
        for (weight, (prev, curr)) in recent.iter().zip(recent.iter().skip(1)).enumerate() {
            let dt = (curr.t_ms - prev.t_ms).max(1.0) as f32;
            let vx = (curr.x - prev.x) / dt;
            let weight = (weight + 1) as f32;
            weighted += vx * weight;
            weight_sum += weight;
        }

        if weight_sum > 0.0 {
            weighted / weight_sum
        } else {
            0.0
        }
    }

    /// Trackpads report many tiny, closely spaced moves; a mouse drag does not.
    pub fn is_trackpad_like(&self) -> bool {
        if self.samples.len() < TRACKPAD_MIN_SAMPLES {
            return false;
        }

        let (dx_sum, dt_sum, count) = self.pairs().fold(
            (0.0_f32, 0.0_f64, 0_usize),
            |(dx, dt, n), (prev, curr)| {
                (
                    dx + (curr.x - prev.x).abs(),
                    dt + (curr.t_ms - prev.t_ms).max(1.0),
                    n + 1,
                )
            },
        );
        if count == 0 {
            return false;
        }

        dx_sum / (count as f32) < TRACKPAD_MAX_AVG_DX && dt_sum / (count as f64) < TRACKPAD_MAX_AVG_DT_MS
    }
}
