//! Running average over recent velocity samples
//!
//! Heading is derived from velocity each tick; averaging the last few
//! samples keeps the derived orientation stable when the raw signal jitters.

use crate::foundation::math::Vec3;

/// Default number of samples a smoother buffers
pub const DEFAULT_SAMPLE_COUNT: usize = 10;

/// Fixed-capacity running average of [`Vec3`] samples
///
/// The running sum always equals the sum of the currently buffered samples.
/// A capacity of zero turns the smoother into a pass-through.
#[derive(Debug, Clone)]
pub struct Smoother {
    samples: Vec<Vec3>,
    next_slot: usize,
    filled: usize,
    running_sum: Vec3,
}

impl Default for Smoother {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_COUNT)
    }
}

impl Smoother {
    /// Create a smoother buffering up to `capacity` samples
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: vec![Vec3::zeros(); capacity],
            next_slot: 0,
            filled: 0,
            running_sum: Vec3::zeros(),
        }
    }

    /// Maximum number of buffered samples
    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    /// Number of samples currently buffered
    pub fn sample_count(&self) -> usize {
        self.filled
    }

    /// Record a sample and return the average of the buffered window
    ///
    /// Once at capacity the oldest sample is evicted; the running sum is
    /// adjusted by the new and evicted samples rather than recomputed.
    pub fn update(&mut self, sample: Vec3) -> Vec3 {
        if self.samples.is_empty() {
            return sample;
        }

        if self.filled == self.samples.len() {
            self.running_sum -= self.samples[self.next_slot];
        } else {
            self.filled += 1;
        }

        self.running_sum += sample;
        self.samples[self.next_slot] = sample;
        self.next_slot = (self.next_slot + 1) % self.samples.len();

        self.running_sum / self.filled.max(1) as f32
    }

    /// Discard all buffered samples
    pub fn reset(&mut self) {
        self.samples.fill(Vec3::zeros());
        self.next_slot = 0;
        self.filled = 0;
        self.running_sum = Vec3::zeros();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_average_of_last_five_samples() {
        let mut smoother = Smoother::new(5);

        let mut average = Vec3::zeros();
        for value in 1..=6 {
            let v = value as f32;
            average = smoother.update(Vec3::new(v, v, v));
        }

        // Window holds 2..=6, mean 4
        assert_relative_eq!(average.x, 4.0, epsilon = 1e-5);
        assert_relative_eq!(average.y, 4.0, epsilon = 1e-5);
        assert_relative_eq!(average.z, 4.0, epsilon = 1e-5);
    }

    #[test]
    fn test_partial_fill_divides_by_sample_count() {
        let mut smoother = Smoother::new(8);

        smoother.update(Vec3::new(2.0, 0.0, 0.0));
        let average = smoother.update(Vec3::new(4.0, 0.0, 0.0));

        assert_eq!(smoother.sample_count(), 2);
        assert_relative_eq!(average.x, 3.0, epsilon = 1e-5);
    }

    #[test]
    fn test_zero_capacity_is_pass_through() {
        let mut smoother = Smoother::new(0);

        let sample = Vec3::new(7.0, -1.0, 0.5);
        let average = smoother.update(sample);

        assert_eq!(average, sample);
        assert_eq!(smoother.sample_count(), 0);
    }

    #[test]
    fn test_running_sum_matches_window_after_wraparound() {
        let mut smoother = Smoother::new(3);

        let mut average = Vec3::zeros();
        let samples: Vec<Vec3> = (0..10).map(|i| Vec3::new(i as f32, -(i as f32), 1.0)).collect();
        for sample in &samples {
            average = smoother.update(*sample);
        }

        // Window is the last 3 samples; compare against the naive mean
        let expected: Vec3 = (samples[7] + samples[8] + samples[9]) / 3.0;
        assert_relative_eq!(average.x, expected.x, epsilon = 1e-4);
        assert_relative_eq!(average.y, expected.y, epsilon = 1e-4);
        assert_relative_eq!(average.z, expected.z, epsilon = 1e-4);
    }

    #[test]
    fn test_reset_empties_window() {
        let mut smoother = Smoother::new(4);
        smoother.update(Vec3::new(10.0, 0.0, 0.0));
        smoother.update(Vec3::new(20.0, 0.0, 0.0));

        smoother.reset();
        let average = smoother.update(Vec3::new(6.0, 0.0, 0.0));

        assert_eq!(smoother.sample_count(), 1);
        assert_relative_eq!(average.x, 6.0, epsilon = 1e-5);
    }
}
