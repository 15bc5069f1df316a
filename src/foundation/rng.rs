/// Source of uniform samples in `[0, 1)`.
///
/// Particle spawn attributes draw from this. Injecting it keeps the engine testable with a
/// fixed sequence while production code uses a seeded [`Rng64`].
pub trait RandomSource {
    fn next_f64_01(&mut self) -> f64;

    /// Uniform sample in `[min, max)`.
    fn between(&mut self, min: f64, max: f64) -> f64 {
        self.next_f64_01() * (max - min) + min
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        mix64(self.state)
    }
}

impl RandomSource for Rng64 {
    fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }
}

/// Replays a fixed list of samples, wrapping around at the end.
#[derive(Clone, Debug)]
pub struct SequenceRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceRandom {
    /// Values are clamped into `[0, 1)`; an empty list behaves like a constant `0.0`.
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        let values = values
            .into_iter()
            .map(|v| if v.is_finite() { v.clamp(0.0, ONE_MINUS_EPS) } else { 0.0 })
            .collect();
        Self { values, cursor: 0 }
    }

    pub fn constant(value: f64) -> Self {
        Self::new([value])
    }
}

const ONE_MINUS_EPS: f64 = 1.0 - f64::EPSILON;

impl RandomSource for SequenceRandom {
    fn next_f64_01(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.wrapping_add(1);
        v
    }
}

fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Stateless hash of `(seed, pass, sub)` mapped to `[0, 1)`.
pub fn hash01(seed: u64, pass: u64, sub: u64) -> f64 {
    let h = mix64(
        mix64(seed ^ pass.wrapping_mul(0xD6E8_FEB8_6659_FD93))
            ^ sub.wrapping_mul(0xA076_1D64_78BD_642F),
    );
    ((h >> 11) as f64) * (1.0 / ((1u64 << 53) as f64))
}

/// Stateless hash mapped to `[-1, 1)`.
pub fn hash_signed(seed: u64, pass: u64, sub: u64) -> f64 {
    hash01(seed, pass, sub) * 2.0 - 1.0
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/rng.rs"]
mod tests;
