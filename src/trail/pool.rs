use std::collections::VecDeque;

use crate::trail::particle::InkParticle;

/// Capacity-bounded live particle set in insertion order.
///
/// Inserting past capacity evicts from the front, so the survivors are always the most
/// recently spawned particles.
#[derive(Clone, Debug)]
pub struct ParticlePool {
    particles: VecDeque<InkParticle>,
    capacity: usize,
    next_seq: u64,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            particles: VecDeque::with_capacity(capacity),
            capacity,
            next_seq: 0,
        }
    }

    /// Insert a particle, stamping its spawn order. Returns how many old particles were evicted.
    pub fn push(&mut self, mut particle: InkParticle) -> usize {
        particle.seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.particles.push_back(particle);

        let mut evicted = 0;
        while self.particles.len() > self.capacity {
            self.particles.pop_front();
            evicted += 1;
        }
        evicted
    }

    pub fn extend(&mut self, particles: impl IntoIterator<Item = InkParticle>) -> usize {
        particles.into_iter().map(|p| self.push(p)).sum()
    }

    /// Advance every particle by `ratio`, then drop the retired ones keeping survivor order.
    /// Returns the number dropped.
    pub fn advance(&mut self, ratio: f64) -> usize {
        let before = self.particles.len();
        self.particles.retain_mut(|p| {
            p.advance(ratio);
            !p.is_retired()
        });
        before - self.particles.len()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &InkParticle> {
        self.particles.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trail/pool.rs"]
mod tests;
