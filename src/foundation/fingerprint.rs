use kurbo::{BezPath, PathEl, Point};
use xxhash_rust::xxh3::Xxh3;

const XXH3_SEED: u64 = 0x6b1d_a4c3_5e0f_9127;

/// Stable 128-bit fingerprint of generated geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    pub hi: u64,
    pub lo: u64,
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

pub(crate) struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    pub(crate) fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    pub(crate) fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    pub(crate) fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    pub(crate) fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    pub(crate) fn write_point(&mut self, p: Point) {
        self.write_f64(p.x);
        self.write_f64(p.y);
    }

    pub(crate) fn write_path(&mut self, path: &BezPath) {
        self.write_u64(path.elements().len() as u64);
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => {
                    self.write_u8(0);
                    self.write_point(p);
                }
                PathEl::LineTo(p) => {
                    self.write_u8(1);
                    self.write_point(p);
                }
                PathEl::QuadTo(p1, p2) => {
                    self.write_u8(2);
                    self.write_point(p1);
                    self.write_point(p2);
                }
                PathEl::CurveTo(p1, p2, p3) => {
                    self.write_u8(3);
                    self.write_point(p1);
                    self.write_point(p2);
                    self.write_point(p3);
                }
                PathEl::ClosePath => self.write_u8(4),
            }
        }
    }

    pub(crate) fn finish(self) -> Fingerprint {
        let v = self.inner.digest128();
        Fingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}
