//! Approximate membership filter in front of the exact set.
//!
//! Each fingerprint sets two bits, `h1 mod size` and `h2 mod size`. A check
//! passes only when both bits are set: added fingerprints always pass, and
//! unrelated ones occasionally do too.

use perceptual::Fingerprint;
use roaring::RoaringBitmap;

#[derive(Debug, Clone, PartialEq)]
pub struct ApproximateFilter {
    bits: RoaringBitmap,
    size: u32,
}

impl ApproximateFilter {
    /// Create an empty filter with `size` addressable bits (at least one).
    pub fn new(size: u32) -> Self {
        Self {
            bits: RoaringBitmap::new(),
            size: size.max(1),
        }
    }

    #[inline]
    fn positions(&self, fp: &Fingerprint) -> (u32, u32) {
        let size = u64::from(self.size);
        ((fp.h1 % size) as u32, (fp.h2 % size) as u32)
    }

    pub fn add(&mut self, fp: &Fingerprint) {
        let (a, b) = self.positions(fp);
        self.bits.insert(a);
        self.bits.insert(b);
    }

    pub fn check(&self, fp: &Fingerprint) -> bool {
        let (a, b) = self.positions(fp);
        self.bits.contains(a) && self.bits.contains(b)
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of bits currently set.
    pub fn bits_set(&self) -> u64 {
        self.bits.len()
    }
}
