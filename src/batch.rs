//! Parallel helpers over independent core calls. Each item gets its
//! own compressor/decompressor state, so work distributes freely
//! across the rayon pool.

use crate::compress::Compressor;
use crate::decompress::Decompressor;
use crate::error::Result;
use rayon::prelude::*;

pub struct BatchCompressor {
    inner: Compressor,
}

impl BatchCompressor {
    pub fn new(level: u8) -> Result<Self> {
        Ok(Self {
            inner: Compressor::new(level)?,
        })
    }

    /// Raw-DEFLATE compress every input in parallel, preserving order.
    pub fn compress_batch(&self, inputs: &[&[u8]]) -> Vec<Vec<u8>> {
        inputs
            .par_iter()
            .map(|&input| self.inner.compress(input))
            .collect()
    }
}

#[derive(Default)]
pub struct BatchDecompressor;

impl BatchDecompressor {
    pub fn new() -> Self {
        Self
    }

    /// Decompress every input in parallel; `size_hints` presizes each
    /// output buffer. Per-item failures stay per-item.
    pub fn decompress_batch(
        &self,
        inputs: &[&[u8]],
        size_hints: &[usize],
    ) -> Vec<Result<Vec<u8>>> {
        inputs
            .par_iter()
            .zip(size_hints.par_iter())
            .map(|(&input, &hint)| Decompressor::new().decompress(input, Some(hint)))
            .collect()
    }
}
