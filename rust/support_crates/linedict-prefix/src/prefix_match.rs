//! Fast prefix check using AVX2 instructions when available.
//!
//! Every variant in this module returns exactly what a plain byte-by-byte comparison
//! returns; the fast paths differ only in how many bytes they compare per step.

use arrayref::{array_ref, array_refs};

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::{__m256i, _mm256_cmpeq_epi8, _mm256_loadu_si256, _mm256_movemask_epi8};

/// Number of bytes compared per wide-register step.
pub const BLOCK_SIZE: usize = 32;

/// The comparison strategy selected by [`matches`] on the current machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FastPathKind {
    /// 256-bit AVX2 equality.
    Avx2,
    /// Four 64-bit word comparisons per block.
    Words,
}

impl FastPathKind {
    pub fn detect() -> FastPathKind {
        #[cfg(target_arch = "x86_64")]
        {
            if std::arch::is_x86_feature_detected!("avx2") {
                return FastPathKind::Avx2;
            }
        }
        FastPathKind::Words
    }

    /// Returns true if `content` starts with `prefix`, comparing whole blocks with
    /// this strategy. `Avx2` falls back to `Words` on CPUs without AVX2.
    #[inline]
    pub fn matches(self, content: &[u8], prefix: &[u8]) -> bool {
        if content.len() < prefix.len() {
            return false;
        }
        match self {
            #[cfg(target_arch = "x86_64")]
            FastPathKind::Avx2 if std::arch::is_x86_feature_detected!("avx2") => unsafe {
                matches_avx2(content, prefix)
            },
            _ => matches_words(content, prefix),
        }
    }
}

/// Returns true if `content` starts with `prefix`.
/// Uses the fastest available implementation for the current platform.
#[inline]
pub fn matches(content: &[u8], prefix: &[u8]) -> bool {
    FastPathKind::detect().matches(content, prefix)
}

/// Returns true if `content` starts with `prefix`, comparing in wide blocks
/// when `use_fast_path` is set and byte by byte otherwise.
#[inline]
pub fn matches_with(content: &[u8], prefix: &[u8], use_fast_path: bool) -> bool {
    if use_fast_path {
        matches(content, prefix)
    } else {
        matches_bytewise(content, prefix)
    }
}

/// Reference implementation: compares one byte at a time.
#[inline]
pub fn matches_bytewise(content: &[u8], prefix: &[u8]) -> bool {
    if content.len() < prefix.len() {
        return false;
    }
    bytes_eq(&content[..prefix.len()], prefix)
}

/// Requires `content.len() >= prefix.len()`; loads never go past `prefix.len()`
/// in either slice.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
#[inline]
unsafe fn matches_avx2(content: &[u8], prefix: &[u8]) -> bool {
    debug_assert!(content.len() >= prefix.len());
    let len = prefix.len();
    let c = content.as_ptr();
    let p = prefix.as_ptr();
    let mut i = 0;

    while i + BLOCK_SIZE <= len {
        unsafe {
            let content_block = _mm256_loadu_si256(c.add(i) as *const __m256i);
            let prefix_block = _mm256_loadu_si256(p.add(i) as *const __m256i);
            let eq = _mm256_cmpeq_epi8(content_block, prefix_block);
            if _mm256_movemask_epi8(eq) != -1 {
                return false;
            }
        }
        i += BLOCK_SIZE;
    }

    bytes_eq(&content[i..len], &prefix[i..])
}

/// Portable fast path: each 32-byte block is compared as four `u64` words.
#[inline]
fn matches_words(content: &[u8], prefix: &[u8]) -> bool {
    debug_assert!(content.len() >= prefix.len());
    let mut content_blocks = content[..prefix.len()].chunks_exact(BLOCK_SIZE);
    let mut prefix_blocks = prefix.chunks_exact(BLOCK_SIZE);
    for (c, p) in content_blocks.by_ref().zip(prefix_blocks.by_ref()) {
        if !block_eq(array_ref![c, 0, BLOCK_SIZE], array_ref![p, 0, BLOCK_SIZE]) {
            return false;
        }
    }
    bytes_eq(content_blocks.remainder(), prefix_blocks.remainder())
}

#[inline]
fn block_eq(a: &[u8; BLOCK_SIZE], b: &[u8; BLOCK_SIZE]) -> bool {
    let (a0, a1, a2, a3) = array_refs![a, 8, 8, 8, 8];
    let (b0, b1, b2, b3) = array_refs![b, 8, 8, 8, 8];
    (u64::from_ne_bytes(*a0) ^ u64::from_ne_bytes(*b0))
        | (u64::from_ne_bytes(*a1) ^ u64::from_ne_bytes(*b1))
        | (u64::from_ne_bytes(*a2) ^ u64::from_ne_bytes(*b2))
        | (u64::from_ne_bytes(*a3) ^ u64::from_ne_bytes(*b3))
        == 0
}

/// Tail comparison, one byte at a time. Slices must have equal length.
#[inline]
fn bytes_eq(a: &[u8], b: &[u8]) -> bool {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).all(|(x, y)| x == y)
}
