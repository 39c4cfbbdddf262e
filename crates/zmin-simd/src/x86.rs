// SPDX-License-Identifier: MIT OR Apache-2.0
//! SSE2 and AVX2 block kernels.

use crate::vector::{compact_block_scalar, copy_block_whole};
use zmin_core::error::Result;

/// SSE2 16-byte block kernel. SSE2 is guaranteed present on every x86_64
/// target, so this needs no runtime feature check of its own.
pub(crate) unsafe fn strip_block_sse2(block: &[u8], out: &mut [u8], out_pos: &mut usize) -> Result<()> {
    use std::arch::x86_64::{
        __m128i, _mm_cmpeq_epi8, _mm_loadu_si128, _mm_movemask_epi8, _mm_or_si128, _mm_set1_epi8,
    };

    debug_assert_eq!(block.len(), 16);
    let data: __m128i = unsafe { _mm_loadu_si128(block.as_ptr().cast()) };

    let is_space = unsafe { _mm_cmpeq_epi8(data, _mm_set1_epi8(0x20)) };
    let is_tab = unsafe { _mm_cmpeq_epi8(data, _mm_set1_epi8(0x09)) };
    let is_nl = unsafe { _mm_cmpeq_epi8(data, _mm_set1_epi8(0x0A)) };
    let is_cr = unsafe { _mm_cmpeq_epi8(data, _mm_set1_epi8(0x0D)) };
    let ws = unsafe {
        _mm_or_si128(_mm_or_si128(is_space, is_tab), _mm_or_si128(is_nl, is_cr))
    };
    let ws_mask = unsafe { _mm_movemask_epi8(ws) } & 0xFFFF;

    if ws_mask == 0 {
        copy_block_whole(block, out, out_pos)
    } else {
        compact_block_scalar(block, out, out_pos)
    }
}

/// AVX2 32-byte block kernel. Callers must only invoke this when
/// `is_x86_feature_detected!("avx2")` has already returned true.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn strip_block_avx2(block: &[u8], out: &mut [u8], out_pos: &mut usize) -> Result<()> {
    use std::arch::x86_64::{
        __m256i, _mm256_cmpeq_epi8, _mm256_loadu_si256, _mm256_movemask_epi8, _mm256_or_si256,
        _mm256_set1_epi8,
    };

    debug_assert_eq!(block.len(), 32);
    let data: __m256i = unsafe { _mm256_loadu_si256(block.as_ptr().cast()) };

    let is_space = unsafe { _mm256_cmpeq_epi8(data, _mm256_set1_epi8(0x20)) };
    let is_tab = unsafe { _mm256_cmpeq_epi8(data, _mm256_set1_epi8(0x09)) };
    let is_nl = unsafe { _mm256_cmpeq_epi8(data, _mm256_set1_epi8(0x0A)) };
    let is_cr = unsafe { _mm256_cmpeq_epi8(data, _mm256_set1_epi8(0x0D)) };
    let ws = unsafe {
        _mm256_or_si256(_mm256_or_si256(is_space, is_tab), _mm256_or_si256(is_nl, is_cr))
    };
    let ws_mask = unsafe { _mm256_movemask_epi8(ws) } as u32;

    if ws_mask == 0 {
        copy_block_whole(block, out, out_pos)
    } else {
        compact_block_scalar(block, out, out_pos)
    }
}
