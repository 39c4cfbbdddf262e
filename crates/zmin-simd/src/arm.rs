// SPDX-License-Identifier: MIT OR Apache-2.0
//! NEON block kernel for aarch64.

use crate::vector::{compact_block_scalar, copy_block_whole};
use zmin_core::error::Result;

/// NEON 16-byte block kernel. Callers must only invoke this when
/// `is_aarch64_feature_detected!("neon")` has already returned true.
#[target_feature(enable = "neon")]
pub(crate) unsafe fn strip_block_neon(block: &[u8], out: &mut [u8], out_pos: &mut usize) -> Result<()> {
    use std::arch::aarch64::{
        uint8x16_t, vceqq_u8, vdupq_n_u8, vld1q_u8, vmaxvq_u8, vorrq_u8,
    };

    debug_assert_eq!(block.len(), 16);
    let data: uint8x16_t = unsafe { vld1q_u8(block.as_ptr()) };

    let is_space = unsafe { vceqq_u8(data, vdupq_n_u8(0x20)) };
    let is_tab = unsafe { vceqq_u8(data, vdupq_n_u8(0x09)) };
    let is_nl = unsafe { vceqq_u8(data, vdupq_n_u8(0x0A)) };
    let is_cr = unsafe { vceqq_u8(data, vdupq_n_u8(0x0D)) };
    let ws = unsafe { vorrq_u8(vorrq_u8(is_space, is_tab), vorrq_u8(is_nl, is_cr)) };

    // NEON has no direct movemask; a horizontal max across the lane-wise
    // compare result (0x00 or 0xFF per lane) is enough since we only need
    // a boolean "any whitespace in this block", not the lane positions.
    let any_ws = unsafe { vmaxvq_u8(ws) } != 0;

    if any_ws {
        compact_block_scalar(block, out, out_pos)
    } else {
        copy_block_whole(block, out, out_pos)
    }
}
