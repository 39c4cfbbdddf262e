// SPDX-License-Identifier: MIT OR Apache-2.0
//! A [`zmin_stream::Sink`] backed by a fixed-capacity caller buffer, used
//! to run the Streaming strategy through the single-shot `minify` entry
//! point (`spec.md` §6) without requiring callers to drive `feed`/`finish`
//! themselves.

use zmin_core::error::{Result, ZminError};
use zmin_stream::Sink;

pub(crate) struct SliceSink<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> SliceSink<'a> {
    pub(crate) fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub(crate) const fn written(&self) -> usize {
        self.pos
    }
}

impl Sink for SliceSink<'_> {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let needed = self.pos + bytes.len();
        if needed > self.buf.len() {
            return Err(ZminError::OutputBufferTooSmall {
                needed,
                available: self.buf.len(),
            });
        }
        self.buf[self.pos..needed].copy_from_slice(bytes);
        self.pos = needed;
        Ok(())
    }
}
