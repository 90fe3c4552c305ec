//! Bit-granular sink and source over byte streams.
//!
//! Bits are packed most-significant first. The final byte written by
//! [`BitWriter::finish`] is filled with the padding bit (zero unless set
//! with [`BitWriter::set_padding`]); readers never look at the padding
//! because decoding stops at the end-of-stream code.

use std::io::{self, Read, Write};

pub struct BitWriter<W: Write> {
    inner: W,
    current: u8,
    filled: u8,
    bits_written: u64,
    padding: bool,
}

impl<W: Write> BitWriter<W> {
    pub fn new(inner: W) -> Self {
        BitWriter {
            inner,
            current: 0,
            filled: 0,
            bits_written: 0,
            padding: false,
        }
    }

    /// State only advances once a completed byte has been written, so a
    /// failed write can be retried with the same bit.
    pub fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        let mut current = self.current;
        if bit {
            current |= 1 << (7 - self.filled);
        }
        if self.filled == 7 {
            self.inner.write_all(&[current])?;
            self.current = 0;
            self.filled = 0;
        } else {
            self.current = current;
            self.filled += 1;
        }
        self.bits_written += 1;
        Ok(())
    }

    /// Bit used to fill the unused tail of the final byte.
    pub fn set_padding(&mut self, bit: bool) {
        self.padding = bit;
    }

    pub fn write_bits(&mut self, bits: &[bool]) -> io::Result<()> {
        for &bit in bits {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Flushes any partial byte and hands back the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        if self.filled > 0 {
            if self.padding {
                self.current |= 0xFF >> self.filled;
            }
            self.inner.write_all(&[self.current])?;
            self.current = 0;
            self.filled = 0;
        }
        self.inner.flush()?;
        Ok(self.inner)
    }
}

pub struct BitReader<R: Read> {
    inner: R,
    current: u8,
    remaining: u8,
    bits_read: u64,
}

impl<R: Read> BitReader<R> {
    pub fn new(inner: R) -> Self {
        BitReader {
            inner,
            current: 0,
            remaining: 0,
            bits_read: 0,
        }
    }

    /// Next bit, or `None` once the underlying stream is exhausted.
    pub fn read_bit(&mut self) -> io::Result<Option<bool>> {
        if self.remaining == 0 {
            let mut byte = [0u8; 1];
            loop {
                match self.inner.read(&mut byte) {
                    Ok(0) => return Ok(None),
                    Ok(_) => break,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                }
            }
            self.current = byte[0];
            self.remaining = 8;
        }
        self.remaining -= 1;
        self.bits_read += 1;
        Ok(Some((self.current >> self.remaining) & 1 == 1))
    }

    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }
}
