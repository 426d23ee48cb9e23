//! LZW decompressor: rebuilds the encoder's dictionary one code at a time
//! and reconstructs each code's byte sequence by walking its parent chain
//! back to a root and reversing, keeping the dictionary itself as a flat
//! `(parent_code, last_byte)` array rather than owned byte vectors.

use std::io::{BufReader, BufWriter, Read, Write};

use crate::bitio::BitReader;
use crate::error::{LzwError, LzwResult};
use crate::width::WidthTracker;
use crate::STREAM_END;

/// One dictionary slot: the byte appended to `parent`'s sequence to reach
/// this code, or `parent = None` for the 257 entries seeded at init
/// (the 256 single-byte roots plus the stream-end placeholder, whose
/// `byte` is never read — see `decompress`, which special-cases
/// `STREAM_END` before any dictionary lookup).
#[derive(Clone, Copy)]
struct DictEntry {
    parent: Option<u32>,
    byte: u8,
}

/// Array-of-pairs decoder dictionary (more memory-efficient than storing
/// a full owned byte sequence per code), plus the code-width state
/// shared with the encoder.
pub struct Decoder {
    dict: Vec<DictEntry>,
    next_code: u32,
    width: WidthTracker,
}

impl Decoder {
    pub fn new() -> LzwResult<Self> {
        let mut dec = Self {
            dict: Vec::with_capacity(4096),
            next_code: 0,
            width: WidthTracker::new(),
        };
        dec.init()?;
        Ok(dec)
    }

    fn insert(&mut self, parent: Option<u32>, byte: u8) -> LzwResult<u32> {
        let code = self.next_code;
        self.dict.push(DictEntry { parent, byte });
        self.next_code += 1;
        self.width.on_insert(self.next_code)?;
        Ok(code)
    }

    fn init(&mut self) -> LzwResult<()> {
        for b in 0..256u32 {
            self.insert(None, b as u8)?;
        }
        self.insert(None, 0)?; // stream-end placeholder, never read
        Ok(())
    }

    /// Reconstructs the full byte sequence for `code` by walking parent
    /// pointers back to a root and reversing.
    fn sequence(&self, code: u32) -> Vec<u8> {
        let mut rev = Vec::new();
        let mut cur = code;
        loop {
            let entry = self.dict[cur as usize];
            rev.push(entry.byte);
            match entry.parent {
                Some(p) => cur = p,
                None => break,
            }
        }
        rev.reverse();
        rev
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new().expect("initial dictionary never exceeds MAX_CODE_WIDTH")
    }
}

/// Decompresses `input` into `output`, returning `(bytes_in, bytes_out)`.
pub fn decompress<R: Read, W: Write>(input: R, output: W) -> LzwResult<(u64, u64)> {
    let mut dec = Decoder::new()?;
    let mut br = BitReader::new(BufReader::new(input), dec.width.width());
    let mut writer = BufWriter::new(output);

    let first = br
        .read()?
        .ok_or(LzwError::TruncatedStream)?;

    if first == STREAM_END {
        writer.flush()?;
        return Ok((br.bytes_read(), 0));
    }
    if first > STREAM_END {
        log::error!("bad first code {first} > next_code {}", dec.next_code);
        return Err(LzwError::InvalidCode {
            code: first,
            next_code: dec.next_code,
        });
    }

    let mut prev_code = first;
    let mut prev_seq = dec.sequence(first);
    let mut prev_seq_first = prev_seq[0];
    writer.write_all(&prev_seq)?;
    let mut out_count = prev_seq.len() as u64;

    loop {
        br.set_bits_per_read(dec.width.width());
        let code = br.read()?.ok_or(LzwError::TruncatedStream)?;
        if code == STREAM_END {
            break;
        }
        log::trace!("code: {code}");

        let (out_seq, first_byte) = if code < dec.next_code {
            let seq = dec.sequence(code);
            let f = seq[0];
            (seq, f)
        } else if code == dec.next_code {
            let mut seq = prev_seq.clone();
            seq.push(prev_seq_first);
            (seq, prev_seq_first)
        } else {
            log::error!("bad code {code} > next_code {}", dec.next_code);
            return Err(LzwError::InvalidCode {
                code,
                next_code: dec.next_code,
            });
        };

        dec.insert(Some(prev_code), first_byte)?;
        writer.write_all(&out_seq)?;
        out_count += out_seq.len() as u64;

        prev_code = code;
        prev_seq = out_seq;
        prev_seq_first = first_byte;
    }

    log::debug!("decompress: {out_count} bytes out, stream end at width {}", dec.width.width());
    writer.flush()?;
    Ok((br.bytes_read(), out_count))
}

/// Convenience wrapper over an in-memory buffer.
pub fn decompress_slice(input: &[u8]) -> LzwResult<Vec<u8>> {
    let mut out = Vec::new();
    decompress(input, &mut out)?;
    Ok(out)
}
