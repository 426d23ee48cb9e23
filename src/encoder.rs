//! LZW compressor: greedy longest-match encoding over an insert-only
//! dictionary, emitting variable-width codes with no clear code and no
//! dictionary reset.

use std::collections::HashMap;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};

use crate::bitio::BitWriter;
use crate::error::LzwResult;
use crate::width::WidthTracker;
use crate::STREAM_END;

/// Sentinel parent code for length-1 sequences (the empty prefix).
const ROOT: i64 = -1;

/// Insert-only `(parent, edge) -> child` dictionary plus the code-width
/// state it shares with the decoder.
pub struct Encoder {
    dict: HashMap<(i64, u32), u32>,
    next_code: u32,
    width: WidthTracker,
}

impl Encoder {
    pub fn new() -> LzwResult<Self> {
        let mut enc = Self {
            dict: HashMap::with_capacity(4096),
            next_code: 0,
            width: WidthTracker::new(),
        };
        enc.init()?;
        Ok(enc)
    }

    fn insert(&mut self, parent: i64, edge: u32) -> LzwResult<u32> {
        let code = self.next_code;
        self.dict.insert((parent, edge), code);
        self.next_code += 1;
        self.width.on_insert(self.next_code)?;
        Ok(code)
    }

    fn init(&mut self) -> LzwResult<()> {
        for b in 0..256u32 {
            self.insert(ROOT, b)?;
        }
        self.insert(ROOT, STREAM_END)?;
        Ok(())
    }

    pub fn code_width(&self) -> u32 {
        self.width.width()
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new().expect("initial dictionary never exceeds MAX_CODE_WIDTH")
    }
}

/// Compresses `input` into `output`, returning `(bytes_in, bytes_out)`.
pub fn compress<R: Read, W: Write>(input: R, output: W) -> LzwResult<(u64, u64)> {
    let mut reader = BufReader::new(input);
    let mut enc = Encoder::new()?;
    let mut bw = BitWriter::new(BufWriter::new(output));

    let mut parent: i64 = ROOT;
    let mut in_count: u64 = 0;
    let mut byte = [0u8; 1];

    loop {
        match reader.read_exact(&mut byte) {
            Ok(()) => {
                in_count += 1;
                let c = byte[0] as u32;
                if let Some(&code) = enc.dict.get(&(parent, c)) {
                    parent = code as i64;
                } else {
                    bw.write(parent as u32, enc.width.width())?;
                    log::trace!("code: {parent}");
                    enc.insert(parent, c)?;
                    parent = enc.dict[&(ROOT, c)] as i64;
                }
            }
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e.into()),
        }
    }

    if in_count > 0 {
        bw.write(parent as u32, enc.width.width())?;
    }
    bw.write(STREAM_END, enc.width.width())?;
    log::debug!("compress: {in_count} bytes in, stream end at width {}", enc.width.width());
    let out_count = bw.close()?;
    Ok((in_count, out_count))
}

/// Convenience wrapper over an in-memory buffer.
pub fn compress_slice(input: &[u8]) -> LzwResult<Vec<u8>> {
    let mut out = Vec::new();
    compress(input, &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    proptest! {
        #[test]
        fn dictionary_is_always_a_dense_prefix(
            edges in prop::collection::hash_set(300u32..50_000, 1..150)
        ) {
            let mut enc = Encoder::new().unwrap();
            for edge in edges {
                enc.insert(ROOT, edge).unwrap();
                let mut codes: Vec<u32> = enc.dict.values().copied().collect();
                codes.sort_unstable();
                let expected: Vec<u32> = (0..enc.next_code).collect();
                prop_assert_eq!(codes, expected);
            }
        }
    }

    #[test]
    fn s1_empty_input() {
        let out = compress_slice(b"").unwrap();
        assert_eq!(hex(&out), "8000");
    }

    #[test]
    fn s2_single_byte() {
        let out = compress_slice(b"A").unwrap();
        assert_eq!(hex(&out), "20c000");
    }

    #[test]
    fn s3_repeated_pair() {
        let out = compress_slice(b"AA").unwrap();
        assert_eq!(hex(&out), "20906000");
    }

    #[test]
    fn s4_alternating() {
        let out = compress_slice(b"ABAB").unwrap();
        assert_eq!(hex(&out), "2090a03000");
    }

    #[test]
    fn s5_all_byte_values_widens_code_width() {
        let input: Vec<u8> = (0..=255u8).collect();
        let out = compress_slice(&input).unwrap();
        assert_eq!(out.len(), 290);
        let expected = concat!(
            "000040403020140c0704024140b060341c0f0804424130a0542c170c064341b0e0743c1f100844423",
            "1209",
            "44c27140a4542b160b45c2f180c464331a0d46c371c0e4743b1e0f47c3f201048443221148c47241",
            "24944b261349",
            "c4f28144a4532a154ac572c164b45b2e174bc5f30184c46332194cc67341a4d46b361b4dc6f381c4e4733a1d4ec77",
            "3c1e4f47b3e1f4fc7f402050483422150c8744225148b462351c8f4824524934a2552c974c265349b4e2753c9f502",
            "8544a3522954ca7542a554ab562b55caf582c564b35a2d56cb75c2e574bb5e2f57cbf6030584c3623158cc7643259",
            "4cb663359ccf68345a4d36a355acd76c365b4db6e375bcdf70385c4e372395cce7743a5d4eb763b5dcef783c5e4f37",
            "a3d5ecf77c3e5f4fb7e3f5fc7fa000",
        );
        assert_eq!(hex(&out), expected);
    }
}
