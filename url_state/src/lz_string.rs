//! LZ-string compatible compression to and from base64.
//!
//! Tokens match what `LZString.compressToBase64` produces in the browser, so a fragment
//! written by either side decodes on the other. Input is handled as UTF-16 code units,
//! like JavaScript strings.

use std::collections::{HashMap, HashSet};


const BASE64_ALPHABET: &[u8; 65] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/=";
const BITS_PER_CHAR: u32 = 6;
const READ_RESET_VALUE: u32 = 1 << (BITS_PER_CHAR - 1);

// reserved codes in the compressed stream
const CODE_CHAR_8: u32 = 0;
const CODE_CHAR_16: u32 = 1;
const CODE_END: u32 = 2;


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LzStringError {
    InvalidCharacter(char),
    UnexpectedEnd,
    InvalidCode(u32),
    InvalidUtf16,
}

impl std::fmt::Display for LzStringError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCharacter(c) => write!(f, "Invalid base64 character: {:?}", c),
            Self::UnexpectedEnd => write!(f, "Compressed stream ended before the end marker"),
            Self::InvalidCode(code) => write!(f, "Invalid dictionary code in compressed stream: {}", code),
            Self::InvalidUtf16 => write!(f, "Decompressed data is not valid UTF-16"),
        }
    }
}

impl std::error::Error for LzStringError {}


pub fn compress_to_base64(input: &str) -> String {
    let units = input.encode_utf16().collect::<Vec<u16>>();
    let mut out = compress(&units)
        .into_iter()
        .map(|value| BASE64_ALPHABET[value as usize] as char)
        .collect::<String>();
    match out.len() % 4 {
        1 => out.push_str("==="),
        2 => out.push_str("=="),
        3 => out.push('='),
        _ => {}
    }
    out
}

pub fn decompress_from_base64(input: &str) -> Result<String, LzStringError> {
    let values = input
        .chars()
        .map(|c| base64_value(c).ok_or(LzStringError::InvalidCharacter(c)))
        .collect::<Result<Vec<u8>, _>>()?;
    if values.is_empty() {
        return Err(LzStringError::UnexpectedEnd);
    }
    let units = decompress(&values)?;
    String::from_utf16(&units).map_err(|_| LzStringError::InvalidUtf16)
}

fn base64_value(c: char) -> Option<u8> {
    if !c.is_ascii() {
        return None;
    }
    BASE64_ALPHABET.iter().position(|b| *b == c as u8).map(|p| p as u8)
}


struct BitWriter {
    val: u32,
    position: u32,
    out: Vec<u8>,
}

impl BitWriter {
    fn write_bit(&mut self, bit: u32) {
        self.val = (self.val << 1) | bit;
        if self.position == BITS_PER_CHAR - 1 {
            self.position = 0;
            self.out.push(self.val as u8);
            self.val = 0;
        } else {
            self.position += 1;
        }
    }

    /// Writes the `count` low bits of `value`, least significant first.
    fn write_bits(&mut self, mut value: u32, count: u32) {
        for _ in 0..count {
            self.write_bit(value & 1);
            value >>= 1;
        }
    }

    /// Pads the pending char with zeros. Always emits at least one extra char,
    /// which the browser implementation does too.
    fn finish(mut self) -> Vec<u8> {
        loop {
            self.val <<= 1;
            if self.position == BITS_PER_CHAR - 1 {
                self.out.push(self.val as u8);
                break;
            }
            self.position += 1;
        }
        self.out
    }
}


struct Compressor {
    dictionary: HashMap<Vec<u16>, u32>,
    // single chars seen but not yet written literally
    pending_literals: HashSet<Vec<u16>>,
    enlarge_in: u32,
    dict_size: u32,
    num_bits: u32,
    writer: BitWriter,
}

impl Compressor {
    fn new() -> Self {
        Self {
            dictionary: HashMap::new(),
            pending_literals: HashSet::new(),
            enlarge_in: 2,
            dict_size: 3,
            num_bits: 2,
            writer: BitWriter { val: 0, position: 0, out: Vec::new() },
        }
    }

    fn add_entry(&mut self, phrase: Vec<u16>) {
        self.dictionary.insert(phrase, self.dict_size);
        self.dict_size += 1;
    }

    fn decrement_enlarge_in(&mut self) {
        self.enlarge_in -= 1;
        if self.enlarge_in == 0 {
            self.enlarge_in = 1 << self.num_bits;
            self.num_bits += 1;
        }
    }

    fn emit_phrase(&mut self, phrase: &[u16]) {
        if self.pending_literals.remove(phrase) {
            let unit = phrase[0] as u32;
            if unit < 256 {
                self.writer.write_bits(CODE_CHAR_8, self.num_bits);
                self.writer.write_bits(unit, 8);
            } else {
                self.writer.write_bits(CODE_CHAR_16, self.num_bits);
                self.writer.write_bits(unit, 16);
            }
            self.decrement_enlarge_in();
        } else {
            let code = self.dictionary.get(phrase).copied().unwrap_or(CODE_END);
            self.writer.write_bits(code, self.num_bits);
        }
        self.decrement_enlarge_in();
    }
}

fn compress(units: &[u16]) -> Vec<u8> {
    let mut compressor = Compressor::new();
    let mut w: Vec<u16> = Vec::new();

    for &unit in units {
        let single = vec![unit];
        if !compressor.dictionary.contains_key(&single) {
            compressor.add_entry(single.clone());
            compressor.pending_literals.insert(single);
        }

        let mut wc = w.clone();
        wc.push(unit);
        if compressor.dictionary.contains_key(&wc) {
            w = wc;
        } else {
            compressor.emit_phrase(&w);
            compressor.add_entry(wc);
            w = vec![unit];
        }
    }

    if !w.is_empty() {
        compressor.emit_phrase(&w);
    }

    let num_bits = compressor.num_bits;
    compressor.writer.write_bits(CODE_END, num_bits);
    compressor.writer.finish()
}


struct BitReader<'a> {
    values: &'a [u8],
    val: u32,
    position: u32,
    index: usize,
}

impl<'a> BitReader<'a> {
    fn new(values: &'a [u8]) -> Self {
        Self {
            values,
            val: values.first().copied().unwrap_or(0) as u32,
            position: READ_RESET_VALUE,
            index: 1,
        }
    }

    /// Reads `count` bits, least significant first. Reading past the end yields zeros.
    fn read_bits(&mut self, count: u32) -> u32 {
        let mut bits = 0;
        for i in 0..count {
            let bit = self.val & self.position;
            self.position >>= 1;
            if self.position == 0 {
                self.position = READ_RESET_VALUE;
                self.val = self.values.get(self.index).copied().unwrap_or(0) as u32;
                self.index += 1;
            }
            if bit > 0 {
                bits |= 1 << i;
            }
        }
        bits
    }

    fn exhausted(&self) -> bool {
        self.index > self.values.len()
    }
}

fn decompress(values: &[u8]) -> Result<Vec<u16>, LzStringError> {
    let mut reader = BitReader::new(values);
    // codes 0..=2 are reserved, their slots stay empty
    let mut dictionary: Vec<Vec<u16>> = vec![Vec::new(), Vec::new(), Vec::new()];
    let mut enlarge_in: u32 = 4;
    let mut num_bits: u32 = 3;

    let first = match reader.read_bits(2) {
        CODE_CHAR_8 => reader.read_bits(8) as u16,
        CODE_CHAR_16 => reader.read_bits(16) as u16,
        CODE_END => return Ok(Vec::new()),
        code => return Err(LzStringError::InvalidCode(code)),
    };
    dictionary.push(vec![first]);
    let mut w = vec![first];
    let mut result = w.clone();

    loop {
        if reader.exhausted() {
            return Err(LzStringError::UnexpectedEnd);
        }

        let mut code = reader.read_bits(num_bits);
        match code {
            CODE_CHAR_8 | CODE_CHAR_16 => {
                let width = if code == CODE_CHAR_8 { 8 } else { 16 };
                let unit = reader.read_bits(width) as u16;
                dictionary.push(vec![unit]);
                code = (dictionary.len() - 1) as u32;
                enlarge_in -= 1;
            }
            CODE_END => return Ok(result),
            _ => {}
        }

        if enlarge_in == 0 {
            enlarge_in = 1 << num_bits;
            num_bits += 1;
        }

        let index = code as usize;
        let entry = if (3..dictionary.len()).contains(&index) {
            dictionary[index].clone()
        } else if index == dictionary.len() {
            let mut entry = w.clone();
            entry.push(w[0]);
            entry
        } else {
            return Err(LzStringError::InvalidCode(code));
        };
        result.extend_from_slice(&entry);

        let mut next = w;
        next.push(entry[0]);
        dictionary.push(next);
        enlarge_in -= 1;
        w = entry;

        if enlarge_in == 0 {
            enlarge_in = 1 << num_bits;
            num_bits += 1;
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_compresses_to_end_marker_only() {
        assert_eq!(compress_to_base64(""), "Q===");
        assert_eq!(decompress_from_base64("Q===").unwrap(), "");
    }

    #[test]
    fn matches_browser_tokens() {
        assert_eq!(compress_to_base64("hello"), "BYUwNmD2Q===");
        assert_eq!(decompress_from_base64("BYUwNmD2Q===").unwrap(), "hello");
    }

    #[test]
    fn output_is_padded_to_quads() {
        for input in ["a", "ab", "abc", "hello hello hello", r#"{"view":"table"}"#] {
            let token = compress_to_base64(input);
            assert_eq!(token.len() % 4, 0, "token for {input:?}: {token}");
            assert!(token.chars().all(|c| c.is_ascii_alphanumeric() || "+/=".contains(c)));
        }
    }

    #[test]
    fn repetitive_input_round_trips() {
        let input = "ababababababababababababababab".repeat(20);
        let token = compress_to_base64(&input);
        assert!(token.len() < input.len());
        assert_eq!(decompress_from_base64(&token).unwrap(), input);
    }

    #[test]
    fn non_latin_input_round_trips() {
        let input = "Petits écrans (< 32\") 📺 téléviseurs";
        let token = compress_to_base64(input);
        assert_eq!(decompress_from_base64(&token).unwrap(), input);
    }

    #[test]
    fn rejects_characters_outside_alphabet() {
        assert_eq!(
            decompress_from_base64("invalid-base64"),
            Err(LzStringError::InvalidCharacter('-'))
        );
    }

    #[test]
    fn rejects_empty_and_truncated_streams() {
        assert_eq!(decompress_from_base64(""), Err(LzStringError::UnexpectedEnd));
        let payload = "some longer payload that spans several chars";
        let token = compress_to_base64(payload);
        assert!(decompress_from_base64(&token[..4]).is_err());
        assert_ne!(decompress_from_base64(&token[..token.len() - 8]).ok().as_deref(), Some(payload));
    }
}
