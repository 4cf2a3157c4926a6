//! Round-trip tests against weezl, the reference GIF LZW decoder.

use oxigif_lzw::{LzwConfig, MAX_BLOCK_PAYLOAD, MAX_CODE_BITS, encode_raster};
use weezl::BitOrder;
use weezl::decode::Decoder as WeezlDecoder;

/// Strip the sub-block framing, checking its shape along the way.
fn dechunk(raster: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut pos = 0;
    loop {
        let len = raster[pos] as usize;
        assert!(len <= MAX_BLOCK_PAYLOAD, "over-long sub-block payload");
        pos += 1;
        if len == 0 {
            break;
        }
        out.extend_from_slice(&raster[pos..pos + len]);
        pos += len;
    }
    assert_eq!(pos, raster.len(), "bytes after the zero terminator");
    out
}

/// Reads a packed LSB-first code stream back, tracking the same width
/// growth and clear-code reset rules as the packer. Returns each code with
/// the width it was read at, ending with the end code.
struct CodeReader<'a> {
    data: &'a [u8],
    config: LzwConfig,
    bit_pos: usize,
    width: u8,
    threshold: u32,
    read: u32,
}

impl<'a> CodeReader<'a> {
    fn new(data: &'a [u8], config: LzwConfig) -> Self {
        Self {
            data,
            config,
            bit_pos: 0,
            width: config.init_code_len(),
            threshold: 2 * u32::from(config.init_dict_len()),
            read: 1,
        }
    }

    fn read_code(&mut self) -> (u16, u8) {
        let init = u32::from(self.config.init_dict_len());
        if self.width < MAX_CODE_BITS && self.read == self.threshold - init {
            self.width += 1;
            self.threshold *= 2;
        }
        let width = self.width;
        assert!(
            self.bit_pos + usize::from(width) <= self.data.len() * 8,
            "code stream ran past the packed bytes"
        );
        let mut value = 0u16;
        for i in 0..usize::from(width) {
            let bit = self.bit_pos + i;
            if self.data[bit / 8] >> (bit % 8) & 1 == 1 {
                value |= 1 << i;
            }
        }
        self.bit_pos += usize::from(width);
        self.read += 1;
        if value == self.config.clear_code() {
            self.width = self.config.init_code_len();
            self.threshold = 2 * init;
            self.read = 1;
        }
        (value, width)
    }

    fn read_all(mut self) -> Vec<(u16, u8)> {
        let mut codes = Vec::new();
        loop {
            let (code, width) = self.read_code();
            codes.push((code, width));
            if code == self.config.end_code() {
                return codes;
            }
        }
    }
}

fn decode(raster: &[u8], palette_size: u16) -> Vec<u8> {
    let config = LzwConfig::for_palette(palette_size).unwrap();
    let mut decoder = WeezlDecoder::new(BitOrder::Lsb, config.min_code_size());
    decoder.decode(&dechunk(raster)).expect("weezl rejected the stream")
}

fn roundtrip(pixels: &[u8], palette_size: u16) {
    let raster = encode_raster(pixels, palette_size).unwrap();
    assert_eq!(decode(&raster, palette_size), pixels);
}

/// Reproducible pseudo-random indices below `limit`.
fn random_indices(len: usize, limit: u16) -> Vec<u8> {
    let mut data = Vec::with_capacity(len);
    let mut seed: u64 = 0x123456789ABCDEF0;
    for _ in 0..len {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        data.push(((seed >> 32) as u16 % limit) as u8);
    }
    data
}

#[test]
fn test_roundtrip_uniform() {
    roundtrip(&vec![0xAA; 10_000], 256);
}

#[test]
fn test_roundtrip_gradient() {
    let pixels: Vec<u8> = (0..50_000u32).map(|i| (i / 200) as u8).collect();
    roundtrip(&pixels, 256);
}

#[test]
fn test_roundtrip_random_full_palette() {
    roundtrip(&random_indices(64 * 1024, 256), 256);
}

#[test]
fn test_roundtrip_random_small_palette() {
    roundtrip(&random_indices(16 * 1024, 16), 16);
}

#[test]
fn test_roundtrip_repeated_phrase() {
    let pixels: Vec<u8> = b"TOBEORNOTTOBEORTOBEORNOT"
        .iter()
        .copied()
        .cycle()
        .take(30_000)
        .collect();
    roundtrip(&pixels, 256);
}

#[test]
fn test_roundtrip_single_pixel() {
    roundtrip(&[0], 256);
    roundtrip(&[255], 256);
}

#[test]
fn test_empty_input_decodes_to_empty() {
    let raster = encode_raster(&[], 256).unwrap();
    assert_eq!(decode(&raster, 256), Vec::<u8>::new());

    let config = LzwConfig::FULL_PALETTE;
    let codes = CodeReader::new(&dechunk(&raster), config).read_all();
    assert_eq!(codes, vec![(256, 9), (257, 9)]);
}

#[test]
fn test_run_of_zeros_starts_with_clear_code() {
    let pixels = [0u8, 0, 0, 0, 0];
    let raster = encode_raster(&pixels, 256).unwrap();
    assert_eq!(decode(&raster, 256), pixels);

    let codes = CodeReader::new(&dechunk(&raster), LzwConfig::FULL_PALETTE).read_all();
    assert_eq!(codes[0].0, 256, "stream must open with the clear code");
    assert_eq!(codes.last().unwrap().0, 257);
}

#[test]
fn test_forced_dictionary_reset() {
    // Every ordered pair of palette indices, back to back: far more distinct
    // two-symbol patterns than the code space holds, forcing resets.
    let mut pixels = Vec::with_capacity(2 * 256 * 256);
    for a in 0u16..256 {
        for b in 0u16..256 {
            pixels.push(a as u8);
            pixels.push(b as u8);
        }
    }
    let raster = encode_raster(&pixels, 256).unwrap();
    assert_eq!(decode(&raster, 256), pixels);

    let config = LzwConfig::FULL_PALETTE;
    let codes = CodeReader::new(&dechunk(&raster), config).read_all();
    let clears: Vec<usize> = codes
        .iter()
        .enumerate()
        .filter(|&(_, &(code, _))| code == config.clear_code())
        .map(|(i, _)| i)
        .collect();
    assert!(clears.len() >= 2, "expected at least one mid-stream reset");
    assert_eq!(clears[0], 0);

    // Every code after a clear adds one dictionary entry, so the code space
    // (4096 - 258 = 3838 learned entries) fills after 3838 codes; the next
    // miss emits one more code and then the clear.
    assert_eq!(clears[1], 3840);

    // Width is maxed out just before the reset and back at the initial
    // width immediately after.
    assert_eq!(codes[clears[1]].1, MAX_CODE_BITS);
    assert_eq!(codes[clears[1] + 1].1, config.init_code_len());
}

#[test]
fn test_million_symbol_input_caps_width() {
    let pixels = vec![5u8; 1_000_000];
    let raster = encode_raster(&pixels, 256).unwrap();
    assert_eq!(decode(&raster, 256), pixels);

    let codes = CodeReader::new(&dechunk(&raster), LzwConfig::FULL_PALETTE).read_all();
    assert!(codes.iter().all(|&(_, width)| width <= MAX_CODE_BITS));
}

#[test]
fn test_two_color_alternating_stream() {
    // Palette of 2: 3-bit initial codes over a 2-entry alphabet. Too small
    // for weezl, so the code stream is checked directly: only dense-table
    // lookups are involved.
    let config = LzwConfig::for_palette(2).unwrap();
    let raster = encode_raster(&[0, 1, 0, 1, 0, 1], 2).unwrap();
    assert_eq!(raster, vec![3, 0x42, 0x10, 0x0D, 0]);

    let codes = CodeReader::new(&dechunk(&raster), config).read_all();
    assert_eq!(
        codes,
        vec![(2, 3), (0, 3), (1, 4), (4, 4), (4, 4), (3, 4)]
    );
}

#[test]
fn test_sub_block_shape_on_large_stream() {
    let raster = encode_raster(&random_indices(200_000, 256), 256).unwrap();
    assert_eq!(*raster.last().unwrap(), 0);
    // dechunk asserts payload lengths and terminator placement.
    let packed = dechunk(&raster);
    assert!(!packed.is_empty());
}

#[test]
fn test_concurrent_encodes_share_nothing() {
    let pixels = random_indices(20_000, 256);
    let expected = encode_raster(&pixels, 256).unwrap();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let pixels = pixels.clone();
            std::thread::spawn(move || encode_raster(&pixels, 256).unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
