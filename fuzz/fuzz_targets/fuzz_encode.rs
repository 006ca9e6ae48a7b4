#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmpwriter::*;

fn u32_at(b: &[u8], o: usize) -> u32 {
    u32::from_le_bytes([b[o], b[o + 1], b[o + 2], b[o + 3]])
}

fuzz_target!(|data: &[u8]| {
    // [width, height, mode, mask bytes...], then BGR pixels
    let [w, h, mode, m0, m1, m2, pixels @ ..] = data else {
        return;
    };
    let (w, h) = (u32::from(*w % 64) + 1, u32::from(*h % 64) + 1);
    let mut buf = PixelBuffer::new(w, h).unwrap();
    for (i, px) in pixels.chunks_exact(3).take((w * h) as usize).enumerate() {
        let (x, y) = (i as u32 % w, i as u32 / w);
        buf.set(x, y, px[2], px[1], px[0]).unwrap();
    }

    let masks = ChannelMasks::new(u32::from(*m0) << 16, u32::from(*m1) << 8, u32::from(*m2));
    let request = match mode % 8 {
        0 => EncodeRequest::bmp24(),
        1 => EncodeRequest::gray(ColorBit::Bit1),
        2 => EncodeRequest::gray(ColorBit::Bit4),
        3 => EncodeRequest::indexed(ColorBit::Bit4, Compression::Rle4),
        4 => EncodeRequest::gray(ColorBit::Bit8),
        5 => EncodeRequest::bitfields(ColorBit::Bit16, masks),
        6 => EncodeRequest::bitfields(ColorBit::Bit32, masks),
        _ => EncodeRequest::rgb888(),
    };

    let encoded = request.encode(&buf, enough::Unstoppable).expect("valid request must encode");
    assert_eq!(&encoded[..2], b"BM");
    assert_eq!(u32_at(&encoded, 2) as usize, encoded.len());
    let offset = u32_at(&encoded, 10) as usize;
    assert_eq!(u32_at(&encoded, 34) as usize, encoded.len() - offset);
    assert_eq!((encoded.len() - offset) % h as usize, 0);
    assert_eq!(((encoded.len() - offset) / h as usize) % 4, 0, "rows must be 4-byte aligned");
});
