use criterion::{black_box, criterion_group, criterion_main, Criterion};
use texport::{
    decode, encode_png, encode_wav, swap_red_blue, CanonicalImage, TextureFormat, WavFormat,
};

fn bench_decode(c: &mut Criterion) {
    let bc1 = vec![0u8; TextureFormat::Bc1.encoded_len(256, 256).unwrap()];
    let bc7 = vec![0u8; TextureFormat::Bc7.encoded_len(256, 256).unwrap()];
    let etc2 = vec![0u8; TextureFormat::Etc2A8.encoded_len(256, 256).unwrap()];
    let astc = TextureFormat::Astc { block_width: 6, block_height: 6 };
    let astc_data = vec![0u8; astc.encoded_len(256, 256).unwrap()];

    c.bench_function("decode_bc1_256", |b| {
        b.iter(|| decode(TextureFormat::Bc1, black_box(&bc1), 256, 256).unwrap())
    });
    c.bench_function("decode_bc7_256", |b| {
        b.iter(|| decode(TextureFormat::Bc7, black_box(&bc7), 256, 256).unwrap())
    });
    c.bench_function("decode_etc2a8_256", |b| {
        b.iter(|| decode(TextureFormat::Etc2A8, black_box(&etc2), 256, 256).unwrap())
    });
    c.bench_function("decode_astc6x6_256", |b| {
        b.iter(|| decode(astc, black_box(&astc_data), 256, 256).unwrap())
    });
}

fn bench_normalize(c: &mut Criterion) {
    let mut pixels = vec![0x7Fu8; 1024 * 1024];

    c.bench_function("swap_red_blue_1mb", |b| {
        b.iter(|| swap_red_blue(black_box(&mut pixels)))
    });
}

fn bench_encoders(c: &mut Criterion) {
    let image = CanonicalImage::from_rgba(256, 256, vec![0x5Au8; 256 * 256 * 4]).unwrap();
    let samples = vec![0u8; 1024 * 1024];

    c.bench_function("encode_png_256", |b| {
        b.iter(|| encode_png(black_box(&image)).unwrap())
    });
    c.bench_function("encode_wav_pcm16_1mb", |b| {
        b.iter(|| encode_wav(WavFormat::Pcm16, 44_100, 2, black_box(&samples)))
    });
}

criterion_group!(benches, bench_decode, bench_normalize, bench_encoders);
criterion_main!(benches);
