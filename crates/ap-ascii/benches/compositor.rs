use ap_ascii::compositor::Compositor;
use ap_core::charset::palette_or_default;
use ap_core::frame::FrameBuffer;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn noise_frame(w: u32, h: u32) -> FrameBuffer {
    let mut seed = 0x1234_5678_u32;
    let pixels: Vec<_> = (0..w * h)
        .map(|_| {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let [r, g, b, _] = seed.to_le_bytes();
            (r, g, b)
        })
        .collect();
    FrameBuffer::from_rgb(w, h, &pixels).unwrap_or_else(|| FrameBuffer::new(w, h))
}

fn bench_compositor(c: &mut Criterion) {
    let frame = noise_frame(200, 60);
    let compositor = Compositor::new(palette_or_default("a"));
    c.bench_function("compositor_200x60", |b| {
        b.iter(|| compositor.convert(black_box(&frame)));
    });

    let braille = Compositor::new(palette_or_default("k"));
    c.bench_function("compositor_braille_200x60", |b| {
        b.iter(|| braille.convert(black_box(&frame)));
    });
}

criterion_group!(benches, bench_compositor);
criterion_main!(benches);
