use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use image_color_picker::{Color, PixelBuffer, PoolingStrategy, sample_color};

fn noise_buffer(size: u32) -> PixelBuffer {
    let mut state = 0x2545_F491_u32;
    PixelBuffer::from_fn(size, size, |_, _| {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        Color::from_packed(state)
    })
    .expect("benchmark buffer")
}

fn benchmark_pooling(c: &mut Criterion) {
    let buffer = noise_buffer(512);
    let mut group = c.benchmark_group("sample_color");

    for radius in [0, 4, 16] {
        for strategy in PoolingStrategy::ALL {
            group.bench_with_input(
                BenchmarkId::new(strategy.name(), radius),
                &radius,
                |b, &radius| {
                    b.iter(|| {
                        sample_color(&buffer, black_box(256), black_box(256), radius, strategy)
                            .expect("in-bounds sample")
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, benchmark_pooling);
criterion_main!(benches);
