use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;

use bxf_image::{Image, ImageSize};
use bxf_imgproc::{
    filter::{CbfScale, CrossBilateralConfig, CrossBilateralFilter},
    parallel::ExecutionStrategy,
};

fn bench_cbf(c: &mut Criterion) {
    let mut group = c.benchmark_group("Cross Bilateral Filter");
    let mut rng = rand::rng();

    for (width, height) in [(160, 120), (320, 240), (561, 427)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let image_size = ImageSize {
            width: *width,
            height: *height,
        };

        let depth_data = (0..width * height)
            .map(|_| rng.random_range(0..=255u8))
            .collect::<Vec<_>>();
        let intensity_data = (0..width * height)
            .map(|_| rng.random_range(0..=255u8))
            .collect::<Vec<_>>();
        let mask_data = (0..width * height)
            .map(|_| rng.random_bool(0.2))
            .collect::<Vec<_>>();

        let depth = Image::<u8, 1>::new(image_size, depth_data).unwrap();
        let intensity = Image::<u8, 1>::new(image_size, intensity_data).unwrap();
        let mask = Image::<bool, 1>::new(image_size, mask_data).unwrap();

        for (name, strategy) in [
            ("serial", ExecutionStrategy::Serial),
            ("parallel_rows", ExecutionStrategy::ParallelRows),
        ] {
            let filter = CrossBilateralFilter::new(
                vec![CbfScale::new(2.0, 0.2), CbfScale::new(1.0, 0.08)],
                CrossBilateralConfig::default().with_strategy(strategy),
            )
            .unwrap();

            group.bench_with_input(
                BenchmarkId::new(name, format!("{}x{}", width, height)),
                &(&depth, &intensity, &mask),
                |b, i| b.iter(|| black_box(filter.apply(i.0, i.1, i.2))),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_cbf);
criterion_main!(benches);
