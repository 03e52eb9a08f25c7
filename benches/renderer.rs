use chromloc::config::LayoutConfig;
use chromloc::ir::{Feature, Genome, Strand};
use chromloc::layout::{compute_layout, place_labels};
use chromloc::render::render_svg;
use chromloc::theme::Theme;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn synthetic_genome(chromosomes: usize, features_per_chromosome: usize) -> Genome {
    let mut genome = Genome::new();
    for c in 0..chromosomes {
        let name = format!("chr{:02}", c + 1);
        let length = 20_000_000 + c as u64 * 1_500_000;
        genome.insert_chromosome(&name, length);
        let step = length / (features_per_chromosome as u64 + 1);
        for f in 0..features_per_chromosome {
            // Every fourth feature sits right next to its predecessor.
            let start = if f % 4 == 3 {
                step * f as u64 + 40_000
            } else {
                step * (f as u64 + 1)
            };
            let feature = Feature {
                chromosome: name.clone(),
                start,
                end: start + 2_500,
                name: format!("feature_{c}_{f}"),
                strand: Strand::Forward,
            };
            genome
                .push_feature(feature, "synthetic", f + 1)
                .expect("synthetic feature in range");
        }
    }
    genome
}

fn bench_layout(c: &mut Criterion) {
    let theme = Theme::classic();
    let config = LayoutConfig {
        fast_text_metrics: true,
        ..LayoutConfig::default()
    };
    let mut group = c.benchmark_group("layout");
    for (chromosomes, features) in [(5, 10), (12, 40), (24, 200)] {
        let genome = synthetic_genome(chromosomes, features);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{chromosomes}x{features}")),
            &genome,
            |b, genome| b.iter(|| compute_layout(black_box(genome), &theme, &config)),
        );
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let theme = Theme::classic();
    let config = LayoutConfig {
        fast_text_metrics: true,
        ..LayoutConfig::default()
    };
    let layout = compute_layout(&synthetic_genome(12, 40), &theme, &config);
    c.bench_function("render_svg/12x40", |b| {
        b.iter(|| render_svg(black_box(&layout), &theme))
    });
}

fn bench_placement(c: &mut Criterion) {
    let config = LayoutConfig::default();
    let rows: Vec<f64> = (0..10_000).map(|i| 16.9 + (i / 3) as f64 * 2.5).collect();
    c.bench_function("place_labels/10000", |b| {
        b.iter(|| place_labels(10.0, black_box(rows.iter().copied()), &config))
    });
}

criterion_group!(benches, bench_layout, bench_render, bench_placement);
criterion_main!(benches);
