//! Throughput of the stripping hot path: per-variant decisions and whole
//! candidate-list processing, over a synthetic shader library.

use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};

use aurora_strip::{
    KeywordSet, PassType, ShaderFeatures, StripSettings, VariantDescriptor, VariantFilter,
};

fn keyword_combinations() -> Vec<KeywordSet> {
    // Every subset of a five-keyword multi_compile block, the shape the
    // compiler actually enumerates.
    let block = [
        KeywordSet::MAIN_LIGHT_SHADOWS,
        KeywordSet::MAIN_LIGHT_SHADOWS_CASCADE,
        KeywordSet::ADDITIONAL_LIGHTS_PIXEL,
        KeywordSet::ADDITIONAL_LIGHT_SHADOWS,
        KeywordSet::SOFT_SHADOWS,
    ];
    (0u32..(1 << block.len()))
        .map(|bits| {
            block
                .iter()
                .enumerate()
                .filter(|&(i, _)| bits & (1 << i) != 0)
                .fold(KeywordSet::empty(), |acc, (_, kw)| acc | *kw)
        })
        .collect()
}

fn candidate_list() -> Vec<VariantDescriptor> {
    let mut variants = Vec::new();
    for pass in [PassType::Forward, PassType::ShadowCaster, PassType::Meta] {
        for keywords in keyword_combinations() {
            variants.push(
                VariantDescriptor::new("Aurora/Lit", pass).with_keywords(keywords),
            );
        }
    }
    variants
}

fn bench_strip(c: &mut Criterion) {
    let features = ShaderFeatures::MAIN_LIGHT
        | ShaderFeatures::MAIN_LIGHT_SHADOWS
        | ShaderFeatures::ADDITIONAL_LIGHTS
        | ShaderFeatures::SOFT_SHADOWS
        | ShaderFeatures::SHADER_QUALITY_MEDIUM;
    let filter = VariantFilter::new(features, StripSettings::default());
    let variants = candidate_list();

    c.bench_function("should_strip_per_variant", |b| {
        b.iter(|| {
            let mut discarded = 0usize;
            for variant in &variants {
                if filter.should_strip(black_box(variant)) {
                    discarded += 1;
                }
            }
            black_box(discarded)
        });
    });

    c.bench_function("process_candidate_list", |b| {
        b.iter_batched(
            || (filter.clone(), variants.clone()),
            |(mut filter, mut list)| {
                let report = filter.process(&mut list);
                black_box(report.after)
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_strip);
criterion_main!(benches);
