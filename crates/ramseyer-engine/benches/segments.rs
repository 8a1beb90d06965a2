use criterion::{Criterion, criterion_group, criterion_main};
use ramseyer_engine::{parse_atoms, render_section, segments_for_atom};
mod common;

fn bench_segments(c: &mut Criterion) {
    let mut group = c.benchmark_group("segments");
    group.sample_size(10);

    let atoms = parse_atoms(&common::generate_section_text(100));
    for count in [10, 100, 500] {
        let annotations = common::generate_annotations(count, atoms.len());

        group.bench_function(format!("segments_for_atom_{count}"), |b| {
            b.iter(|| {
                for (i, atom) in atoms.iter().enumerate() {
                    std::hint::black_box(segments_for_atom(i, atom.len(), &annotations));
                }
            });
        });

        group.bench_function(format!("render_section_{count}"), |b| {
            b.iter(|| std::hint::black_box(render_section(&atoms, &annotations)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_segments);
criterion_main!(benches);
