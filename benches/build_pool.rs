use tc_ddop::builder::{BoomConfig, DeviceIdentity, build};
use criterion::{Criterion, criterion_group, criterion_main};

fn gen_booms(boom_count: usize, sections_per_boom: u16) -> Vec<BoomConfig> {
    (0..boom_count)
        .map(|_| BoomConfig {
            number_of_sections: sections_per_boom,
            boom_width_mm: sections_per_boom as u32 * 1500,
            ..Default::default()
        })
        .collect()
}

fn bench_build_pool(c: &mut Criterion) {
    let identity = DeviceIdentity::new(0xA000_8200_0012_3456, "Sprayer");

    for &(boom_count, sections) in &[(1usize, 10u16), (1, 256), (4, 64)] {
        let booms = gen_booms(boom_count, sections);

        c.bench_function(&format!("build_{}x{}_sections", boom_count, sections), |b| {
            b.iter(|| {
                let _ = build(&booms, &identity).unwrap();
            })
        });

        let pool = build(&booms, &identity).unwrap();
        c.bench_function(&format!("serialize_{}x{}_sections", boom_count, sections), |b| {
            b.iter(|| {
                let _ = pool.to_bytes().unwrap();
            })
        });
    }
}

criterion_group!(benches, bench_build_pool);
criterion_main!(benches);
