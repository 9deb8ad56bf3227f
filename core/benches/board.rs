use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use minefield_core::*;

fn generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (preset, setting) in Settings::default().iter() {
        group.bench_function(preset.name(), |b| {
            let mut sampler = RandomSampler::new(0x5eed);
            b.iter(|| Board::generate(black_box(setting), &mut sampler))
        });
    }
    group.finish();
}

fn flood_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_fill");
    for size in [(16, 30), (128, 128), (255, 255)] {
        let board = Board::from_mines(size, &[(size.0 - 1, size.1 - 1)]).unwrap();
        group.bench_function(format!("{}x{}", size.0, size.1), |b| {
            b.iter_batched(
                || board.clone(),
                |mut board| board.reveal(black_box((0, 0))),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn first_click(c: &mut Criterion) {
    c.bench_function("first_click_advanced", |b| {
        let mut seed = 0;
        b.iter_batched(
            || {
                seed += 1;
                let mut engine = Engine::new(seed).unwrap();
                engine.change_setting(Preset::Advanced).unwrap();
                engine
            },
            |mut engine| engine.handle_cell_click(black_box((8, 15))),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, generate, flood_fill, first_click);
criterion_main!(benches);
