use criterion::{black_box, criterion_group, criterion_main, Criterion};
use orbis::animation::{animate, AnimationInputs, AnimationParams, FrameInput};
use orbis::options::Options;
use orbis::scene::{OrbOverrides, Scene};
use orbis::shader::{BuiltinStyle, ShaderRegistry};
use std::sync::Arc;

fn animate_benchmark(c: &mut Criterion) {
    let program = BuiltinStyle::Azteca.descriptor();
    let params = AnimationParams::default();
    let inputs = AnimationInputs {
        phase: 1.3,
        capital_ratio: 0.4,
        mood: 0.2,
        selected: true,
        hovered: false,
        hover: 0.5,
        pulse: 0.3,
        position: glam::Vec3::X,
        extra_rotation: glam::Quat::IDENTITY,
    };
    let frame = FrameInput {
        elapsed: 12.5,
        delta: 1.0 / 60.0,
        ..FrameInput::default()
    };
    c.bench_function("animate_single_orb", |b| {
        b.iter(|| {
            black_box(animate(
                &program,
                &program.preset,
                &params,
                black_box(&frame),
                &inputs,
            ))
        })
    });
}

fn scene_update_benchmark(c: &mut Criterion) {
    let registry = Arc::new(ShaderRegistry::builtin().unwrap());
    let options = Options::default();
    let mut group = c.benchmark_group("scene_update");

    for count in [8, 64, 512] {
        let mut scene = Scene::with_seed(Arc::clone(&registry), &options, 7);
        for i in 0..count {
            let style = BuiltinStyle::ALL[i % BuiltinStyle::ALL.len()];
            let _ = scene.add_orb(format!("orb{i}"), style.id(), &OrbOverrides::default());
        }
        scene.apply_layout();

        group.bench_function(format!("{count}_orbs"), |b| {
            b.iter(|| scene.advance(black_box(1.0 / 60.0)))
        });
    }
    group.finish();
}

criterion_group!(benches, animate_benchmark, scene_update_benchmark);
criterion_main!(benches);
