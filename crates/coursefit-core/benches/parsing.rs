use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use coursefit_core::answers::{parse_answer_pairs, parse_answer_set_str, AnswerFormat};
use coursefit_core::bank::{validate_bank, QuestionBank};
use coursefit_core::profile::ScoringProfile;

fn bench_bank(c: &mut Criterion) {
    let mut group = c.benchmark_group("bank");

    group.bench_function("parse_builtin", |b| b.iter(QuestionBank::builtin));

    group.bench_function("validate_builtin", |b| {
        let bank = QuestionBank::builtin().unwrap();
        let profile = ScoringProfile::ib_math();
        b.iter(|| validate_bank(black_box(&bank), black_box(&profile)))
    });

    group.finish();
}

fn bench_answers(c: &mut Criterion) {
    let mut group = c.benchmark_group("answers");

    let toml = (1..=36)
        .map(|p| format!("Q{p} = \"A\"\n"))
        .collect::<String>();
    let json = format!(
        "{{{}}}",
        (1..=36)
            .map(|p| format!("\"Q{p}\": \"C\""))
            .collect::<Vec<_>>()
            .join(", ")
    );
    let pairs: Vec<String> = (1..=36).map(|p| format!("Q{p}=b")).collect();

    group.bench_function("toml", |b| {
        b.iter(|| parse_answer_set_str(black_box(&toml), AnswerFormat::Toml, Path::new("a.toml")))
    });

    group.bench_function("json", |b| {
        b.iter(|| parse_answer_set_str(black_box(&json), AnswerFormat::Json, Path::new("a.json")))
    });

    group.bench_function("pairs", |b| b.iter(|| parse_answer_pairs(black_box(&pairs))));

    group.finish();
}

criterion_group!(benches, bench_bank, bench_answers);
criterion_main!(benches);
