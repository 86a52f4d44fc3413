use criterion::{black_box, criterion_group, criterion_main, Criterion};

use coursefit_core::engine::{axis_confidence, ScoreCard, ScoringEngine};
use coursefit_core::model::AnswerSet;
use coursefit_core::profile::question_id;

fn full_answers(code: &str) -> AnswerSet {
    let mut answers: AnswerSet = (1..=30).map(|p| (question_id(p), code)).collect();
    for (id, correct) in [
        ("Q31", "A"),
        ("Q32", "A"),
        ("Q33", "A"),
        ("Q34", "A"),
        ("Q35", "B"),
        ("Q36", "B"),
    ] {
        answers.insert(id, correct);
    }
    answers
}

fn mixed_answers() -> AnswerSet {
    let codes = ["A", "B", "C", "D", "E"];
    (1..=36)
        .map(|p| (question_id(p), codes[p as usize % codes.len()]))
        .collect()
}

fn bench_recommend(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend");
    let engine = ScoringEngine::builtin();

    group.bench_function("empty", |b| {
        let answers = AnswerSet::new();
        b.iter(|| engine.recommend(black_box(&answers)))
    });

    group.bench_function("unanimous", |b| {
        let answers = full_answers("A");
        b.iter(|| engine.recommend(black_box(&answers)))
    });

    group.bench_function("mixed", |b| {
        let answers = mixed_answers();
        b.iter(|| engine.recommend(black_box(&answers)))
    });

    group.finish();
}

fn bench_confidence(c: &mut Criterion) {
    let mut group = c.benchmark_group("confidence");

    group.bench_function("axis", |b| {
        b.iter(|| axis_confidence(black_box(40), black_box(20)))
    });

    group.bench_function("decide", |b| {
        let engine = ScoringEngine::builtin();
        let card = ScoreCard {
            aa: 40,
            ai: 20,
            hl: 40,
            sl: 0,
        };
        b.iter(|| engine.decide(black_box(&card)))
    });

    group.finish();
}

criterion_group!(benches, bench_recommend, bench_confidence);
criterion_main!(benches);
