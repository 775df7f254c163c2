use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

// Import from the library
use literature_taxonomy::label::policy::{decide, PolicyThresholds};
use literature_taxonomy::label::scorer::{score_rules, top_k, CompiledRuleSet};
use literature_taxonomy::ontology::default_l1_rules;

fn sample_texts() -> Vec<&'static str> {
    vec![
        "Household willingness to pay for flood insurance after a hurricane",
        "Corporate hedging and enterprise risk management in nonfinancial firms",
        "Insurer capital, reinsurance demand, and underwriting cycles",
        "Premium regulation, market structure, and entry under Solvency II",
        "Machine learning classification of catastrophe model output",
        "No insurance vocabulary in this text at all",
    ]
}

fn bench_rule_scoring(c: &mut Criterion) {
    let rules = CompiledRuleSet::compile(&default_l1_rules());
    let texts = sample_texts();

    let mut group = c.benchmark_group("rule_scoring");
    group.throughput(Throughput::Elements(texts.len() as u64));

    group.bench_function("score_rules", |b| {
        b.iter(|| {
            for text in &texts {
                black_box(score_rules(text, &rules));
            }
        })
    });

    group.finish();
}

fn bench_rank_and_decide(c: &mut Criterion) {
    let rules = CompiledRuleSet::compile(&default_l1_rules());
    let thresholds = PolicyThresholds::default();
    let outcomes: Vec<_> = sample_texts()
        .iter()
        .map(|text| score_rules(text, &rules))
        .collect();

    let mut group = c.benchmark_group("rank_and_decide");
    group.throughput(Throughput::Elements(outcomes.len() as u64));

    group.bench_function("top_k_decide", |b| {
        b.iter(|| {
            for outcome in &outcomes {
                let ranking = top_k(&outcome.scores, 3);
                black_box(decide(&ranking, &thresholds));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_rule_scoring, bench_rank_and_decide);
criterion_main!(benches);
