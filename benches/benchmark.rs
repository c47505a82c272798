use card_text_similarity::{
    build_corpus, find_similar_by_text, fit_model, ExclusionConfig, InMemoryRepository, StopWords,
};
use criterion::{criterion_group, criterion_main, Criterion};

const PHRASES: &[&str] = &[
    "Target creature gets +3/+3 until end of turn.",
    "{T}: Add {G}.",
    "Flying, haste",
    "Draw two cards, then discard a card.",
    "Destroy target artifact or enchantment.",
    "deals 3 damage to any target.",
    "Counter target spell unless its controller pays {2}.",
    "When this creature enters, you gain 3 life.",
    "Sacrifice a creature: Put a +1/+1 counter on target creature.",
    "Return target creature card from your graveyard to your hand.",
    "Creatures you control get +1/+0 and have trample.",
    "Exile target nonland permanent.",
];

/// Deterministic synthetic card pool mixing two or three phrases per card
fn synthetic_repository(cards: usize) -> InMemoryRepository {
    let mut repo = InMemoryRepository::new();
    let mut state = 0x2545_f491u32;
    for i in 0..cards {
        let mut text = String::new();
        for _ in 0..(2 + i % 2) {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            text.push_str(PHRASES[state as usize % PHRASES.len()]);
            text.push(' ');
        }
        repo.insert_text(&format!("Card {i}"), &text).expect("valid card");
    }
    repo
}

fn fit_and_query_benchmark(c: &mut Criterion) {
    let repo = synthetic_repository(5_000);
    let corpus = build_corpus(&repo, &ExclusionConfig::default());
    let stop_words = StopWords::default();

    c.bench_function("fit_model", |b| {
        b.iter(|| fit_model(&corpus, &stop_words).expect("non-empty corpus"));
    });

    let model = fit_model(&corpus, &stop_words).expect("non-empty corpus");
    c.bench_function("find_similar_by_text", |b| {
        b.iter(|| {
            find_similar_by_text(&model, &corpus, "target creature gets +1/+1 and flying", 10)
                .expect("positive n")
        });
    });
}

criterion_group!(benches, fit_and_query_benchmark);
criterion_main!(benches);
