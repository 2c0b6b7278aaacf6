use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gridfill::{Answer, Lexicon, Pattern, SearchCache};

fn lexicon() -> Lexicon {
    let letters: Vec<char> = ('A'..='Z').collect();
    let mut answers = vec![];
    for (i, a) in letters.iter().enumerate() {
        for (j, b) in letters.iter().enumerate() {
            for c in &letters[..10] {
                let word: String = [*a, *b, *c, *a].iter().collect();
                answers.push(Answer::new(&word, ((i + j) % 50) as i64));
            }
        }
    }
    Lexicon::build(answers)
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let lexicon = lexicon();
    let pattern = Pattern::parse("B..B").unwrap();

    c.bench_function("search cache miss", |b| {
        b.iter(|| {
            let mut cache = SearchCache::new(&lexicon);
            cache.find(black_box(&pattern)).len()
        })
    });

    let mut warm = SearchCache::new(&lexicon);
    warm.find(&pattern);
    c.bench_function("search cache hit", |b| {
        b.iter(|| warm.find(black_box(&pattern)).len())
    });

    c.bench_function("lexicon contains", |b| {
        b.iter(|| lexicon.contains(black_box("QAJQ")))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
