// Criterion benchmarks over a small in-memory dictionary: raw check
// throughput for hits, affixed hits, compounds and misses, plus the
// full suggestion pipeline on a typical typo.

use criterion::{criterion_group, criterion_main, Criterion};
use lexis::LexisHandle;

const AFF: &str = "TRY esianrtolcdugmphbyfvkwzESIANRTOLCDUGMPHBYFVKWZ\n\
                   KEY qwertyuiop|asdfghjkl|zxcvbnm\n\
                   REP 2\n\
                   REP f ph\n\
                   REP alot a_lot\n\
                   SFX S Y 1\n\
                   SFX S 0 s .\n\
                   SFX G Y 1\n\
                   SFX G 0 ing .\n\
                   PFX R Y 1\n\
                   PFX R 0 re .\n\
                   COMPOUNDFLAG C\n\
                   COMPOUNDMIN 3\n";

const DIC: &str = "10\n\
                   walk/SGR\n\
                   talk/SGR\n\
                   work/SGRC\n\
                   shop/SC\n\
                   book/SC\n\
                   phone/S\n\
                   kitten/S\n\
                   a lot\n\
                   Paris\n\
                   hello/S\n";

fn build_handle() -> LexisHandle {
    LexisHandle::from_strings(AFF, DIC).expect("bench dictionary parses")
}

fn bench_check(c: &mut Criterion) {
    let handle = build_handle();
    let words = [
        "walk",       // plain hit
        "rewalking",  // prefix + suffix
        "bookshop",   // compound
        "Kitten",     // case variant
        "wlak",       // miss
        "notaword",   // miss
    ];
    c.bench_function("check_mixed_words", |b| {
        b.iter(|| {
            for word in &words {
                std::hint::black_box(handle.lookup(word));
            }
        });
    });
}

fn bench_suggest(c: &mut Criterion) {
    let handle = build_handle();
    c.bench_function("suggest_transposition", |b| {
        b.iter(|| std::hint::black_box(handle.suggest("wlak")));
    });
    c.bench_function("suggest_rep_split", |b| {
        b.iter(|| std::hint::black_box(handle.suggest("alot")));
    });
}

criterion_group!(benches, bench_check, bench_suggest);
criterion_main!(benches);
