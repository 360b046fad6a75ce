//! Search performance benchmarks.
//!
//! The index is rebuilt once; each iteration scores every post against a
//! query, the work done on each keystroke while typing.
//!
//! Run with: cargo bench

#![allow(missing_docs)] // criterion macros generate undocumented items

use cardflow::model::{Post, PostMeta, PostType, Slug};
use cardflow::state::SearchIndex;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const NUM_POSTS: usize = 2_000;

/// Posts with a few hundred characters of prose each and a code block on
/// every third one.
fn generate_posts() -> Vec<Post> {
    let prose = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. ".repeat(8);
    (0..NUM_POSTS)
        .map(|i| {
            let post_type = PostType::ALL[i % PostType::ALL.len()];
            let body = if i % 3 == 0 {
                format!("{prose}\n\n```bash\necho post {i}\n```")
            } else {
                format!("{prose} Entry {i}")
            };
            Post::new(
                Slug::new(format!("post-{i:05}")).expect("valid slug"),
                PostMeta {
                    title: format!("Post number {i}"),
                    post_type,
                    ..PostMeta::default()
                },
                body,
            )
        })
        .collect()
}

fn benchmark_search(c: &mut Criterion) {
    let posts = generate_posts();

    c.bench_function("index_build_2k_posts", |b| {
        b.iter(|| SearchIndex::new(black_box(&posts)))
    });

    let index = SearchIndex::new(&posts);

    c.bench_function("search_common_term", |b| {
        b.iter(|| index.search(black_box("ipsum")))
    });

    c.bench_function("search_typo", |b| {
        b.iter(|| index.search(black_box("adipsicing")))
    });

    c.bench_function("search_no_match", |b| {
        b.iter(|| index.search(black_box("zzqqxxjj")))
    });

    c.bench_function("search_long_query_substring_fallback", |b| {
        b.iter(|| {
            index.search(black_box(
                "consectetur adipiscing elit lorem ipsum dolor sit amet",
            ))
        })
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = benchmark_search
}

criterion_main!(benches);
