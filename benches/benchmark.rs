//! Performance benchmarks for shieldscrape.
//!
//! Run with: `cargo bench`
//!
//! Benchmarks include:
//! - Small synthetic article (~1KB) through the generic extractor
//! - Synthetic old-layout Reddit threads of growing comment counts
//! - Comment forest reconstruction alone

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use shieldscrape::extractor::{build_forest, FlatComment};
use shieldscrape::{extract, extract_with_options, Options, RedditComment};

const SAMPLE_HTML: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Sample Article</title>
    <meta name="author" content="John Doe">
    <meta name="description" content="A sample article for benchmarking.">
</head>
<body>
    <nav>
        <a href="/">Home</a>
        <a href="/about">About</a>
    </nav>
    <article>
        <h1>Sample Article Title</h1>
        <p class="byline">By John Doe</p>
        <p>This is the first paragraph of the article. It contains some meaningful
        content that should be kept by the extractor.</p>
        <p>Here is a second paragraph with more content. The extraction should
        preserve the text while removing navigation and other boilerplate.</p>
        <p>A third paragraph ensures we have enough content for meaningful
        benchmarking of the <a href="/perf">extraction performance</a>.</p>
    </article>
    <aside>
        <h3>Related Articles</h3>
        <ul>
            <li><a href="/r1">Related article 1</a></li>
            <li><a href="/r2">Related article 2</a></li>
        </ul>
    </aside>
    <footer>
        <p>Copyright 2024</p>
    </footer>
</body>
</html>
"#;

/// Old-layout thread with `roots` top-level comments, each with a reply
/// chain `depth` levels deep.
fn reddit_thread(roots: usize, depth: usize) -> String {
    fn comment(author: &str, level: usize, remaining: usize) -> String {
        let replies = if remaining == 0 {
            String::new()
        } else {
            format!(
                r#"<div class="child"><div class="sitetable listing">{}</div></div>"#,
                comment(author, level + 1, remaining - 1)
            )
        };
        format!(
            r#"<div class="thing comment" data-author="{author}{level}">
<div class="entry"><p class="tagline"><a class="author">{author}{level}</a>
<span class="score unvoted" title="{level}">{level} points</span></p>
<div class="usertext-body"><div class="md"><p>Comment at level {level} with a <a href="/r/rust/wiki/{level}">link</a>.</p></div></div></div>
{replies}</div>"#
        )
    }

    let comments: String = (0..roots).map(|i| comment(&format!("user{i}_"), 0, depth)).collect();
    format!(
        r#"<html><head><title>Benchmark thread : rust</title></head><body>
<div class="thing link" data-author="ferris" data-subreddit="rust" data-score="100">
<p class="title"><a class="title" href="/r/rust/comments/bench/">Benchmark thread</a></p>
<div class="expando"><div class="md"><p>Post body.</p></div></div></div>
<div class="commentarea"><div class="sitetable nestedlisting">{comments}</div></div>
</body></html>"#
    )
}

fn bench_extract_default(c: &mut Criterion) {
    c.bench_function("extract_default", |b| {
        b.iter(|| extract(black_box(SAMPLE_HTML), black_box("https://example.com/article")));
    });
}

fn bench_extract_with_options(c: &mut Criterion) {
    let options = Options {
        favor_precision: true,
        markdown_links: false,
        ..Options::default()
    };

    c.bench_function("extract_with_options", |b| {
        b.iter(|| {
            extract_with_options(
                black_box(SAMPLE_HTML),
                black_box("https://example.com/article"),
                black_box(&options),
            )
        });
    });
}

fn bench_reddit_threads(c: &mut Criterion) {
    let mut group = c.benchmark_group("reddit_thread");

    for roots in [10usize, 50, 200] {
        let html = reddit_thread(roots, 3);
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("extract", format!("{} comments", roots * 4)),
            &html,
            |b, html| {
                b.iter(|| extract(black_box(html), "https://old.reddit.com/r/rust/comments/bench/"));
            },
        );
    }

    group.finish();
}

fn bench_build_forest(c: &mut Criterion) {
    let depths: Vec<usize> = (0..5_000).map(|i| i % 6).collect();

    c.bench_function("build_forest_5000", |b| {
        b.iter(|| {
            let flat = depths
                .iter()
                .map(|depth| FlatComment {
                    depth: *depth,
                    comment: RedditComment::default(),
                })
                .collect();
            build_forest(black_box(flat))
        });
    });
}

criterion_group!(
    benches,
    bench_extract_default,
    bench_extract_with_options,
    bench_reddit_threads,
    bench_build_forest
);
criterion_main!(benches);
