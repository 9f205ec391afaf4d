//! Performance benchmarks for article-gravity.
//!
//! Run with: `cargo bench`
//!
//! Benchmarks include:
//! - Full extraction of a small synthetic article in both output formats
//! - The scoring and formatting steps on their own
//! - Synthetic articles of growing size for throughput

use article_gravity::{
    dom, extract, extract_with_options, find_best_element, format, FormatterConfig, Options,
    OutputFormat, PatternSet, WeightTable,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const SAMPLE_HTML: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Sample Article</title>
    <meta name="author" content="John Doe">
</head>
<body>
    <div id="nav" class="navigation">
        <a href="/">Home</a>
        <a href="/about">About</a>
    </div>
    <div class="article-content">
        <h1>Sample Article Title</h1>
        <div class="byline">By John Doe, Staff Writer</div>
        <p>This is the first paragraph of the article. It contains some meaningful
        content that should be picked as the main body of the page.</p>
        <p>Here is a second paragraph with more content. The extraction should
        preserve the text while leaving out navigation and other boilerplate.</p>
        <img src="/images/lead.jpg" width="640" height="360" alt="The lead image of the sample article page">
        <p>A third paragraph ensures we have enough content for meaningful
        benchmarking, including <a href="/more">a link to more reading</a>.</p>
    </div>
    <div class="sidebar">
        <h3>Related Articles</h3>
        <ul>
            <li>Related article 1</li>
            <li>Related article 2</li>
        </ul>
    </div>
    <div class="footer">
        <p>Copyright 2024</p>
    </div>
</body>
</html>
"#;

fn bench_extract_default(c: &mut Criterion) {
    c.bench_function("extract_default", |b| {
        b.iter(|| extract(black_box(SAMPLE_HTML)));
    });
}

fn bench_extract_markup(c: &mut Criterion) {
    let options = Options {
        formatter: FormatterConfig {
            format: OutputFormat::Markup,
            ..FormatterConfig::default()
        },
        base_url: Some("https://example.com/articles/sample.html".to_string()),
        ..Options::default()
    };

    c.bench_function("extract_markup", |b| {
        b.iter(|| extract_with_options(black_box(SAMPLE_HTML), black_box(&options)));
    });
}

fn bench_steps(c: &mut Criterion) {
    let doc = dom::parse(SAMPLE_HTML);
    let patterns = PatternSet::default();
    let config = FormatterConfig::default();

    c.bench_function("find_best_element", |b| {
        b.iter(|| {
            let mut weights = WeightTable::new();
            find_best_element(black_box(&doc), &mut weights, &patterns).map(|node| node.id)
        });
    });

    let mut weights = WeightTable::new();
    if let Some(root) = find_best_element(&doc, &mut weights, &patterns) {
        c.bench_function("format_plain", |b| {
            b.iter(|| format(black_box(&root), &weights, &patterns, &config));
        });
    }
}

/// Articles built from a growing number of repeated sections.
fn bench_article_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("article_size");

    for sections in [10usize, 100, 500] {
        let section = r#"<div class="post"><h2>Section heading text</h2>
            <p>Paragraph text long enough to count as a real paragraph in the scoring pass.</p>
            <p>Another paragraph that also passes the minimum length for the formatter.</p></div>"#;
        let html = format!("<html><body>{}</body></html>", section.repeat(sections));

        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::new("extract", sections), &html, |b, html| {
            b.iter(|| extract(black_box(html)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_extract_default,
    bench_extract_markup,
    bench_steps,
    bench_article_sizes
);
criterion_main!(benches);
