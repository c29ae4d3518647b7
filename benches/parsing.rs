//! Conversion benchmarks
//!
//! Run with: cargo bench

use blockdown::{InlineSet, Options, Parser};
use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

mod samples {
    pub const SMALL: &str = "# Notes\n\nSome *emphasis*, a `span` and [a link](https://example.com).\n\n- one\n- two\n";

    /// A section touching every block kind, repeated.
    pub fn mixed(sections: usize) -> String {
        let section = r#"
Section
-------

Text with **strong**, ~~struck~~ and <span>inline</span> markup,
plus a bare URL http://example.com/path and a [reference][ref].

1. first
2. second
   - nested *item*

> quoted line
lazy continuation

| left | center | right |
|:-----|:------:|------:|
| a    | `b|c`  | d     |

```text
fenced <code>
```

    indented code

<div>
raw block
</div>

[ref]: https://example.com "Title"
"#;
        section.repeat(sections)
    }

    /// Many unmatched emphasis openers.
    pub fn emphasis_openers() -> String {
        "*a _b ".repeat(2000)
    }

    /// Quotes nested past the depth limit.
    pub fn deep_quotes() -> String {
        ">".repeat(500) + " deep\n"
    }

    /// A table near the column limit.
    pub fn wide_table() -> String {
        let row = "|x".repeat(400) + "|\n";
        let divider = "|-".repeat(400) + "|\n";
        format!("{row}{divider}{}", row.repeat(20))
    }
}

fn bench_documents(c: &mut Criterion) {
    let mut group = c.benchmark_group("documents");
    let parser = Parser::default();

    group.throughput(Throughput::Bytes(samples::SMALL.len() as u64));
    group.bench_function("small", |b| {
        b.iter(|| parser.render_document(black_box(samples::SMALL)))
    });

    for sections in [10, 100] {
        let text = samples::mixed(sections);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(format!("mixed_{sections}"), |b| {
            b.iter(|| parser.render_document(black_box(&text)))
        });
    }

    let text = samples::mixed(100);
    let safe = Parser::new(Options {
        safe_mode: true,
        ..Options::default()
    });
    group.bench_function("mixed_100_safe", |b| {
        b.iter(|| safe.render_document(black_box(&text)))
    });
    group.bench_function("mixed_100_parse_then_render", |b| {
        b.iter(|| {
            let document = parser.parse(black_box(&text));
            parser.render(&document)
        })
    });

    group.finish();
}

fn bench_inline(c: &mut Criterion) {
    let mut group = c.benchmark_group("inline");
    let parser = Parser::default();
    let line = "Mixed *em* **strong** `code` [link](/u) <b>tag</b> &amp; http://e.com ".repeat(50);

    group.throughput(Throughput::Bytes(line.len() as u64));
    group.bench_function("render_inline", |b| {
        b.iter(|| parser.render_inline(black_box(&line), InlineSet::EMPTY))
    });

    let plain = "Plain text without any special characters at all. ".repeat(100);
    group.throughput(Throughput::Bytes(plain.len() as u64));
    group.bench_function("escape_plain", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(plain.len());
            blockdown::escape::escape_text_into(&mut out, black_box(plain.as_bytes()));
            out
        })
    });

    group.finish();
}

fn bench_pathological(c: &mut Criterion) {
    let mut group = c.benchmark_group("pathological");
    group.sample_size(20);

    for (name, text) in [
        ("emphasis_openers", samples::emphasis_openers()),
        ("deep_quotes", samples::deep_quotes()),
        ("wide_table", samples::wide_table()),
    ] {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(name, |b| b.iter(|| blockdown::to_html(black_box(&text))));
    }

    group.finish();
}

fn bench_buffer_reuse(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_reuse");
    let text = samples::mixed(10);
    group.throughput(Throughput::Bytes(text.len() as u64));

    group.bench_function("with_reuse", |b| {
        let mut buffer = Vec::with_capacity(text.len() * 2);
        b.iter(|| {
            blockdown::to_html_into(black_box(&text), &mut buffer);
            black_box(&buffer);
        })
    });

    group.finish();
}

criterion_group!(benches, bench_documents, bench_inline, bench_pathological, bench_buffer_reuse);
criterion_main!(benches);
