//! Benchmarks for page rendering performance.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use fd_config::SiteConfig;
use fd_site::{PageAssembler, Site, SiteOptions};
use fd_storage::MockStorage;

/// Generate markdown content with specified structure.
fn generate_markdown(headings: usize, paragraphs_per_section: usize) -> String {
    let mut md = String::with_capacity(headings * 50 + headings * paragraphs_per_section * 200);
    md.push_str("# Document Title\n\n");

    for i in 0..headings {
        md.push_str(&format!("## Section {i}\n\n"));
        for j in 0..paragraphs_per_section {
            md.push_str(&format!(
                "This is paragraph {j} in section {i}. It contains **bold** and *italic* text.\n\n"
            ));
        }
        if i % 5 == 0 {
            md.push_str(":::callout[Note]{type=\"tip\"}\nRemember to commit.\n:::\n\n");
        }
    }
    md
}

fn site_with(path: &str, markdown: &str, cache_enabled: bool) -> Site {
    let storage = MockStorage::new().with_file(path, "Bench", markdown);
    Site::load(
        Arc::new(storage),
        SiteOptions {
            cache_enabled,
            ..SiteOptions::default()
        },
    )
}

fn bench_render_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_by_size");

    for (headings, paragraphs) in [(5, 2), (20, 3), (50, 5)] {
        let markdown = generate_markdown(headings, paragraphs);
        let site = site_with("doc", &markdown, false);

        group.throughput(Throughput::Bytes(markdown.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("markdown", format!("{headings}h_{paragraphs}p")),
            &site,
            |b, site| b.iter(|| site.render(&["doc"])),
        );
    }

    group.finish();
}

fn bench_render_cached_vs_uncached(c: &mut Criterion) {
    let markdown = generate_markdown(10, 3);
    let uncached = site_with("doc", &markdown, false);
    let cached = site_with("doc", &markdown, true);

    let mut group = c.benchmark_group("caching");

    group.bench_function("render_uncached", |b| {
        b.iter(|| uncached.render(&["doc"]));
    });

    // Prime the cache
    let _ = cached.render(&["doc"]);

    group.bench_function("render_cache_hit", |b| {
        b.iter(|| cached.render(&["doc"]));
    });

    group.finish();
}

fn bench_render_components(c: &mut Criterion) {
    let markdown = r#"# Package Managers

:::tabs
:::tab[npm]
```bash
npm install
```
:::
:::tab[pnpm]
```bash title="install.sh"
pnpm install
```
:::
:::

:::cards
::card{title="Git" href="./git/index.md" description="Version control"}
::card{title="Node.js" href="./nodejs.md"}
:::

:::steps
### Install
### Configure
:::
"#;
    let site = site_with("tools", markdown, false);

    c.bench_function("render_components", |b| {
        b.iter(|| site.render(&["tools"]));
    });
}

fn bench_assemble_page(c: &mut Criterion) {
    let site = site_with("doc", &generate_markdown(20, 3), false);
    let assembler = PageAssembler::new(SiteConfig::default(), "/docs", site.navigation()).unwrap();
    let page = site.render(&["doc"]).unwrap();

    c.bench_function("assemble_page", |b| {
        b.iter(|| assembler.assemble(&page));
    });

    c.bench_function("assemble_home", |b| {
        b.iter(|| assembler.home());
    });
}

criterion_group!(
    benches,
    bench_render_by_size,
    bench_render_cached_vs_uncached,
    bench_render_components,
    bench_assemble_page,
);
criterion_main!(benches);
