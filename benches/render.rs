//! Benchmarks for page rendering.
//!
//! Run with: cargo bench

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use notion_scribe::markdown::{format_rich_text, render_page};
use notion_scribe::model::{Background, BlockData, BlockId, ContentBlock, Emphasis, TextRun};
use notion_scribe::notion::MemoryBlockSource;

fn runs() -> Vec<TextRun> {
    vec![
        TextRun::plain("Sort the intervals by "),
        TextRun::styled("left endpoint", &[Emphasis::Bold, Emphasis::Italic]),
        TextRun::plain(", then sweep in "),
        TextRun::equation("O(n \\log n)"),
        TextRun::styled("time", &[Emphasis::Code]),
    ]
}

/// A page of `sections` solution write-ups, each a mix of prose, lists and a toggle.
fn sample_page(sections: usize) -> MemoryBlockSource {
    let mut source = MemoryBlockSource::new();
    let mut top = vec![ContentBlock::new(
        "solutions",
        BlockData::Heading {
            level: 2,
            rich_text: vec![TextRun::plain("Solutions")],
        },
    )];

    for s in 0..sections {
        let heading_id = format!("h{s}");
        let toggle_id = format!("t{s}");
        top.push(
            ContentBlock::new(
                heading_id.clone(),
                BlockData::Heading {
                    level: 3,
                    rich_text: vec![TextRun::plain(format!("Solution {s}"))],
                },
            )
            .with_children(true),
        );

        let mut body = vec![
            ContentBlock::new(
                format!("{s}-p"),
                BlockData::Paragraph {
                    rich_text: runs(),
                    background: Background::Default,
                },
            ),
            ContentBlock::new(
                format!("{s}-i"),
                BlockData::Paragraph {
                    rich_text: runs(),
                    background: Background::Highlighted,
                },
            ),
        ];
        for i in 0..8 {
            body.push(ContentBlock::new(
                format!("{s}-n{i}"),
                BlockData::NumberedItem { rich_text: runs() },
            ));
        }
        body.push(
            ContentBlock::new(
                toggle_id.clone(),
                BlockData::Toggle {
                    rich_text: vec![TextRun::plain("Code")],
                },
            )
            .with_children(true),
        );
        source.insert(BlockId(heading_id), body);

        source.insert(
            BlockId(toggle_id),
            vec![ContentBlock::new(
                format!("{s}-c"),
                BlockData::Code {
                    rich_text: vec![TextRun::plain("int main() {\n  return 0;\n}")],
                    language: "c++".to_string(),
                },
            )],
        );
    }

    source.insert(BlockId::from("page"), top);
    source
}

fn bench_format_rich_text(c: &mut Criterion) {
    let runs = runs();
    c.bench_function("format_rich_text", |b| {
        b.iter(|| format_rich_text(black_box(&runs)));
    });
}

fn bench_render_page(c: &mut Criterion) {
    let source = sample_page(20);
    let page = BlockId::from("page");
    c.bench_function("render_page", |b| {
        b.iter(|| render_page(&source, black_box(&page), "📝 Notes").unwrap());
    });
}

criterion_group!(benches, bench_format_rich_text, bench_render_page);
criterion_main!(benches);
