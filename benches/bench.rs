//! Criterion benchmarks for kensaku.
//!
//! Covers the hot paths of an indexing run:
//! - Ordered map and hash map insertion and lookup
//! - Substring search over long texts
//! - Dictionary segmentation
//! - Parallel indexing and ranked queries

use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use kensaku::analysis::{Dictionary, DictionarySegmenter};
use kensaku::collections::{ChainedHashMap, IntHasher, OrderedMap};
use kensaku::config::KensakuConfig;
use kensaku::document::Document;
use kensaku::index::IndexBackend;
use kensaku::pipeline::{EntityDecoder, IndexingPipeline, MemoryFetcher};
use kensaku::text::Text;

const VOCABULARY: &[&str] = &[
    "数据", "结构", "项目", "算法", "搜索", "引擎", "索引", "查询", "挖掘机", "维修", "发动机",
    "液压", "系统", "故障", "配件", "价格",
];

/// Generate test documents for benchmarking.
fn generate_test_documents(count: usize) -> Vec<Vec<&'static str>> {
    let mut documents = Vec::with_capacity(count);
    for i in 0..count {
        let doc_length = 50 + (i % 100); // Variable length documents
        let words = (0..doc_length)
            .map(|j| VOCABULARY[(i * 7 + j * 13) % VOCABULARY.len()])
            .collect();
        documents.push(words);
    }
    documents
}

fn dictionary() -> Arc<Dictionary> {
    let mut dictionary = Dictionary::new();
    dictionary.add_words(VOCABULARY.iter().copied());
    Arc::new(dictionary)
}

/// Benchmark the map containers.
fn bench_collections(c: &mut Criterion) {
    let mut group = c.benchmark_group("collections");
    let keys: Vec<u32> = (0..10_000u32).map(|i| i.wrapping_mul(2_654_435_761) % 1_000_003).collect();

    group.throughput(Throughput::Elements(keys.len() as u64));
    group.bench_function("ordered_map_insert", |b| {
        b.iter(|| {
            let mut map = OrderedMap::new();
            for &key in &keys {
                map.insert(black_box(key), key);
            }
            black_box(map.height())
        })
    });

    group.bench_function("hash_map_insert", |b| {
        b.iter(|| {
            let mut map: ChainedHashMap<u32, u32, IntHasher> = ChainedHashMap::new();
            for &key in &keys {
                map.insert(black_box(key), key);
            }
            black_box(map.len())
        })
    });

    let mut map = OrderedMap::new();
    for &key in &keys {
        map.insert(key, key);
    }
    group.bench_function("ordered_map_get", |b| {
        b.iter(|| {
            let found = keys.iter().filter(|&&key| map.get(black_box(&key)).is_some()).count();
            black_box(found)
        })
    });

    group.finish();
}

/// Benchmark substring search.
fn bench_text_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_search");

    let haystack = Text::from("数据结构".repeat(10_000) + "挖掘机维修");
    let needle = Text::from("数据结构数据结构挖掘机");
    let miss = Text::from("数据结构数据结构数据结构算法");

    group.bench_function("index_of_hit", |b| {
        b.iter(|| black_box(haystack.index_of(black_box(&needle))))
    });
    group.bench_function("index_of_miss", |b| {
        b.iter(|| black_box(haystack.index_of(black_box(&miss))))
    });

    group.finish();
}

/// Benchmark dictionary segmentation.
fn bench_segmentation(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmentation");

    let segmenter = DictionarySegmenter::new(dictionary());
    let documents = generate_test_documents(100);
    let sentences: Vec<Text> = documents.iter().map(|words| Text::from(words.concat())).collect();

    group.bench_function("segment_single_document", |b| {
        b.iter(|| black_box(segmenter.segment(black_box(&sentences[0]))))
    });

    group.throughput(Throughput::Elements(sentences.len() as u64));
    group.bench_function("segment_batch_documents", |b| {
        b.iter(|| {
            for sentence in &sentences {
                black_box(segmenter.segment(black_box(sentence)));
            }
        })
    });

    group.finish();
}

/// Benchmark indexing and querying.
fn bench_indexing(c: &mut Criterion) {
    let mut group = c.benchmark_group("indexing");
    group.sample_size(20);

    let documents = generate_test_documents(500);

    for backend in [IndexBackend::Tree, IndexBackend::Hash] {
        group.throughput(Throughput::Elements(documents.len() as u64));
        group.bench_function(format!("index_documents_{backend}"), |b| {
            b.iter_with_setup(
                || {
                    let mut config = KensakuConfig::default();
                    config.index.backend = backend;
                    let pipeline = IndexingPipeline::new(
                        &config,
                        dictionary(),
                        Arc::new(MemoryFetcher::new()),
                        Arc::new(EntityDecoder),
                    )
                    .unwrap();
                    let batch: Vec<Document> = documents
                        .iter()
                        .enumerate()
                        .map(|(i, words)| Document::from_words(i as u32, words.iter().copied()))
                        .collect();
                    (pipeline, batch)
                },
                |(pipeline, batch)| {
                    let report = pipeline.index_documents(batch).unwrap();
                    black_box(report.indexed)
                },
            )
        });
    }

    let pipeline = IndexingPipeline::new(
        &KensakuConfig::default(),
        dictionary(),
        Arc::new(MemoryFetcher::new()),
        Arc::new(EntityDecoder),
    )
    .unwrap();
    pipeline
        .index_documents(
            documents
                .iter()
                .enumerate()
                .map(|(i, words)| Document::from_words(i as u32, words.iter().copied()))
                .collect(),
        )
        .unwrap();
    let corpus = pipeline.into_corpus();

    group.bench_function("query_three_terms", |b| {
        b.iter(|| black_box(corpus.query_str(black_box("数据 挖掘机 价格")).unwrap()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_collections,
    bench_text_search,
    bench_segmentation,
    bench_indexing
);
criterion_main!(benches);
