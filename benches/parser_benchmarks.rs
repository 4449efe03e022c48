//! End-to-End Parser Benchmarks
//!
//! This benchmark suite measures the SPARQL structural parser across query
//! forms and sizes. Benchmarks are organized into the following categories:
//!
//! - **Query Forms**: SELECT, ASK, CONSTRUCT, DESCRIBE and update requests
//! - **Stress Tests**: Large bodies, deep group nesting, many graphs
//! - **Rewriting**: Graph rewrites, deep copies and serialization
//! - **Pipeline Stages**: Tokenize vs parse vs parse-rewrite-serialize
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run specific benchmark group
//! cargo bench query_forms
//! cargo bench deep_nesting
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use sparql_parser::{parse, tokenize};

const FOAF_SELECT: &str = "PREFIX foaf: <http://xmlns.com/foaf/0.1/>\n\
    SELECT ?name ?mbox WHERE {\n\
      ?x foaf:name ?name .\n\
      OPTIONAL { ?x foaf:mbox ?mbox }\n\
      FILTER (?name != \"\")\n\
    } ORDER BY ?name LIMIT 10";

// ============================================================================
// Query Form Benchmarks
// ============================================================================

fn bench_query_forms(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_forms");

    let queries = vec![
        ("select_minimal", "SELECT * WHERE { ?s ?p ?o }"),
        ("select_foaf", FOAF_SELECT),
        ("ask_from", "ASK FROM <http://g> { ?s ?p ?o }"),
        (
            "construct",
            "CONSTRUCT { ?s <http://p> ?o } WHERE { ?s ?p ?o . ?o ?q ?r } LIMIT 5",
        ),
        ("describe", "DESCRIBE ?s WHERE { ?s a <http://example.org/T> }"),
        (
            "delete_insert_where",
            "WITH <http://g> DELETE { ?s <http://a> ?o } INSERT { ?s <http://b> ?o } WHERE { ?s <http://a> ?o }",
        ),
        (
            "insert_data",
            "INSERT DATA { GRAPH <http://g> { <http://x> <http://y> \"z\" } }",
        ),
    ];

    for (name, query) in queries {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(name), &query, |b, q| {
            b.iter(|| parse(black_box(q)));
        });
    }

    group.finish();
}

// ============================================================================
// Stress Test Benchmarks
// ============================================================================

fn bench_large_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("large_queries");
    group.sample_size(50);

    let mut many_patterns = String::from("ASK {\n");
    for i in 0..500 {
        many_patterns.push_str(&format!("?s{i} <http://example.org/p{i}> ?o{i} .\n"));
    }
    many_patterns.push('}');

    group.bench_function("500_triple_patterns", |b| {
        b.iter(|| parse(black_box(&many_patterns)));
    });

    let mut many_graphs = String::from("SELECT * WHERE {\n");
    for i in 0..100 {
        many_graphs.push_str(&format!("GRAPH <http://example.org/g{i}> {{ ?s ?p ?o{i} }}\n"));
    }
    many_graphs.push('}');

    group.bench_function("100_graph_groups", |b| {
        b.iter(|| parse(black_box(&many_graphs)));
    });

    let mut many_prefixes = String::new();
    for i in 0..100 {
        many_prefixes.push_str(&format!("PREFIX p{i}: <http://example.org/{i}/>\n"));
    }
    many_prefixes.push_str("SELECT * WHERE { ?s p1:x ?o }");

    group.bench_function("100_prefixes", |b| {
        b.iter(|| parse(black_box(&many_prefixes)));
    });

    group.finish();
}

fn bench_deep_nesting(c: &mut Criterion) {
    let mut group = c.benchmark_group("deep_nesting");
    group.sample_size(50);

    for depth in [5, 10, 20, 50].iter() {
        let mut query = String::from("ASK ");
        for _ in 0..*depth {
            query.push_str("{ ?s ?p ?o . OPTIONAL ");
        }
        query.push_str("{ ?s ?p ?o }");
        for _ in 0..*depth {
            query.push_str(" }");
        }

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_levels", depth)),
            &query,
            |b, q| {
                b.iter(|| parse(black_box(q)));
            },
        );
    }

    group.finish();
}

// ============================================================================
// Rewrite and Serialization Benchmarks
// ============================================================================

fn bench_rewriting(c: &mut Criterion) {
    let mut group = c.benchmark_group("rewriting");

    let mut source = String::from("SELECT * FROM <http://from> WHERE {\n");
    for i in 0..50 {
        source.push_str(&format!("GRAPH <http://example.org/g{}> {{ ?s ?p ?o{i} }}\n", i % 5));
    }
    source.push('}');
    let query = match parse(&source) {
        Ok(query) => query,
        Err(err) => panic!("benchmark query does not parse: {err}"),
    };

    group.bench_function("rewrite_all", |b| {
        b.iter(|| {
            let mut copy = query.deep_clone();
            copy.rewrite_graph(black_box("http://example.org/new"));
            copy
        });
    });

    group.bench_function("replace_matching", |b| {
        b.iter(|| {
            let mut copy = query.deep_clone();
            copy.replace_graph(black_box("http://example.org/g3"), "http://example.org/new");
            copy
        });
    });

    group.bench_function("deep_clone", |b| {
        b.iter(|| black_box(&query).deep_clone());
    });

    group.bench_function("serialize", |b| {
        b.iter(|| black_box(&query).serialize());
    });

    group.bench_function("unknown_variables", |b| {
        b.iter(|| black_box(&query).unknown_variables());
    });

    group.finish();
}

// ============================================================================
// Comparison Benchmarks (Tokenize vs Parse vs Full Round Trip)
// ============================================================================

fn bench_pipeline_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_stages");

    group.bench_function("01_tokenize_only", |b| {
        b.iter(|| tokenize(black_box(FOAF_SELECT)));
    });

    group.bench_function("02_parse_only", |b| {
        b.iter(|| parse(black_box(FOAF_SELECT)));
    });

    group.bench_function("03_parse_rewrite_serialize", |b| {
        b.iter(|| {
            parse(black_box(FOAF_SELECT)).map(|mut query| {
                query.rewrite_graph("http://example.org/g");
                query.serialize()
            })
        });
    });

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    benches,
    bench_query_forms,
    bench_large_queries,
    bench_deep_nesting,
    bench_rewriting,
    bench_pipeline_stages,
);

criterion_main!(benches);
