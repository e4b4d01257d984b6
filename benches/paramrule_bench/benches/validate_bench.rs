//! Validation overhead benchmarks
//!
//! Measures rule evaluation and message rendering for gateway-sized
//! parameter maps.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use paramrule::prelude::*;
use paramrule::RuleRegistry;
use serde_json::{json, Map, Value};

fn purchase_rules() -> RuleSet {
    RuleSet::new()
        .field(FieldRules::new("vnp_TmnCode").flag("required").flag("alpha_num").rule("max_length", 8))
        .field(FieldRules::new("vnp_Amount").flag("required").flag("integer").rule("min", 5000))
        .field(FieldRules::new("vnp_Locale").nullable().rule("in", "vn,en"))
        .field(FieldRules::new("vnp_OrderInfo").flag("required").rule("between_length", "1,255"))
        .field(FieldRules::new("vnp_ReturnUrl").flag("required").flag("url"))
        .field(FieldRules::new("vnp_IpAddr").flag("required").flag("ip"))
        .field(FieldRules::new("vnp_TxnRef").flag("required").rule("regex", "/^[A-Z0-9]{6,20}$/i"))
}

fn purchase_data() -> Map<String, Value> {
    match json!({
        "vnp_TmnCode": "DEMO1234",
        "vnp_Amount": 10000000,
        "vnp_Locale": "vn",
        "vnp_OrderInfo": "Thanh toan don hang 42",
        "vnp_ReturnUrl": "https://merchant.example.com/return?order=42",
        "vnp_IpAddr": "203.0.113.7",
        "vnp_TxnRef": "ORDER42A"
    }) {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Benchmark single predicates
fn bench_predicates(c: &mut Criterion) {
    let mut group = c.benchmark_group("predicates");
    let registry = RuleRegistry::builtin();

    for (rule, value, argument) in [
        ("required", json!("value"), json!(true)),
        ("numeric", json!("12345.67"), json!(true)),
        ("email", json!("buyer@example.com"), json!(true)),
        ("url", json!("https://sandbox.example.com/pay?x=1"), json!(true)),
        ("in", json!("de"), json!("us,uk,de")),
        ("between", json!(7), json!([1, 12])),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(rule), &(value, argument), |b, (value, argument)| {
            b.iter(|| registry.check(black_box(rule), black_box(value), black_box(argument)))
        });
    }

    group.finish();
}

/// Benchmark whole rule sets
fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");
    let validator = Validator::new();
    let rules = purchase_rules();

    // Every rule passes
    group.bench_function("purchase_valid", |b| {
        let data = purchase_data();
        b.iter(|| validator.check(black_box(&data), black_box(&rules)))
    });

    // Fails on the last field, so every earlier rule runs first
    group.bench_function("purchase_invalid_last", |b| {
        let mut data = purchase_data();
        data.insert("vnp_TxnRef".into(), json!("#1"));
        b.iter(|| validator.check(black_box(&data), black_box(&rules)))
    });

    // Fails immediately and renders a formatted message
    group.bench_function("purchase_invalid_first", |b| {
        let mut data = purchase_data();
        data.insert("vnp_TmnCode".into(), json!("DEMO-1234"));
        b.iter(|| validator.check(black_box(&data), black_box(&rules)))
    });

    group.finish();
}

/// Benchmark message rendering with aliases and overrides
fn bench_messages(c: &mut Criterion) {
    let mut group = c.benchmark_group("messages");
    let validator = Validator::new();
    let rules = RuleSet::new().field(FieldRules::new("country").rule("in", "us,uk,de,fr,vn"));
    let data = match json!({"country": "jp"}) {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    group.bench_function("in_list_default", |b| {
        b.iter(|| validator.check(black_box(&data), black_box(&rules)))
    });

    let aliases = AliasMap::from([("country".to_string(), "billing country".to_string())]);
    let overrides = MessageOverrides::new().with("country", "in", "Pick :parameter from :list.");
    group.bench_function("in_list_override", |b| {
        b.iter(|| validator.validate(black_box(&data), black_box(&rules), &overrides, &aliases))
    });

    group.finish();
}

criterion_group!(benches, bench_predicates, bench_validate, bench_messages);

criterion_main!(benches);
