// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use release_cadence::{CadenceConfig, Release, enrich_releases, group_by_period, parse_config, summarize};

fn synthetic_releases(count: usize,) -> Vec<Release,>
{
    (0..count)
        .map(|index| {
            let day = index % 28 + 1;
            let month = index / 28 % 12 + 1;
            let year = 2015 + index / (28 * 12);
            Release {
                tag_name:     format!("v{index}"),
                published_at: Some(format!("{year:04}-{month:02}-{day:02}T12:00:00Z"),),
            }
        },)
        .collect()
}

fn benchmark_group_by_period(c: &mut Criterion,)
{
    let calendar = CadenceConfig::default().calendar().expect("calendar",);
    let dated = calendar.date_releases(&synthetic_releases(1_000,),).expect("dates",);

    c.bench_function("group_by_period_1000", |b| {
        b.iter(|| group_by_period(black_box(&dated,),),)
    },);
}

fn benchmark_enrich_releases(c: &mut Criterion,)
{
    let calendar = CadenceConfig::default().calendar().expect("calendar",);
    let dated = calendar.date_releases(&synthetic_releases(1_000,),).expect("dates",);
    let buckets = group_by_period(&dated,);

    c.bench_function("enrich_releases_1000", |b| {
        b.iter(|| enrich_releases(black_box(&dated,), "bench", &buckets, &calendar,),)
    },);
}

fn benchmark_summarize(c: &mut Criterion,)
{
    let calendar = CadenceConfig::default().calendar().expect("calendar",);
    let releases = synthetic_releases(5_000,);

    c.bench_function("summarize_5000", |b| {
        b.iter(|| summarize(black_box(&releases,), "bench", &calendar,).expect("summary",),)
    },);
}

fn benchmark_config_parse(c: &mut Criterion,)
{
    let mut yaml = String::from("repositories:\n",);
    for i in 0..100 {
        yaml.push_str(&format!("  - owner: owner{i}\n    repository: repo{i}\n"),);
    }

    c.bench_function("parse_100_repositories", |b| {
        b.iter(|| parse_config(black_box(&yaml,),).expect("parse failed",),)
    },);
}

criterion_group!(
    benches,
    benchmark_group_by_period,
    benchmark_enrich_releases,
    benchmark_summarize,
    benchmark_config_parse
);
criterion_main!(benches);
