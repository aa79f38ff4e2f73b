use chrono::{DateTime, Duration, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use haoqiyou::config::Config;
use haoqiyou::services::pipeline::build_page;
use haoqiyou::services::route::decode_route;
use serde_json::{json, Value};
use std::hint::black_box;

/// Synthetic feed: clusters of rides at a handful of popular meetup spots,
/// spread over a few months around `now`.
fn synthetic_feed(count: usize, now: DateTime<Utc>) -> Vec<Value> {
    let spots = [
        (37.4419, -122.1430),
        (37.3861, -122.0839),
        (37.7749, -122.4194),
        (37.3382, -121.8863),
    ];

    (0..count)
        .map(|i| {
            let (lat, lng) = spots[i % spots.len()];
            let start = now + Duration::hours(i as i64 * 7 - 24 * 30);
            json!({
                "_id": {"$oid": format!("{:024x}", i)},
                "source_type": "strava",
                "source_group_id": {"$numberLong": (i % 5).to_string()},
                "event_time_utc": {"$date": start.to_rfc3339()},
                "gps_coordinates": format!("{},{}", lat + (i % 3) as f64 * 0.001, lng),
                "distance_meters": {"$numberInt": "52000"},
                "elevation_gain_meters": 812.5,
                "title": format!("Saturday ride #{i}"),
                "description": "Route: [map](https://www.strava.com/routes/1) see https://example.com",
                "route_polyline": "_p~iF~ps|U_ulLnnqC_mqNvxq`@",
            })
        })
        .collect()
}

fn benchmark_build_page(c: &mut Criterion) {
    let now: DateTime<Utc> = "2024-06-01T12:00:00Z".parse().expect("valid instant");
    let config = Config::default();
    let feed = synthetic_feed(300, now);

    let mut group = c.benchmark_group("pipeline");

    group.bench_function("build_page_300_events", |b| {
        b.iter(|| build_page(black_box(&feed), &config, now))
    });

    group.bench_function("decode_route", |b| {
        b.iter(|| decode_route(black_box("_p~iF~ps|U_ulLnnqC_mqNvxq`@")))
    });

    group.finish();
}

criterion_group!(benches, benchmark_build_page);
criterion_main!(benches);
