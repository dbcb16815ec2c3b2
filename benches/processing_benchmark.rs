use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use traffic_weather_joiner::config::ColumnNames;
use traffic_weather_joiner::models::{Header, Row, TimedRow, Timestamp, TimestampColumns, WeatherRecord};
use traffic_weather_joiner::processors::{
    CalendarFeatureEncoder, GroupColumns, Grouper, StationAssigner, TemporalJoiner, TemporalSorter,
};
use traffic_weather_joiner::utils::HolidayCalendar;

const TRAFFIC_COLUMNS: [&str; 9] = [
    "SegmentID", "Yr", "M", "D", "HH", "MM", "latitude", "longitude", "Vol",
];

fn minute_of(index: usize) -> Timestamp {
    let minutes = (index * 15) as i32;
    Timestamp::new(2020, 1, 1 + minutes / 1440, (minutes / 60) % 24, minutes % 60)
}

// Rows for `segments` segments, interleaved and in reverse time order
fn create_traffic_rows(segments: usize, rows_per_segment: usize) -> Vec<Row> {
    let mut rows = Vec::with_capacity(segments * rows_per_segment);
    for index in (0..rows_per_segment).rev() {
        let time = minute_of(index);
        for segment in 0..segments {
            rows.push(vec![
                format!("S{segment}"),
                time.year().to_string(),
                time.month().to_string(),
                time.day().to_string(),
                time.hour().to_string(),
                time.minute().to_string(),
                format!("{:.4}", 40.55 + segment as f64 * 0.01),
                format!("{:.4}", -74.15 + segment as f64 * 0.01),
                (index % 97).to_string(),
            ]);
        }
    }
    rows
}

fn create_weather(hours: usize) -> Vec<WeatherRecord> {
    (0..hours)
        .map(|hour| {
            let time = Timestamp::new(2020, 1, 1 + (hour / 24) as i32, (hour % 24) as i32, 0);
            WeatherRecord::new(time, vec!["6".to_string(), time.to_string(), "12.5".to_string()])
        })
        .collect()
}

fn benchmark_grouping(c: &mut Criterion) {
    let header = Header::from(TRAFFIC_COLUMNS.to_vec());
    let columns = GroupColumns::resolve(&header, &ColumnNames::default());
    let rows = create_traffic_rows(50, 200);

    c.bench_function("group_by_segment", |b| {
        b.iter(|| {
            let grouper = Grouper::new(StationAssigner::new(), columns);
            black_box(grouper.group(rows.clone()))
        })
    });
}

fn benchmark_sorting(c: &mut Criterion) {
    let header = Header::from(TRAFFIC_COLUMNS.to_vec());
    let columns = TimestampColumns::resolve(&header, &ColumnNames::default());

    let mut group = c.benchmark_group("temporal_sort");
    for size in [1_000, 10_000].iter() {
        let rows = create_traffic_rows(1, *size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &rows, |b, rows| {
            b.iter(|| {
                let sorter = TemporalSorter::new(columns);
                black_box(sorter.sort(rows.clone()))
            })
        });
    }
    group.finish();
}

fn benchmark_join(c: &mut Criterion) {
    let weather = create_weather(24 * 30);
    let traffic: Vec<TimedRow> = (0..4 * 24 * 30)
        .map(|index| TimedRow::new(minute_of(index), vec![index.to_string()]))
        .collect();
    let joiner = TemporalJoiner::default();

    c.bench_function("temporal_join_month", |b| {
        b.iter(|| black_box(joiner.join("S0.csv", 6, &traffic, &weather)))
    });
}

fn benchmark_calendar_features(c: &mut Criterion) {
    let holidays = HolidayCalendar::us_federal();
    let encoder = CalendarFeatureEncoder::new(&holidays);
    let timestamps: Vec<Timestamp> = (0..10_000).map(minute_of).collect();

    c.bench_function("calendar_features", |b| {
        b.iter(|| {
            for timestamp in &timestamps {
                black_box(encoder.encode(timestamp).to_fields());
            }
        })
    });
}

fn benchmark_station_lookup(c: &mut Criterion) {
    let assigner = StationAssigner::new();
    let points: Vec<(f64, f64)> = (0..1_000)
        .map(|i| (40.5 + (i % 40) as f64 * 0.01, -74.25 + (i / 40) as f64 * 0.02))
        .collect();

    c.bench_function("nearest_station", |b| {
        b.iter(|| {
            for &(latitude, longitude) in &points {
                black_box(assigner.nearest(latitude, longitude));
            }
        })
    });
}

criterion_group!(
    benches,
    benchmark_grouping,
    benchmark_sorting,
    benchmark_join,
    benchmark_calendar_features,
    benchmark_station_lookup
);
criterion_main!(benches);
