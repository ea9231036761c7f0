// benches/convert.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use swims_geojson::config::options::ConvertOptions;
use swims_geojson::convert::convert_rows;
use swims_geojson::file::to_geojson_string;
use swims_geojson::source::tsv::read_rows;

fn sample_tsv(n: usize) -> String {
    let mut s = String::from("Swim #\tYear\tMonth\tDay\tCoordinates\n");
    for i in 0..n {
        let lat = 40.0 + (i % 90) as f64 * 0.01;
        let lon = -74.0 + (i % 180) as f64 * 0.01;
        s.push_str(&format!("{i}\t2003\tJuly\t{}\t{lat},{lon}\n", 1 + i % 28));
    }
    s
}

fn bench_convert(c: &mut Criterion) {
    let tsv = sample_tsv(2_000);
    let opts = ConvertOptions::default();

    c.bench_function("read_rows_2k", |b| {
        b.iter(|| black_box(read_rows(black_box(tsv.as_bytes())).unwrap().len()))
    });

    let rows = read_rows(tsv.as_bytes()).unwrap();
    c.bench_function("convert_rows_2k", |b| {
        b.iter(|| {
            let out = convert_rows(black_box(rows.clone()), &opts).unwrap();
            black_box(out.collection.len())
        })
    });

    let collection = convert_rows(rows, &opts).unwrap().collection;
    c.bench_function("serialize_pretty_2k", |b| {
        b.iter(|| black_box(to_geojson_string(black_box(&collection), true).unwrap().len()))
    });
}

criterion_group!(benches, bench_convert);
criterion_main!(benches);
