use criterion::{black_box, criterion_group, criterion_main, Criterion};
use screenshot_signer::{devices, CaptureOptions, Config, RenderClient, ScreenshotService};
use std::time::Duration;

// Fast settings for all benchmarks
fn configure_fast_group(group: &mut criterion::BenchmarkGroup<criterion::measurement::WallTime>) {
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_millis(500));
    group.sample_size(20);
}

fn benchmark_config_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("config");
    configure_fast_group(&mut group);

    group.bench_function("creation", |b| {
        b.iter(|| {
            let config = Config::default();
            black_box(config);
        });
    });

    group.finish();
}

fn benchmark_option_building(c: &mut Criterion) {
    let mut group = c.benchmark_group("capture_options");
    configure_fast_group(&mut group);

    group.bench_function("build", |b| {
        b.iter(|| {
            let options = CaptureOptions::url("https://example.com")
                .block_chats(true)
                .block_cookie_banners(true)
                .block_ads(true)
                .cache(true)
                .cache_key("example")
                .cache_ttl(2_592_000)
                .reduced_motion(true)
                .device_scale_factor(1.0)
                .viewport_width(1920)
                .viewport_height(1080);
            black_box(options);
        });
    });

    group.bench_function("serialize_query", |b| {
        let options = CaptureOptions::url("https://example.com")
            .cache_key("example")
            .viewport_width(1920)
            .viewport_height(1080);

        b.iter(|| {
            let query = options.to_query();
            black_box(query);
        });
    });

    group.finish();
}

fn benchmark_url_signing(c: &mut Criterion) {
    let mut group = c.benchmark_group("signing");
    configure_fast_group(&mut group);

    let client = RenderClient::new("access", "secret", "https://api.example.test/take");
    let options = CaptureOptions::url("https://example.com")
        .cache_key("example")
        .full_page(true);

    group.bench_function("signed_url", |b| {
        b.iter(|| {
            let signed = client.signed_url(&options);
            black_box(signed);
        });
    });

    group.finish();
}

fn benchmark_capture_mapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("capture");
    configure_fast_group(&mut group);

    let service = ScreenshotService::new(
        RenderClient::new("access", "secret", "https://api.example.test/take"),
        "https://example.com",
    );

    group.bench_function("single", |b| {
        b.iter(|| {
            let screenshot = service.capture("https://example.com", &devices::FULL_PAGE);
            black_box(screenshot);
        });
    });

    group.bench_function("catalog", |b| {
        b.iter(|| {
            let screenshots = service.capture_all("https://example.com");
            black_box(screenshots);
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_config_creation,
    benchmark_option_building,
    benchmark_url_signing,
    benchmark_capture_mapping
);
criterion_main!(benches);
