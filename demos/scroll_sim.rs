// Example: a renderer loop that scrolls through a long list and measures rows as they mount.
use height_cache::{HeightCache, ItemLayout};
use tracing_subscriber::filter::LevelFilter;

// Stand-in for the UI layer's real measurement.
fn rendered_height(index: usize) -> f64 {
    24.0 + (index % 7) as f64 * 6.0
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .init();

    let viewport = 480.0;
    let overscan = 2;
    let mut cache = HeightCache::new(100_000, 32.0);
    let mut rows: Vec<ItemLayout> = Vec::new();

    for frame in 0..6u32 {
        let offset = f64::from(frame) * 1_250.0;
        let Some(range) = cache.visible_range(offset, viewport) else {
            break;
        };
        let range = range.with_overscan(overscan, cache.len());

        // Mount + measure everything in the window; the next frame sees the new heights.
        let delta = cache.measure_many(range.indexes().map(|i| (i, rendered_height(i))));

        cache.collect_items(range, &mut rows);
        println!(
            "frame={frame} offset={offset} range={:?} rows={} first={:?} total_delta={delta} total={}",
            range.indexes(),
            rows.len(),
            rows.first(),
            cache.total_height(),
        );
    }

    println!(
        "measured={} of {} (default={})",
        cache.measured_count(),
        cache.len(),
        cache.default_height()
    );
}
