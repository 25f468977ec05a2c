// Example: a chat-style list pinned to its last message, with messages streaming in.
use height_cache::HeightCache;

fn main() {
    tracing_subscriber::fmt::init();

    let viewport = 300.0;
    let mut cache = HeightCache::new(40, 48.0);

    for batch in 0..3usize {
        let last = cache.len() - 1;
        let range = cache.range_ending_at(last, viewport);

        // Bottom rows mount first, so they get measured first.
        for i in range.indexes() {
            cache.measure(i, 36.0 + ((i * 13) % 5) as f64 * 12.0);
        }
        let range = cache.range_ending_at(last, viewport);
        let scroll_to = (cache.total_height() - viewport).max(0.0);
        println!(
            "batch={batch} len={} window={:?} scroll_to={scroll_to} anchor={}",
            cache.len(),
            range.indexes(),
            cache.find_start_index_with_offset(scroll_to),
        );

        // New messages arrive unmeasured at the end.
        cache.set_len(cache.len() + 5);
    }
}
