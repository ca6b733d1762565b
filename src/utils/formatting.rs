fn format_duration(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.1}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

/// Render a latency measured in fractional milliseconds.
pub fn format_latency(elapsed_ms: f64) -> String {
    if elapsed_ms < 1000.0 {
        format!("{:.0}ms", elapsed_ms)
    } else {
        format_duration(elapsed_ms as u64)
    }
}
