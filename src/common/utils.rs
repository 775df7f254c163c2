use std::time::Duration;

/// Format an elapsed duration for summary logs ("4.21s", "2m 3.5s").
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs >= 60.0 {
        format!("{}m {:.1}s", (secs / 60.0) as u64, secs % 60.0)
    } else {
        format!("{:.2}s", secs)
    }
}
