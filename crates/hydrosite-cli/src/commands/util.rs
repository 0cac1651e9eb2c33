use rayon::ThreadPoolBuilder;
use tracing::debug;

/// Size the global rayon pool from `"auto"` or a thread count.
pub fn configure_threads(spec: &str) {
    let count = if spec.eq_ignore_ascii_case("auto") {
        num_cpus::get()
    } else {
        spec.parse().unwrap_or_else(|_| num_cpus::get())
    };
    if ThreadPoolBuilder::new().num_threads(count).build_global().is_ok() {
        debug!(threads = count, "configured worker pool");
    }
}
