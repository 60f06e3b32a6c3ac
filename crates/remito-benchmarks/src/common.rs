//! Common utilities for benchmarks

use criterion::Criterion;
use pprof::criterion::{Output, PProfProfiler};

/// Configure criterion with flamegraph profiling support
pub fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(std::time::Duration::from_secs(2))
        .measurement_time(std::time::Duration::from_secs(5))
        .sample_size(100)
        .with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
}

/// INI text with `sections` sections of `keys` pairs each
pub fn create_ini_content(sections: usize, keys: usize) -> String {
    let mut content = String::from("env = production\n");
    for section in 0..sections {
        content.push_str(&format!("\n[section{}]\n", section));
        for key in 0..keys {
            content.push_str(&format!("key{} = value{}-{}\n", key, section, key));
        }
    }
    content
}
