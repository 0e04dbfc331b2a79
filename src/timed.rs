/// Evaluate `$body` and log how long it took, labelled by the trailing format arguments. The value
/// of `$body` is handed back untouched, so a fallible step is timed first and `?`-ed afterwards.
macro_rules! timed {
    ($body:expr, $($label:tt)+) => {{
        let label = format!($($label)+);
        debug!("{label}...");

        let started = std::time::Instant::now();
        let out = $body;
        let elapsed = started.elapsed();

        info!("{label} took {}.{:03}s", elapsed.as_secs(), elapsed.subsec_millis());
        out
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_timed_returns_body() {
        let n = 21;
        assert_eq!(timed!(n * 2, "Doubling {n}"), 42);

        let failed: Result<u8, String> = timed!(Err("no".to_string()), "Failing");
        assert_eq!(failed, Err("no".to_string()));
    }
}
