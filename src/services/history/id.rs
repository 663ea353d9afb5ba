use rand::{thread_rng, Rng};

/// Builds `"{timestamp}-{6 hex digits}"`, retrying while `taken` reports a clash.
pub fn generate<F>(timestamp: i64, taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    let mut rng = thread_rng();
    loop {
        let suffix: u32 = rng.gen_range(0..0x100_0000);
        let id = format!("{timestamp}-{suffix:06x}");
        if !taken(&id) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn id_is_timestamp_prefixed() {
        let id = generate(1_700_000_000_000, |_| false);
        let (ts, suffix) = id.split_once('-').unwrap();
        assert_eq!(ts, "1700000000000");
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn retries_on_collision() {
        let calls = Cell::new(0);
        let id = generate(5, |_| {
            calls.set(calls.get() + 1);
            calls.get() < 3
        });
        assert_eq!(calls.get(), 3);
        assert!(id.starts_with("5-"));
    }
}
