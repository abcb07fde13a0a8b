
mod parse_good;
mod property_ring_buffer;
mod property_roundtrip;
mod property_scanner;

/// Test count for quickcheck properties: more on CI, few under miri.
pub(crate) fn quickcheck_tests() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}
