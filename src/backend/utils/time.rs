use crate::models::common::TimestampNs;

/// Returns the current time as nanoseconds since epoch.
///
/// Inside a canister this is the Internet Computer's time; native builds
/// (tests, tooling) read the system clock.
#[cfg(target_arch = "wasm32")]
pub fn get_current_time_ns() -> TimestampNs {
    ic_cdk::api::time()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn get_current_time_ns() -> TimestampNs {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as TimestampNs)
        .unwrap_or(0)
}
