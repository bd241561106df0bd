/// Overall timeout for a single Horizon load or submit round trip, in seconds.
pub const DEFAULT_HORIZON_TIMEOUT_SECONDS: u64 = 30;
