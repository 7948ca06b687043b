/// Largest batch accepted by the scheduler unless configured otherwise
pub const DEFAULT_MAX_BATCH_SIZE: usize = 3000;

/// Reference bound on simultaneously in-flight hosts
pub const DEFAULT_MAX_CONCURRENCY: usize = 300;

pub const DEFAULT_PING_TIMEOUT_MS: u64 = 1000;
pub const DEFAULT_PORT_TIMEOUT_MS: u64 = 2000;

pub const SSH_PORT: u16 = 22;
pub const RDP_PORT: u16 = 3389;

/// Character appended to a host to form its renamed identity
pub const ALTERNATE_SUFFIX: char = 'x';

pub const WINDOWS_DOMAIN_SUFFIX: &str = ".domain.biz";
pub const LINUX_DOMAIN_SUFFIX: &str = "x.domain.biz";

pub const LINUX_TTL_MIN: u8 = 1;
pub const LINUX_TTL_MAX: u8 = 100;
pub const WINDOWS_TTL_MIN: u8 = 101;
pub const WINDOWS_TTL_MAX: u8 = 255;

/// Display form of an inventory field with no value
pub const NOT_FOUND: &str = "not found";

/// ICMP echo payload used by the library ping strategy
pub const ICMP_PAYLOAD: [u8; 56] = [0; 56];
