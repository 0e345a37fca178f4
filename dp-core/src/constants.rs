//! Constants and configuration values for DeltaPIN
//!
//! Centralizes magic numbers, static PIN lists, remote endpoints and defaults.

/// Hardware address layout
pub mod address {
    /// Width of a hardware address in bits
    pub const ADDRESS_BITS: u32 = 48;

    /// Mask selecting the 48 address bits of an integer
    pub const ADDRESS_MASK: u64 = (1 << ADDRESS_BITS) - 1;

    /// Number of hex digits in a hardware address
    pub const HEX_DIGITS: usize = 12;

    /// Mask selecting the NIC (device-specific) half of an address
    pub const NIC_MASK: u64 = 0xFF_FFFF;
}

/// WPS PIN layout
pub mod pin {
    /// Digits in a full PIN (core plus checksum)
    pub const PIN_DIGITS: usize = 8;

    /// Digits in a PIN core
    pub const CORE_DIGITS: usize = 7;

    /// PIN cores live in `0..CORE_MODULUS`
    pub const CORE_MODULUS: i64 = 10_000_000;
}

/// PINs that are known to be static and therefore carry no delta information
pub mod static_pins {
    /// Universally common static PINs
    pub const COMMON: &[&str] = &["00000000", "12345670", "12345678"];

    /// Static PINs shipped by Tenda firmware
    pub const TENDA: &[&str] = &[
        "03436080", "03436165", "03974247", "06966409", "09278325", "19967899",
        "25086164", "25563818", "25777390", "27334737", "35806691", "45304347",
        "50542208", "63410372", "63491838", "71294988", "74250226",
    ];
}

/// 3WiFi wireless database endpoints
pub mod wifi_db {
    /// Default database location
    pub const DEFAULT_BASE_URL: &str = "https://3wifi.stascorp.com";

    /// Login endpoint, relative to the base URL
    pub const LOGIN_PATH: &str = "/user.php?a=login";

    /// Search endpoint, relative to the base URL
    pub const FIND_PATH: &str = "/3wifi.php?a=find";

    /// Search pattern matching any stored WPS PIN
    pub const ANY_WPS_PIN: &str = "□□□□□□□□";

    /// Default HTTP timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Upper bound accepted for the HTTP timeout
    pub const MAX_TIMEOUT_SECS: u64 = 300;

    /// User agent sent with every request
    pub const USER_AGENT: &str = concat!("deltapin/", env!("CARGO_PKG_VERSION"));
}

/// Default file locations used by the driver
pub mod defaults {
    /// Delta table shipped next to the binary
    pub const DELTAS_FILE: &str = "tenda_deltas.json";

    /// Plain-text `login:password` credential file
    pub const ACCOUNT_FILE: &str = "account.txt";
}
