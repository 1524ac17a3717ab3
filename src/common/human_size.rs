// HumanSize trait and implementations
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Unit prefixes for each power of 1024 above bytes.
const UNIT_PREFIXES: &[char] = &['K', 'M', 'G', 'T', 'P', 'E'];

/// Base used when scaling a byte count.
const UNIT: u64 = 1024;

/// `HumanSize` trait.
pub trait HumanSize {
    /// Return `self` as a human friendly size, eg. `1.5 MB`.
    fn humansize(&self) -> String;
}

/// `HumanSize` trait implementation for `u64`.
impl HumanSize for u64 {
    /// Sizes are scaled by 1024 but labelled `KB`, `MB`, etc. without the
    /// `i`. Anything under 1024 bytes is printed as a plain `B` count.
    fn humansize(&self) -> String {
        let bytes = *self;

        if bytes < UNIT {
            return format!("{} B", bytes);
        }

        let mut divisor  = UNIT;
        let mut exponent = 0;
        let mut quotient = bytes / UNIT;

        while quotient >= UNIT {
            divisor  *= UNIT;
            exponent += 1;
            quotient /= UNIT;
        }

        format!(
            "{:.1} {}B",
            bytes as f64 / divisor as f64,
            UNIT_PREFIXES[exponent],
        )
    }
}
