//! Console diagnostics with a process-wide verbosity level.
//!
//! Diagnostics are observational only and never part of the functional
//! contract, so they go straight to stdout/stderr instead of a log facade.

use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Verbosity {
    /// No stdout output at all. Errors still go to stderr.
    Silent = 0,
    /// Major pipeline steps: dimensions, decoder used, output path.
    Normal = 1,
    /// Also per-decoder fallback attempts and their failure reasons.
    Verbose = 2,
}

static LEVEL: AtomicU8 = AtomicU8::new(Verbosity::Normal as u8);

pub fn set_verbosity(level: Verbosity) {
    LEVEL.store(level as u8, Ordering::Relaxed);
}

pub fn verbosity() -> Verbosity {
    match LEVEL.load(Ordering::Relaxed) {
        0 => Verbosity::Silent,
        2 => Verbosity::Verbose,
        _ => Verbosity::Normal,
    }
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        if $crate::logger::verbosity() >= $crate::logger::Verbosity::Normal {
            println!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! detail {
    ($($arg:tt)*) => {
        if $crate::logger::verbosity() >= $crate::logger::Verbosity::Verbose {
            println!("🔍 {}", format!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        eprintln!("❌ {}", format!($($arg)*));
    };
}
