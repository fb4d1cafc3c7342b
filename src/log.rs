/*!
# Arcstk: Logging

A thin, process-wide level filter. This is peripheral to the checksum and
parsing engines — it exists only because call sites at component boundaries
want to emit a one-line note without every caller having to wire up a real
logging framework.

The pure computation components (the checksum recurrence, the partitioner)
never call into this module; logging happens only at the edges (driver
construction, parser error detection, matcher scoring), per the boundary
rule.
*/

use std::sync::atomic::{AtomicU8, Ordering};



#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[repr(u8)]
/// # Log Level.
pub enum Level {
	/// # Logging Disabled.
	Off = 0,

	/// # Errors Only.
	Error = 1,

	/// # Warnings and Errors.
	Warn = 2,

	/// # Informational.
	Info = 3,

	/// # Debug.
	Debug = 4,

	/// # Trace (Everything).
	Trace = 5,
}

impl Level {
	/// # From u8.
	const fn from_u8(src: u8) -> Self {
		match src {
			1 => Self::Error,
			2 => Self::Warn,
			3 => Self::Info,
			4 => Self::Debug,
			5 => Self::Trace,
			_ => Self::Off,
		}
	}
}



/// # Global Level.
///
/// A single integer is all the shared mutable state logging requires, so an
/// `AtomicU8` stands in for the mutex-protected singleton a busier appender
/// would need; `stderr` itself serializes concurrent writes.
static LEVEL: AtomicU8 = AtomicU8::new(Level::Off as u8);



/// # Set Level.
///
/// Change the process-wide log level. This affects every subsequent call to
/// [`log`] or the [`log!`] macro, in this thread or any other.
pub fn set_level(level: Level) { LEVEL.store(level as u8, Ordering::Relaxed); }

#[must_use]
/// # Current Level.
pub fn level() -> Level { Level::from_u8(LEVEL.load(Ordering::Relaxed)) }

/// # Log a Message.
///
/// Write `msg` to `stderr`, prefixed with `level`, provided `level` is at or
/// below the currently configured [`Level`]. Use the [`log!`] macro instead
/// of calling this directly; it skips formatting entirely when the level
/// gate fails.
pub fn log(level: Level, msg: &str) {
	if level != Level::Off && level <= self::level() {
		eprintln!("[{level:?}] {msg}");
	}
}

/// # Log, Gated and Lazily Formatted.
///
/// ```ignore
/// log!(Level::Debug, "parsed block {}", n);
/// ```
macro_rules! log_impl {
	($level:expr, $($arg:tt)+) => {
		if $level != $crate::log::Level::Off && $level <= $crate::log::level() {
			$crate::log::log($level, &format!($($arg)+));
		}
	};
}
pub(crate) use log_impl as log;



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_level_gate() {
		set_level(Level::Warn);
		assert_eq!(level(), Level::Warn);
		assert!(Level::Error <= level());
		assert!(Level::Info > level());
		set_level(Level::Off);
	}
}
