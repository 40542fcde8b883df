//! Guarded, type-erased LIFO container.
//!
//! A [`GuardedStack`] stores fixed-layout elements as raw bytes in aligned
//! storage, bracketed by two sentinel fields that every mutating operation
//! re-checks. Instances are owned by a [`StackRegistry`] and addressed through
//! copyable [`StackHandle`]s.

mod element;
mod error;
mod guarded;
mod layout;
mod registry;

pub use element::StackElement;
pub use error::{Corruption, StackError};
pub use guarded::{
    CopyFn, GUARD, GuardedStack, INITIAL_CAPACITY, PrintFn, SHRINK_THRESHOLD, StackSpec,
};
pub use layout::ElementLayout;
pub use registry::{StackHandle, StackRegistry};

/// Emit a multi-line block through `tracing`, one event per line.
pub fn emit_block(level: tracing::Level, text: &str) {
    use tracing::Level;

    for line in text.lines() {
        if level == Level::ERROR {
            tracing::error!("{line}");
        } else if level == Level::WARN {
            tracing::warn!("{line}");
        } else if level == Level::INFO {
            tracing::info!("{line}");
        } else if level == Level::DEBUG {
            tracing::debug!("{line}");
        } else {
            tracing::trace!("{line}");
        }
    }
}
