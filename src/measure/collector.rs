//! The process-wide reclamation switch suspended by
//! [`Measure::disable_gc`](crate::Measure::disable_gc).
//!
//! Code that defers or batches memory reclamation (arenas, epoch based
//! reclaimers, caches that trim themselves) can consult [`is_enabled`] and
//! hold off while a measured call is running. Hosts with their own
//! reclamation machinery can [`install`] a [`Collector`] that drives it
//! directly.
//!
//! # Concurrency
//!
//! The switch is shared by the whole process and is not reference counted.
//! If two measured calls with `disable_gc` overlap on different threads, the
//! first one to finish turns collection back on while the other is still
//! running.

use crate::error::Error;
use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicBool, Ordering};

pub trait Collector: Send + Sync {
    fn enable(&self);
    fn disable(&self);
    fn is_enabled(&self) -> bool;
}

/// A collector that is nothing more than an atomic on/off flag.
#[derive(Debug)]
pub struct FlagCollector {
    enabled: AtomicBool,
}

impl FlagCollector {
    pub const fn new() -> FlagCollector {
        FlagCollector {
            enabled: AtomicBool::new(true),
        }
    }
}

impl Default for FlagCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector for FlagCollector {
    fn enable(&self) {
        self.enabled.store(true, Ordering::SeqCst);
    }

    fn disable(&self) {
        self.enabled.store(false, Ordering::SeqCst);
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }
}

static DEFAULT_COLLECTOR: FlagCollector = FlagCollector::new();
static INSTALLED_COLLECTOR: OnceCell<Box<dyn Collector>> = OnceCell::new();

/// Installs the collector used by every measured call in this process.
///
/// This can only be done once.
pub fn install<C>(collector: C) -> Result<(), Error>
where
    C: Collector + 'static,
{
    INSTALLED_COLLECTOR
        .set(Box::new(collector))
        .map_err(|_| Error::msg("a collector has already been installed"))?;
    log::debug!("installed process collector");
    Ok(())
}

/// The installed collector, or the built-in flag if none was installed.
pub fn current() -> &'static dyn Collector {
    match INSTALLED_COLLECTOR.get() {
        Some(collector) => &**collector,
        None => &DEFAULT_COLLECTOR,
    }
}

pub fn is_enabled() -> bool {
    current().is_enabled()
}

/// Keeps a collector disabled until dropped.
#[must_use = "the collector is enabled again as soon as the guard is dropped"]
pub struct Suspended<'c> {
    collector: &'c dyn Collector,
}

impl<'c> Suspended<'c> {
    pub fn new(collector: &'c dyn Collector) -> Suspended<'c> {
        collector.disable();
        log::trace!("collector disabled");
        Suspended { collector }
    }
}

impl Drop for Suspended<'_> {
    fn drop(&mut self) {
        self.collector.enable();
        log::trace!("collector enabled");
    }
}
