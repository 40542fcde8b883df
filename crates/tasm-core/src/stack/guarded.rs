use std::fmt::Write as _;
use std::ops::Range;

use tracing::{debug, error};

use crate::aligned::AlignedBuf;
use crate::error::ErrorKind;

use super::{Corruption, ElementLayout, StackElement, StackError};

/// Sentinel stored at both ends of every stack.
pub const GUARD: u64 = 0x00B3_33DE_DDED_AEBA;

/// Capacity allocated on creation and used as the growth floor.
pub const INITIAL_CAPACITY: usize = 4;

/// Stacks never shrink below this capacity.
pub const SHRINK_THRESHOLD: usize = 8;

/// Copies one element between byte slices of equal length.
pub type CopyFn = fn(dst: &mut [u8], src: &[u8]);

/// Renders one element for dumps.
pub type PrintFn = fn(elem: &[u8]) -> String;

fn copy_bytes(dst: &mut [u8], src: &[u8]) {
    dst.copy_from_slice(src);
}

/// Construction parameters for a [`GuardedStack`].
#[derive(Clone, Debug)]
pub struct StackSpec {
    name: String,
    size: usize,
    align: usize,
    stride: Option<usize>,
    copy: CopyFn,
    printer: Option<PrintFn>,
}

impl StackSpec {
    pub fn new(name: impl Into<String>, size: usize, align: usize) -> Self {
        Self {
            name: name.into(),
            size,
            align,
            stride: None,
            copy: copy_bytes,
            printer: None,
        }
    }

    /// Spec for a typed element, with its printer already attached.
    pub fn of<T: StackElement>(name: impl Into<String>) -> Self {
        Self::new(name, T::SIZE, T::ALIGN).printer(T::render)
    }

    pub fn stride(mut self, stride: usize) -> Self {
        self.stride = Some(stride);
        self
    }

    pub fn copy(mut self, copy: CopyFn) -> Self {
        self.copy = copy;
        self
    }

    pub fn printer(mut self, printer: PrintFn) -> Self {
        self.printer = Some(printer);
        self
    }
}

/// Growable LIFO of fixed-layout elements with guard sentinels.
///
/// Every mutating operation verifies all invariants before and after its
/// effect. A failed verification is fatal: the stack is dumped at ERROR level
/// and the thread panics.
pub struct GuardedStack {
    guard_head: u64,
    name: String,
    layout: ElementLayout,
    size: usize,
    capacity: usize,
    storage: AlignedBuf,
    copy: CopyFn,
    printer: PrintFn,
    guard_tail: u64,
}

impl GuardedStack {
    pub fn new(spec: StackSpec) -> Result<Self, StackError> {
        let layout = ElementLayout::new(spec.size, spec.align, spec.stride)?;
        let printer = spec
            .printer
            .ok_or_else(|| StackError::MissingPrinter(spec.name.clone()))?;

        let mut stack = Self {
            guard_head: GUARD,
            name: spec.name,
            layout,
            size: 0,
            capacity: 0,
            storage: AlignedBuf::new(),
            copy: spec.copy,
            printer,
            guard_tail: GUARD,
        };
        stack.resize(INITIAL_CAPACITY)?;
        debug!(stack = %stack.name, ?layout, "created");
        Ok(stack)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layout(&self) -> ElementLayout {
        self.layout
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Copy `elem` onto the top, doubling capacity first when full.
    pub fn push(&mut self, elem: &[u8]) -> Result<(), StackError> {
        self.check_element(elem.len())?;
        self.ensure_intact("push");

        if self.size == self.capacity {
            let grown = if self.capacity == 0 {
                INITIAL_CAPACITY
            } else {
                self.capacity
                    .checked_mul(2)
                    .ok_or(StackError::Alloc { bytes: usize::MAX })?
            };
            self.resize(grown)?;
        }

        let slot = self.slot(self.size);
        (self.copy)(&mut self.storage.as_mut_slice()[slot], elem);
        self.size += 1;

        self.ensure_intact("push");
        Ok(())
    }

    /// Copy the top element into `out` and remove it.
    ///
    /// Halves capacity once utilisation drops to a quarter.
    pub fn pop(&mut self, out: &mut [u8]) -> Result<(), StackError> {
        self.check_element(out.len())?;
        self.ensure_intact("pop");

        if self.size == 0 {
            return Err(StackError::Empty);
        }

        self.size -= 1;
        let slot = self.slot(self.size);
        (self.copy)(out, &self.storage.as_slice()[slot]);

        if self.capacity >= SHRINK_THRESHOLD && self.size <= self.capacity / 4 {
            self.resize(self.capacity / 2)?;
        }

        self.ensure_intact("pop");
        Ok(())
    }

    /// Copy the top element into `out` without removing it.
    pub fn top(&self, out: &mut [u8]) -> Result<(), StackError> {
        self.check_element(out.len())?;
        self.ensure_intact("top");

        if self.size == 0 {
            return Err(StackError::Empty);
        }

        let slot = self.slot(self.size - 1);
        (self.copy)(out, &self.storage.as_slice()[slot]);
        Ok(())
    }

    /// Re-check every invariant and return the first violation.
    pub fn verify(&self) -> Result<(), Corruption> {
        let ElementLayout {
            size,
            align,
            stride,
        } = self.layout;

        if size == 0 {
            return Err(Corruption::ZeroElementSize);
        }
        if !align.is_power_of_two() {
            return Err(Corruption::BadAlignment(align));
        }
        if stride < size {
            return Err(Corruption::StrideTooSmall { stride, size });
        }
        if !stride.is_multiple_of(align) {
            return Err(Corruption::StrideMisaligned { stride, align });
        }
        if self.size > self.capacity {
            return Err(Corruption::SizeOverCapacity {
                size: self.size,
                capacity: self.capacity,
            });
        }

        let allocated = self.storage.is_allocated();
        if allocated != (self.capacity > 0) {
            return Err(Corruption::AllocationState {
                capacity: self.capacity,
                allocated,
            });
        }

        let expected = self.capacity.saturating_mul(stride);
        if self.storage.len() != expected {
            return Err(Corruption::StorageLength {
                expected,
                actual: self.storage.len(),
            });
        }
        if allocated && !self.storage.addr().is_multiple_of(align) {
            return Err(Corruption::Misaligned {
                addr: self.storage.addr(),
                align,
            });
        }

        if self.guard_head != GUARD {
            return Err(Corruption::HeadGuard(self.guard_head));
        }
        if self.guard_tail != GUARD {
            return Err(Corruption::TailGuard(self.guard_tail));
        }

        Ok(())
    }

    /// Render the diagnostic block: header fields, then one line per slot.
    pub fn render_dump(&self) -> String {
        let status = match self.verify() {
            Ok(()) => "OK".to_string(),
            Err(corruption) => format!("{} ({corruption})", ErrorKind::Corruption.label()),
        };
        let ElementLayout {
            size,
            align,
            stride,
        } = self.layout;

        let mut out = String::new();
        writeln!(out, "=== STACK DUMP `{}` ===", self.name).unwrap();
        writeln!(out, "status   : {status}").unwrap();
        writeln!(out, "layout   : size {size} align {align} stride {stride}").unwrap();
        writeln!(out, "size/cap : {} / {}", self.size, self.capacity).unwrap();
        writeln!(out, "storage  : {} bytes", self.storage.len()).unwrap();
        writeln!(
            out,
            "guards   : {:#018x} {:#018x}",
            self.guard_head, self.guard_tail
        )
        .unwrap();

        // Walk whatever storage exists so a corrupted stack still dumps.
        if stride > 0 && size <= stride {
            for (i, chunk) in self.storage.as_slice().chunks_exact(stride).enumerate() {
                let elem = &chunk[..size];
                let hex = elem
                    .iter()
                    .map(|b| format!("{b:02x}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                if i < self.size {
                    let value = (self.printer)(elem);
                    writeln!(out, "  [{i}] USED   {hex} | value: {value}").unwrap();
                } else {
                    writeln!(out, "  [{i}] UNUSED {hex}").unwrap();
                }
            }
        }

        out.push_str("=== END STACK DUMP ===");
        out
    }

    fn check_element(&self, len: usize) -> Result<(), StackError> {
        if len != self.layout.size {
            return Err(StackError::ElementSize {
                expected: self.layout.size,
                actual: len,
            });
        }
        Ok(())
    }

    fn slot(&self, index: usize) -> Range<usize> {
        let start = index * self.layout.stride;
        start..start + self.layout.size
    }

    fn resize(&mut self, capacity: usize) -> Result<(), StackError> {
        self.ensure_intact("resize");

        let bytes = capacity
            .checked_mul(self.layout.stride)
            .ok_or(StackError::Alloc { bytes: usize::MAX })?;
        if bytes == 0 {
            self.storage.release();
        } else {
            self.storage
                .try_resize(bytes)
                .map_err(|_| StackError::Alloc { bytes })?;
        }
        debug!(stack = %self.name, from = self.capacity, to = capacity, "resized");
        self.capacity = capacity;

        self.ensure_intact("resize");
        Ok(())
    }

    /// Fail-fast gate around every mutation.
    fn ensure_intact(&self, op: &'static str) {
        if let Err(corruption) = self.verify() {
            for line in self.render_dump().lines() {
                error!("{line}");
            }
            panic!(
                "stack corruption detected in {op} on `{}`: {corruption}",
                self.name
            );
        }
    }

    #[cfg(test)]
    pub(crate) fn scribble_guards(&mut self, head: u64, tail: u64) {
        self.guard_head = head;
        self.guard_tail = tail;
    }
}

impl std::fmt::Debug for GuardedStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuardedStack")
            .field("name", &self.name)
            .field("layout", &self.layout)
            .field("size", &self.size)
            .field("capacity", &self.capacity)
            .finish()
    }
}
