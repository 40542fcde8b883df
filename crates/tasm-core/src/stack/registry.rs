use std::fmt;

use tracing::{Level, debug};

use super::{GuardedStack, StackElement, StackError, StackSpec, emit_block};

/// Largest element the typed helpers copy through a stack buffer.
const INLINE_ELEMENT_MAX: usize = 64;

/// Opaque identifier of a stack inside a [`StackRegistry`].
///
/// Stays valid while the stack grows or shrinks; becomes invalid on destroy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StackHandle(u32);

impl StackHandle {
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for StackHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owned arena of stacks keyed by handle. Freed slots are reused lowest-first.
#[derive(Debug, Default)]
pub struct StackRegistry {
    slots: Vec<Option<GuardedStack>>,
}

impl StackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, spec: StackSpec) -> Result<StackHandle, StackError> {
        let stack = GuardedStack::new(spec)?;

        let index = match self.slots.iter().position(Option::is_none) {
            Some(free) => {
                self.slots[free] = Some(stack);
                free
            }
            None => {
                self.slots.push(Some(stack));
                self.slots.len() - 1
            }
        };

        let handle = StackHandle(index as u32);
        debug!(%handle, "stack registered");
        Ok(handle)
    }

    /// Release the stack's storage and return its slot to the free pool.
    pub fn destroy(&mut self, handle: StackHandle) -> Result<(), StackError> {
        let slot = self
            .slots
            .get_mut(handle.0 as usize)
            .filter(|slot| slot.is_some())
            .ok_or(StackError::InvalidHandle(handle))?;
        *slot = None;

        while matches!(self.slots.last(), Some(None)) {
            self.slots.pop();
        }
        debug!(%handle, "stack destroyed");
        Ok(())
    }

    pub fn get(&self, handle: StackHandle) -> Result<&GuardedStack, StackError> {
        self.slots
            .get(handle.0 as usize)
            .and_then(Option::as_ref)
            .ok_or(StackError::InvalidHandle(handle))
    }

    fn get_mut(&mut self, handle: StackHandle) -> Result<&mut GuardedStack, StackError> {
        self.slots
            .get_mut(handle.0 as usize)
            .and_then(Option::as_mut)
            .ok_or(StackError::InvalidHandle(handle))
    }

    /// Number of live stacks.
    pub fn live(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn push(&mut self, handle: StackHandle, elem: &[u8]) -> Result<(), StackError> {
        self.get_mut(handle)?.push(elem)
    }

    pub fn pop(&mut self, handle: StackHandle, out: &mut [u8]) -> Result<(), StackError> {
        self.get_mut(handle)?.pop(out)
    }

    pub fn top(&self, handle: StackHandle, out: &mut [u8]) -> Result<(), StackError> {
        self.get(handle)?.top(out)
    }

    pub fn len(&self, handle: StackHandle) -> Result<usize, StackError> {
        Ok(self.get(handle)?.len())
    }

    pub fn capacity(&self, handle: StackHandle) -> Result<usize, StackError> {
        Ok(self.get(handle)?.capacity())
    }

    /// Non-fatal check: a violation comes back as [`StackError::Corrupt`].
    pub fn verify(&self, handle: StackHandle) -> Result<(), StackError> {
        Ok(self.get(handle)?.verify()?)
    }

    pub fn render_dump(&self, handle: StackHandle) -> Result<String, StackError> {
        Ok(self.get(handle)?.render_dump())
    }

    /// Emit the stack's dump block through `tracing` at `level`.
    pub fn dump(&self, handle: StackHandle, level: Level) -> Result<(), StackError> {
        emit_block(level, &self.render_dump(handle)?);
        Ok(())
    }

    pub fn push_value<T: StackElement>(
        &mut self,
        handle: StackHandle,
        value: &T,
    ) -> Result<(), StackError> {
        let mut buf = [0u8; INLINE_ELEMENT_MAX];
        let bytes = inline::<T>(&mut buf)?;
        value.write_to(bytes);
        self.push(handle, bytes)
    }

    pub fn pop_value<T: StackElement>(&mut self, handle: StackHandle) -> Result<T, StackError> {
        let mut buf = [0u8; INLINE_ELEMENT_MAX];
        let bytes = inline::<T>(&mut buf)?;
        self.pop(handle, bytes)?;
        Ok(T::read_from(bytes))
    }

    pub fn top_value<T: StackElement>(&self, handle: StackHandle) -> Result<T, StackError> {
        let mut buf = [0u8; INLINE_ELEMENT_MAX];
        let bytes = inline::<T>(&mut buf)?;
        self.top(handle, bytes)?;
        Ok(T::read_from(bytes))
    }

    #[cfg(test)]
    pub(crate) fn stack_mut(&mut self, handle: StackHandle) -> &mut GuardedStack {
        self.get_mut(handle).expect("live handle")
    }
}

fn inline<T: StackElement>(buf: &mut [u8; INLINE_ELEMENT_MAX]) -> Result<&mut [u8], StackError> {
    buf.get_mut(..T::SIZE)
        .ok_or(StackError::ElementTooLarge(T::SIZE))
}
