//! Volatile cell for memory written by the bus master.

/// Volatile cell wrapper for hardware-written fields
///
/// Every access is a volatile read or write so the compiler never caches a
/// value the engine may overwrite behind its back.
#[repr(transparent)]
pub(crate) struct VolatileCell<T: Copy> {
    value: core::cell::UnsafeCell<T>,
}

// Safety: accesses are single aligned volatile loads/stores of `Copy` words.
unsafe impl<T: Copy> Sync for VolatileCell<T> {}

impl<T: Copy> VolatileCell<T> {
    /// Create a new volatile cell with the given initial value
    #[inline(always)]
    pub const fn new(value: T) -> Self {
        Self {
            value: core::cell::UnsafeCell::new(value),
        }
    }

    /// Read the value (volatile read)
    #[inline(always)]
    pub fn get(&self) -> T {
        // SAFETY: the pointer comes from our own UnsafeCell and is aligned.
        unsafe { core::ptr::read_volatile(self.value.get()) }
    }

    /// Write a value (volatile write), standing in for the bus master
    #[cfg(test)]
    #[inline(always)]
    pub fn set(&self, value: T) {
        // SAFETY: the pointer comes from our own UnsafeCell and is aligned.
        unsafe { core::ptr::write_volatile(self.value.get(), value) }
    }
}

impl<T: Copy + Default> Default for VolatileCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volatile_cell_round_trips_value() {
        let cell = VolatileCell::new(0u32);
        cell.set(0xDEAD_BEEF);
        assert_eq!(cell.get(), 0xDEAD_BEEF);
    }

    #[test]
    fn volatile_cell_is_transparent() {
        assert_eq!(
            core::mem::size_of::<VolatileCell<u32>>(),
            core::mem::size_of::<u32>()
        );
    }
}
