/// A value with a fixed byte layout that can live on a guarded stack.
pub trait StackElement: Sized {
    const SIZE: usize;
    const ALIGN: usize;

    /// Write the value into exactly `SIZE` bytes.
    fn write_to(&self, out: &mut [u8]);

    /// Read a value back from exactly `SIZE` bytes.
    fn read_from(bytes: &[u8]) -> Self;

    /// Printer used by stack dumps.
    fn render(bytes: &[u8]) -> String;
}

macro_rules! impl_le_element {
    ($($ty:ty),*) => {$(
        impl StackElement for $ty {
            const SIZE: usize = size_of::<$ty>();
            const ALIGN: usize = align_of::<$ty>();

            fn write_to(&self, out: &mut [u8]) {
                out.copy_from_slice(&self.to_le_bytes());
            }

            fn read_from(bytes: &[u8]) -> Self {
                let mut raw = [0u8; size_of::<$ty>()];
                raw.copy_from_slice(bytes);
                <$ty>::from_le_bytes(raw)
            }

            fn render(bytes: &[u8]) -> String {
                Self::read_from(bytes).to_string()
            }
        }
    )*};
}

impl_le_element!(i32, u32, i64, u64, f64);
