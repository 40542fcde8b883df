use crate::aligned::MAX_ALIGN;

use super::StackError;

/// Byte layout of one stack element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementLayout {
    pub size: usize,
    pub align: usize,
    /// Distance between consecutive slots. Always `>= size` and a multiple of `align`.
    pub stride: usize,
}

impl ElementLayout {
    /// Validate a layout. Without an explicit stride, `size` is rounded up to `align`.
    pub fn new(size: usize, align: usize, stride: Option<usize>) -> Result<Self, StackError> {
        if size == 0 {
            return Err(StackError::ZeroElementSize);
        }
        if !align.is_power_of_two() || align > MAX_ALIGN {
            return Err(StackError::BadAlignment(align));
        }

        let stride = match stride {
            Some(stride) if stride < size || !stride.is_multiple_of(align) => {
                return Err(StackError::BadStride {
                    stride,
                    size,
                    align,
                });
            }
            Some(stride) => stride,
            None => size.next_multiple_of(align),
        };

        Ok(Self {
            size,
            align,
            stride,
        })
    }
}
