use super::handle::Handle;

/// Number of real nodes in a subtree (the node's `order`).
///
/// Shares the `Handle` representation so `Option<Size>` stays niche-packed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Size(Handle);

impl Size {
    pub(crate) const MAX: usize = Handle::MAX;
    pub(crate) const ZERO: Self = Self::from_usize(0);
    pub(crate) const ONE: Self = Self::from_usize(1);

    #[inline]
    pub(crate) const fn from_usize(size: usize) -> Self {
        assert!(size <= Self::MAX, "`Size::from_usize()` - `size` > `Size::MAX`!");
        Self(Handle::from_index(size))
    }

    #[inline]
    pub(crate) const fn to_usize(self) -> usize {
        self.0.to_index()
    }

    #[inline]
    pub(crate) const fn increment(self) -> Self {
        Self::from_usize(self.to_usize() + 1)
    }

    #[inline]
    pub(crate) const fn decrement(self) -> Self {
        assert!(self.to_usize() > 0, "`Size::decrement()` - `size` is zero!");
        Self::from_usize(self.to_usize() - 1)
    }

    /// The order of a node whose children have orders `left` and `right`.
    #[inline]
    pub(crate) const fn combine(left: Self, right: Self) -> Self {
        Self::from_usize(left.to_usize() + right.to_usize() + 1)
    }
}
