use super::handle::Handle;
use super::size::Size;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

// Red-black node. Links are arena handles; absent links point at `Handle::SENTINEL`.
#[derive(Clone)]
pub(crate) struct Node<K> {
    parent: Handle,
    left: Handle,
    right: Handle,
    color: Color,
    // The number of real nodes in the subtree rooted at this node.
    order: Size,
    // `None` only for the sentinel. The value lives in the tree's value arena.
    entry: Option<(K, Handle)>,
}

impl<K> Node<K> {
    /// Creates the sentinel: black, order 0, every link pointing at itself.
    pub(crate) const fn sentinel() -> Self {
        Self {
            parent: Handle::SENTINEL,
            left: Handle::SENTINEL,
            right: Handle::SENTINEL,
            color: Color::Black,
            order: Size::ZERO,
            entry: None,
        }
    }

    /// Creates a red leaf hanging off `parent`.
    pub(crate) const fn new(parent: Handle, key: K, value: Handle) -> Self {
        Self {
            parent,
            left: Handle::SENTINEL,
            right: Handle::SENTINEL,
            color: Color::Red,
            order: Size::ONE,
            entry: Some((key, value)),
        }
    }

    #[inline]
    pub(crate) fn parent(&self) -> Handle {
        self.parent
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Handle) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) fn left(&self) -> Handle {
        self.left
    }

    #[inline]
    pub(crate) fn set_left(&mut self, left: Handle) {
        self.left = left;
    }

    #[inline]
    pub(crate) fn right(&self) -> Handle {
        self.right
    }

    #[inline]
    pub(crate) fn set_right(&mut self, right: Handle) {
        self.right = right;
    }

    #[inline]
    pub(crate) fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    #[inline]
    pub(crate) fn order(&self) -> Size {
        self.order
    }

    #[inline]
    pub(crate) fn set_order(&mut self, order: Size) {
        self.order = order;
    }

    #[inline]
    pub(crate) fn key(&self) -> &K {
        &self.entry.as_ref().expect("`Node::key()` - the sentinel has no key!").0
    }

    #[inline]
    pub(crate) fn value(&self) -> Handle {
        self.entry.as_ref().expect("`Node::value()` - the sentinel has no value!").1
    }

    /// Consumes a real node, returning its key and value handle.
    pub(crate) fn into_entry(self) -> (K, Handle) {
        self.entry.expect("`Node::into_entry()` - the sentinel has no entry!")
    }
}
