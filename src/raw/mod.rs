mod arena;
mod handle;
mod node;
mod raw_red_black_tree;
mod size;

pub(crate) use handle::Handle;
pub(crate) use raw_red_black_tree::RawRedBlackTree;
