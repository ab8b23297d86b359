//! Capability tags for cursors.
//!
//! Tags are zero-sized markers, never values anyone inspects at runtime. A
//! cursor names its tag through [`Cursor::Category`](super::Cursor::Category)
//! and the refinement order is encoded by [`Refines`]:
//!
//! ```text
//! InputTag ⊂ ForwardTag ⊂ BidirectionalTag ⊂ RandomAccessTag
//! ```
//!
//! `RandomAccessTag: Refines<InputTag>` holds, `InputTag: Refines<ForwardTag>`
//! does not. Algorithms bound on `C::Category: Refines<...>` to demand a
//! minimum capability. `OutputTag` stands apart from the chain.

use core::fmt::Debug;

mod private {
    pub trait Sealed {}
}

/// A capability tag. Sealed: the set of tags is closed.
pub trait Category: private::Sealed + Copy + Default + Debug + 'static {
    const NAME: &'static str;
}

/// `Self` offers at least the capabilities of `C`.
pub trait Refines<C: Category>: Category {}

macro_rules! tags {
    ($($(#[$meta:meta])* $tag:ident => $name:literal;)*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
            pub struct $tag;

            impl private::Sealed for $tag {}

            impl Category for $tag {
                const NAME: &'static str = $name;
            }
        )*
    };
}

macro_rules! refines {
    ($tag:ident: $($base:ident),+) => {
        $(impl Refines<$base> for $tag {})+
    };
}

tags! {
    /// Single-pass, read-only traversal.
    InputTag => "input";
    /// Single-pass, write-only traversal.
    OutputTag => "output";
    /// Multi-pass traversal.
    ForwardTag => "forward";
    /// Multi-pass traversal in both directions.
    BidirectionalTag => "bidirectional";
    /// Constant-time jumps, distances and ordering.
    RandomAccessTag => "random access";
}

refines!(InputTag: InputTag);
refines!(OutputTag: OutputTag);
refines!(ForwardTag: InputTag, ForwardTag);
refines!(BidirectionalTag: InputTag, ForwardTag, BidirectionalTag);
refines!(RandomAccessTag: InputTag, ForwardTag, BidirectionalTag, RandomAccessTag);

static_assertions::assert_eq_size!(RandomAccessTag, ());
static_assertions::assert_impl_all!(RandomAccessTag: Refines<InputTag>, Refines<BidirectionalTag>);
static_assertions::assert_not_impl_any!(ForwardTag: Refines<BidirectionalTag>);
static_assertions::assert_not_impl_any!(OutputTag: Refines<InputTag>);

/// The name of `C`'s capability tag.
pub fn category_name<C: super::Cursor>() -> &'static str {
    <C::Category as Category>::NAME
}
