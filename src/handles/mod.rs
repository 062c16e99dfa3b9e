//! Nullable heap handles with explicit ownership semantics: the move-only
//! [`ExclusivePtr`] and the reference-counted [`CountedPtr`].
//!
//! Both handles allocate through [`Box`] and free the moment their last owner
//! lets go, so neither can leak under normal use. Dereferencing a null handle
//! is a logic error ([`NullHandle`](crate::util::error::NullHandle)), and the
//! raw-adoption escape hatches refuse to adopt the allocation a handle already
//! manages ([`SelfAssignment`](crate::util::error::SelfAssignment)), as the
//! transfer would otherwise free it mid-hand-off.

pub mod counted;
pub mod exclusive;

mod tests;

#[doc(inline)]
pub use counted::CountedPtr;
#[doc(inline)]
pub use exclusive::ExclusivePtr;
