//! Domain types - plain data and rules independent of git access

pub mod commit;
pub mod range;
pub mod tag;

pub use commit::{Commit, RawCommit};
pub use range::{DecorationField, LogFields, MessageField, RangeQuery};
pub use tag::{split_tag_list, TagFilter};
