//! One module per operator. Each holds the operator struct built by the
//! matching [`ObservableExt`](crate::observable::ObservableExt) method and
//! the observer it subscribes upstream with.

pub mod amb;
pub mod box_it;
pub mod collect;
pub mod combine_latest;
pub mod concat;
pub mod debounce;
pub mod debug;
pub mod delay;
pub mod distinct_until_changed;
pub mod element_at;
pub mod filter;
pub mod finalize;
pub mod ignore_elements;
pub mod map;
pub mod map_err;
pub mod merge;
pub mod merge_all;
pub mod on_complete;
pub mod on_error;
pub mod reduce;
pub mod sample;
pub mod scan;
pub mod skip;
pub mod skip_until;
pub mod skip_while;
pub mod start_with;
pub mod switch_latest;
pub mod take;
pub mod take_until;
pub mod take_while;
pub mod tap;
pub mod with_latest_from;
pub mod zip;
