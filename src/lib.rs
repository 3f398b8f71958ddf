//! eat-n-split: split bills with friends and track who owes whom.

pub mod add_friend;
pub mod logging;
pub mod registry;
pub mod report;
pub mod split_bill;
pub mod tui;
pub mod types;
