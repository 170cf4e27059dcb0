pub mod current;
pub mod footer;
pub mod forecast;
pub mod header;
pub mod help;
pub mod onboarding;
pub mod permission;
pub mod search_sheet;
pub mod selector;
pub mod shared;
