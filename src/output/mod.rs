// Output: CSV artifacts on disk and colored terminal display.

pub mod files;
pub mod terminal;
