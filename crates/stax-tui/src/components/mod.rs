pub mod browser;
pub mod header;
pub mod letter_bar;
