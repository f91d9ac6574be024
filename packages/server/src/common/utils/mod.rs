pub mod content;

pub use content::take_chars;
