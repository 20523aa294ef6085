pub mod emoji;
pub mod importance;
pub mod view;

pub use emoji::emoji_for;
pub use importance::is_important;
pub use view::to_view;
