pub mod channel;
pub mod view;

pub use channel::*;
pub use view::*;
