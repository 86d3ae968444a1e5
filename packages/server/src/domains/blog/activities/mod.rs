mod images;
mod posts;

pub use images::*;
pub use posts::*;
