pub mod ids;
pub mod unicorn;

pub use ids::{IdGenerator, UnicornId};
pub use unicorn::{Gender, Unicorn, normalize_gender_code};
