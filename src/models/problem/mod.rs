//! Problem models: the vehicle fleet catalog and city wide economic parameters.

mod economics;
pub use self::economics::*;

mod fleet;
pub use self::fleet::*;
