//! Search client configuration object and helpers.
mod loading;
mod object;

pub use self::loading::load;
pub use self::loading::Error;
pub use self::object::SearchClientConf;
pub use self::object::SearchClientConfBuilder;
