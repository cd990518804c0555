pub mod apps;
pub mod codec;
pub mod error;
pub mod map;
pub mod naming;
pub mod reduce;
pub mod util;
pub mod workspace;
