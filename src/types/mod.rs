pub mod alert;
pub mod analysis;
pub mod candle;

pub use alert::*;
pub use analysis::*;
pub use candle::*;
