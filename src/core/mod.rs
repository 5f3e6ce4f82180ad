pub mod normalize;
pub mod reporting;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::domain::model::Record;
pub use crate::domain::ports::SoapTransport;
pub use crate::utils::error::Result;
