// Adapters layer: the SOAP-over-HTTP implementation of the transport port.

pub mod soap;
pub mod xml;
