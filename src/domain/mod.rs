// Domain layer: voucher model and the store port. No I/O here.

pub mod model;
pub mod ports;
