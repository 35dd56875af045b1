pub mod qrcode;

pub use qrcode::{QrCodeFields, QrCodeRecord};
