pub mod dashboard;
pub mod feedback;
pub mod qr_code;
