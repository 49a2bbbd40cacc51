mod feedback_test;
mod helpers;
mod qr_code_test;
