pub mod generation_status;
