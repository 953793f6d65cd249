pub mod villa;
