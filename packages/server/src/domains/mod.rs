pub mod exhibitions;
