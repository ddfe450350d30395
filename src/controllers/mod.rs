pub mod yield_controller;
