pub mod catalog;
pub mod irradiance;
pub mod plot;
pub mod pv_model;
pub mod solar_position;
pub mod weather_service;
pub mod yield_estimator;
