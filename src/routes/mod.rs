pub mod yield_routes;
