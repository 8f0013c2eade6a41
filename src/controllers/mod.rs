//! Controladores
//!
//! Capa entre las rutas y los repositorios: normaliza la entrada y aplica las
//! reglas de dominio.

pub mod driver_controller;
pub mod vehicle_controller;
pub mod vehicle_log_controller;

pub use driver_controller::DriverController;
pub use vehicle_controller::VehicleController;
pub use vehicle_log_controller::VehicleLogController;
