//! Modelos de datos
//!
//! Este módulo contiene las entidades del registro: vehículos, conductores
//! y los logs de entrada/salida, junto con la paginación compartida.

pub mod driver;
pub mod pagination;
pub mod vehicle;
pub mod vehicle_log;

pub use driver::Driver;
pub use pagination::Pagination;
pub use vehicle::Vehicle;
pub use vehicle_log::{VehicleLog, VehicleLogFilter, VehicleLogType, VehicleLogUpdate};
