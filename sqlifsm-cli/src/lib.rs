//! Front ends for the `sqlifsm` scanner: the report printed by `sqlifsm scan`
//! and the HTTP endpoint behind `sqlifsm serve`.

pub mod report;
pub mod server;

pub use report::ScanReport;
pub use server::{router, serve, CheckRequest, CheckResponse, ServerConfig, Status};
