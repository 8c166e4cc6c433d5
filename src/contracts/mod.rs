//! Delivery contracts: templates, generation and the offer board

pub mod board;
pub mod generator;
pub mod template;

pub use board::{BoardContext, MaintenanceReport, OfferBoard};
pub use generator::{Contract, ContractGenerator};
pub use template::{default_templates, ContractTemplate};
