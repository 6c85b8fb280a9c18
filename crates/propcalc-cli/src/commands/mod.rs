pub mod catalog;
pub mod mortgage;
pub mod transfer_tax;
pub mod waterfall;
