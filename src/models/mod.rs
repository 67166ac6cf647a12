mod node;
mod range;
mod status;

pub use node::{Node, NodeKind, NodeSet};
pub use range::{parse_date, DateRange, DATE_FORMAT};
pub use status::Status;
