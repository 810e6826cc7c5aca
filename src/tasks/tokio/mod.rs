pub mod coordinate;
pub mod deadline;
pub mod executor;
pub mod multiplexer;
pub mod reader;
pub mod supervisor;
