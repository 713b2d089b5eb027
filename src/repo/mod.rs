//! SQL access for the two tables. Handlers own validation and error mapping;
//! these functions only run parameterised statements.

pub mod attendance;
pub mod employee;
