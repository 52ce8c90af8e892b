pub mod ast;
pub mod builder;
pub mod keywords;
pub mod loc;
pub mod operator;
