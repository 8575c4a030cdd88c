pub mod error;
pub mod health;
pub mod mcp;
pub mod openapi;
pub mod tools;
