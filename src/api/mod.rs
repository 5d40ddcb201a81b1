//! Внешний API покерного движка.
//!
//! Здесь описываются:
//! - команды клиента (commands.rs);
//! - запросы только на чтение (queries.rs);
//! - DTO и события сервера с учётом зрителя (dto.rs);
//! - ошибки, которые видит клиент (errors.rs).

pub mod commands;
pub mod dto;
pub mod errors;
pub mod queries;

pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use queries::*;
