//! 业务模型模块
//!
//! 按领域划分：每个领域下包含 entities / requests / responses。

pub mod assignments;
pub mod auth;
pub mod classes;
pub mod common;
pub mod enrollments;
pub mod files;
pub mod materials;
pub mod submissions;
pub mod system;
pub mod users;

pub use common::*;
