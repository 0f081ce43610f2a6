//! HTTP request handlers for API endpoints.
//!
//! This module contains all request handlers organized by resource type.

pub mod auth;
pub mod category;
pub mod health;
pub mod product;
pub mod users;
