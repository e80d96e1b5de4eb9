//! HTTP request handlers

pub mod admin;
pub mod health;
pub mod webhook;
