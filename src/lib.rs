pub mod admin;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod filters;
pub mod handlers;
pub mod navigation;
pub mod paths;
pub mod portal;
pub mod routes;
pub mod state;
pub mod validation;
pub mod views;
