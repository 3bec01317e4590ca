extern crate chrono;
extern crate diesel;
extern crate tokio;
pub mod canonical;
pub mod cli;
pub mod config;
pub mod db;
pub mod helpers;
pub mod logger;
pub mod matcher;
pub mod models;
pub mod services;
pub mod web;
