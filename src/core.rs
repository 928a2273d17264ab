pub mod command;
pub mod controller;
pub mod domain;
pub mod exchange;
pub mod repository;
