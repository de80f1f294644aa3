//! Camada de dados do painel da distribuidora: clientes, distribuidores e o
//! kanban de recibos, espelhados numa store normalizada em memória.

pub mod boundary;
pub mod common;
pub mod config;
pub mod db;
pub mod handlers;
pub mod models;
pub mod services;
