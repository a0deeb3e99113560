//! Logger module
//!
//! Timestamped stdout/stderr logging for the proxy. One line per request
//! path, plus one kind-specific line for speaker, direct-link, and video
//! requests, each emitted before any fallible work.

use crate::config::Config;
use chrono::Local;
use std::net::SocketAddr;

fn write_info(message: &str) {
    println!("[{}] {message}", Local::now().format("%Y-%m-%d %H:%M:%S"));
}

fn write_error(message: &str) {
    eprintln!("[{}] {message}", Local::now().format("%Y-%m-%d %H:%M:%S"));
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("======================================");
    write_info("---- APPLICATION STARTED ----");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Dev mode: {}", config.app.dev_mode));
    write_info(&format!("Static dir: {}", config.static_dir()));
    write_info(&format!("Data dir: {}", config.app.data_dir));
    write_info("======================================");
}

pub fn log_request_path(path: &str) {
    write_info(&format!("REQUEST PATH: {path}"));
}

pub fn log_speaker_request(handle: &str) {
    write_info(&format!("SPEAKER REQUEST: {handle}"));
}

pub fn log_direct_link_request(kind: &str) {
    write_info(&format!("DIRECT LINK REQUEST: /{kind}/"));
}

pub fn log_video_request(object_id: &str) {
    write_info(&format!("VIDEO REQUEST: {object_id}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}
