//! # ACS Rust Backend
//!
//! Scheduling backend for a small aero club / flight school.
//!
//! This crate provides the booking core behind the club's scheduling
//! dashboard: staff and aircraft resource calendars, member records, the
//! booking lifecycle (unconfirmed → confirmed → checked-out →
//! complete/canceled), and aircraft defect tracking. The backend exposes a
//! REST API via Axum for the React frontend.
//!
//! ## Features
//!
//! - **Day Schedule**: Place bookings onto a fixed 08:00-20:00 resource grid
//! - **Booking Lifecycle**: A small forward-only status machine driven by
//!   explicit user actions
//! - **Directory**: Staff, aircraft and member records with name search
//! - **Defect Tracking**: Aircraft fault reports independent of bookings
//! - **HTTP API**: RESTful endpoints with bearer-token authorization
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Identifier newtypes and the DTO re-export surface
//! - [`models`]: Domain entities (bookings, resources, members, defects)
//! - [`db`]: Repository pattern, service layer, and persistence backends
//! - [`services`]: Pure scheduling computations (grid layout, conflicts)
//! - [`routes`]: View-model types for the API responses
//! - [`http`]: Axum-based HTTP server and request handlers

// Allow large error types - RepositoryError carries rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod db;
pub mod models;

pub mod routes;

pub mod services;

#[cfg(test)]
mod api_tests;

#[cfg(feature = "http-server")]
pub mod http;
