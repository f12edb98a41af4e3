//! Network access to the dealership backend.

pub mod djangoapp;
