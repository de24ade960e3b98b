//! UI module - painted widgets shared by the app views

pub mod components;
