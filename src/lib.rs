//! # Tank-Mix WhatsApp Bot
//!
//! A WhatsApp chatbot that walks farmers through a numbered-menu dialogue
//! (language, crop, pesticide category, two pesticides) and answers with a
//! tank-mix compatibility verdict plus safety precautions, localized in
//! English and Telugu.

pub mod bot;
pub mod config;
pub mod dataset;
pub mod dialogue;
pub mod localization;
pub mod webhook;
