// src/core/mod.rs

pub mod html;
pub mod markup;
pub mod sanitize;

pub use markup::{Document, Element, ElementRef};
