//! Shared fixtures for integration tests.

#![allow(dead_code)]

use pdf_hierarchy::{MemorySource, RawFragment, Rect};

pub const PAGE_WIDTH: f32 = 595.0;
pub const PAGE_HEIGHT: f32 = 842.0;

pub fn page() -> Rect {
    Rect::from_size(PAGE_WIDTH, PAGE_HEIGHT)
}

/// A line inside the text column, `width` points wide.
pub fn line(text: &str, page_index: u32, y: f32, x0: f32, width: f32, font: &str, size: f32) -> RawFragment {
    RawFragment::new(text, Rect::new(x0, y, x0 + width, y + size), page())
        .with_container(Rect::new(40.0, y, 555.0, y + size))
        .with_uniform_style(font, size, 0)
        .on_page(page_index)
}

pub fn heading(text: &str, page_index: u32, y: f32, size: f32) -> RawFragment {
    line(text, page_index, y, 40.0, 8.0 * text.len() as f32, "Arial-Bold", size)
}

pub fn body(text: &str, page_index: u32, y: f32) -> RawFragment {
    line(text, page_index, y, 40.0, 515.0, "Arial", 10.0)
}

/// A two-page Key Information Document.
pub fn kid_source() -> MemorySource {
    MemorySource::new(
        "mem://kid.pdf",
        vec![
            body("Marketing communication", 0, 40.0),
            line("Key Information Document", 0, 60.0, 200.0, 195.0, "Arial-Bold", 16.0),
            heading("Purpose", 0, 100.0, 14.0),
            body("This document provides you with key information about this investment product.", 0, 120.0),
            heading("Product", 0, 150.0, 14.0),
            body("Name of the product and the manufacturer are listed below in this section.", 0, 170.0),
            heading("What is this product?", 0, 200.0, 12.0),
            body("The product is an open-ended fund investing in global equities and bonds.", 0, 220.0),
            line("Page 1 of 2", 0, 825.0, 260.0, 60.0, "Arial", 8.0),
            heading("What are the risks?", 1, 60.0, 14.0),
            body("The summary risk indicator is a guide to the level of risk of this product.", 1, 80.0),
            RawFragment::new("   ", Rect::new(40.0, 100.0, 60.0, 110.0), page()).on_page(1),
        ],
    )
}
