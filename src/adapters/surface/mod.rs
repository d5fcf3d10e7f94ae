//! Render surface adapters. Implement RenderSurface.

pub mod html_page;

pub use html_page::HtmlPage;
