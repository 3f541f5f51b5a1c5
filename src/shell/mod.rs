//! The page shell: a landing page and the map page that mounts a view from the browser.

pub mod handlers;
pub mod pages;
