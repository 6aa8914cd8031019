pub mod metadata;
pub mod page_shell;
pub mod sitemap;
pub mod slug_router;
pub mod view_counter;
