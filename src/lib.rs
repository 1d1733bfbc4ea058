//! # Imageboard Search
//!
//! imageboard_search is a client library for searching images on booru-style imageboards
//! through one common interface.
//!
//! Supported APIs: Danbooru 2.x, Danbooru 1.x and Moebooru, Gelbooru, Shimmie2, E621 and Flickr.
//! Every backend parses its own XML format into the same [`Image`](image::Image) and
//! [`SearchResult`](search_result::SearchResult) types.
//!
//! ```rust,no_run
//! use imageboard_search::prelude::*;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = DEFAULT_SERVICES["danbooru"].connect()?;
//!
//! let mut result = client.search("duck").await?;
//! let next = client.search_page("duck", 1).await?;
//! result.merge_page(next);
//!
//! result.filter_ratings(&[SafeSearchRating::Safe]);
//! # Ok(())
//! # }
//! ```
pub mod client;
pub mod client_config;
pub mod detection;
pub mod error;
pub mod image;
pub mod imageboards;
pub mod prelude;
pub mod search_result;
pub mod transport;


pub use client::{AuthenticationType, SearchClient};
pub use client_config::{ApiType, Settings};
pub use image::Image;
pub use search_result::SearchResult;
