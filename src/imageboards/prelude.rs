pub use super::danbooru::Danbooru;
pub use super::e621::E621;
pub use super::flickr::{Flickr, FlickrUser, FLICKR_API_ENDPOINT};
pub use super::gelbooru::Gelbooru;
pub use super::moebooru::DanbooruLegacy;
pub use super::shimmie::Shimmie;
pub use super::{BooruClient, SiteApi};
